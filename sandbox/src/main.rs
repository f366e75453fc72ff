// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Drives the preload agent through a simulated frame loop.
//!
//! Stages a handful of assets in a temporary directory, preloads them batch
//! by batch, and prints the progress a loading screen would render.

use anyhow::Result;
use phora_agents::PreloadAgent;
use phora_core::config::TickContext;
use phora_core::resource::{FontFace, FontSource, ResourceDescriptor, ResourceKind};
use phora_lanes::{
    AudioCacheLane, BinaryCacheLane, FontFaceLane, MarkupCacheLane, TextCacheLane, TextureCacheLane,
};
use std::path::Path;

fn stage_assets(dir: &Path) -> Result<Vec<ResourceDescriptor>> {
    let png = dir.join("logo.png");
    image::RgbaImage::from_pixel(16, 16, image::Rgba([40, 120, 200, 255])).save(&png)?;
    let json = dir.join("settings.json");
    std::fs::write(&json, "{\"music\": true}")?;
    let plist = dir.join("atlas.plist");
    std::fs::write(&plist, "<plist version=\"1.0\"></plist>")?;
    let ccbi = dir.join("menu.ccbi");
    std::fs::write(&ccbi, [0x01, 0x02, 0x03])?;

    Ok(vec![
        ResourceDescriptor::from(png.to_str().unwrap()),
        ResourceDescriptor::from(json.to_str().unwrap()),
        ResourceDescriptor::from(plist.to_str().unwrap()),
        ResourceDescriptor::from(ccbi.to_str().unwrap()),
        ResourceDescriptor::Font(FontFace {
            family: "PressStart".to_string(),
            sources: vec![FontSource {
                src: "res/press_start.ttf".to_string(),
                format: "truetype".to_string(),
            }],
        }),
    ])
}

fn main() -> Result<()> {
    env_logger::init();

    let dir = tempfile::tempdir()?;
    let resources = stage_assets(dir.path())?;

    let mut agent = PreloadAgent::default();
    agent.register_lane(ResourceKind::Image, TextureCacheLane::new());
    agent.register_lane(ResourceKind::Sound, AudioCacheLane::new());
    agent.register_lane(ResourceKind::Text, TextCacheLane::new());
    agent.register_lane(ResourceKind::Markup, MarkupCacheLane::new());
    agent.register_lane(ResourceKind::Binary, BinaryCacheLane::new());
    agent.register_lane(ResourceKind::Font, FontFaceLane::new());

    agent.preload(resources.clone(), || {
        log::info!("main menu resources resident");
    });

    let mut frame = 0u32;
    while agent.is_running() {
        frame += 1;
        agent.tick(&TickContext::at_rate(60.0))?;
        println!("frame {frame:02}: {:3}%", agent.percentage());
    }

    let status = agent.report_status();
    println!(
        "loaded {} resource(s), {} failure(s)",
        status.loaded_total, status.failed_total
    );

    agent.purge_cached_data(&resources)?;
    println!("caches released");
    Ok(())
}

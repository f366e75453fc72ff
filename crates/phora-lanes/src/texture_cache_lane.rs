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

//! Image preloading into a CPU-side texture cache.

use ahash::AHashMap;
use anyhow::{Context, Result};
use phora_core::lane::ResourceLane;
use phora_core::resource::ResourceDescriptor;
use phora_core::signal::CompletionSignal;
use std::any::Any;

/// A decoded image held on the CPU, ready for upload by the host's renderer.
#[derive(Debug, Clone)]
pub struct CpuImage {
    /// Tightly packed RGBA8 pixels (kept in sRGB space).
    pub pixels: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// A lane that decodes image files and caches the results by path.
#[derive(Default)]
pub struct TextureCacheLane {
    cache: AHashMap<String, CpuImage>,
}

impl TextureCacheLane {
    /// Creates a lane with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached image for `path`, if it was preloaded.
    pub fn get(&self, path: &str) -> Option<&CpuImage> {
        self.cache.get(path)
    }

    /// Checks whether `path` is present in the cache.
    pub fn contains(&self, path: &str) -> bool {
        self.cache.contains_key(path)
    }

    fn load_image(path: &str) -> Result<CpuImage> {
        let bytes =
            std::fs::read(path).with_context(|| format!("Failed to read image file '{path}'"))?;
        let img = image::load_from_memory(&bytes).context("Failed to decode image from memory")?;

        // Convert to RGBA8 (keep in sRGB space)
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();

        Ok(CpuImage {
            pixels: rgba.into_raw(),
            width,
            height,
        })
    }
}

impl ResourceLane for TextureCacheLane {
    fn strategy_name(&self) -> &'static str {
        "TextureCache"
    }

    fn start_load(&mut self, descriptor: &ResourceDescriptor, signal: CompletionSignal) {
        let path = descriptor.source();
        if self.cache.contains_key(path) {
            signal.complete();
            return;
        }
        match Self::load_image(path) {
            Ok(img) => {
                log::debug!("cached texture '{path}' ({}x{})", img.width, img.height);
                self.cache.insert(path.to_string(), img);
                signal.complete();
            }
            Err(e) => signal.fail(e),
        }
    }

    fn release(&mut self, path: &str) {
        if self.cache.remove(path).is_some() {
            log::debug!("evicted texture '{path}'");
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

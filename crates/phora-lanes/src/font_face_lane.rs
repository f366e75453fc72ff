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

//! Font face registration.
//!
//! This lane does not load font data. It records the face declaration in a
//! catalog the host's text stack reads from (the moral equivalent of
//! injecting a style rule and a hidden probe element), then signals
//! completion **immediately**. A batch reporting 100% therefore guarantees
//! the face is *declared*, not that its bytes are ready; hosts that need a
//! readiness guarantee must obtain it from their text stack.

use ahash::AHashMap;
use anyhow::anyhow;
use phora_core::lane::ResourceLane;
use phora_core::resource::{FontSource, ResourceDescriptor};
use phora_core::signal::CompletionSignal;
use std::any::Any;

/// A lane that declares font faces in an in-memory catalog.
#[derive(Default)]
pub struct FontFaceLane {
    catalog: AHashMap<String, Vec<FontSource>>,
}

impl FontFaceLane {
    /// Creates a lane with an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the declared sources for `family`, if any.
    pub fn declared(&self, family: &str) -> Option<&[FontSource]> {
        self.catalog.get(family).map(Vec::as_slice)
    }

    /// Checks whether `family` has been declared.
    pub fn is_declared(&self, family: &str) -> bool {
        self.catalog.contains_key(family)
    }
}

impl ResourceLane for FontFaceLane {
    fn strategy_name(&self) -> &'static str {
        "FontFace"
    }

    fn start_load(&mut self, descriptor: &ResourceDescriptor, signal: CompletionSignal) {
        let ResourceDescriptor::Font(face) = descriptor else {
            signal.fail(anyhow!(
                "FontFace lane received a non-font descriptor '{}'",
                descriptor.source()
            ));
            return;
        };
        log::debug!(
            "declared font face '{}' with {} source(s)",
            face.family,
            face.sources.len()
        );
        self.catalog
            .insert(face.family.clone(), face.sources.clone());
        // Completion is optimistic: the face is declared, not fetched.
        signal.complete();
    }

    fn release(&mut self, path: &str) {
        if self.catalog.remove(path).is_some() {
            log::debug!("removed font face declaration '{path}'");
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phora_core::resource::FontFace;
    use phora_core::signal::BatchId;

    fn press_start() -> ResourceDescriptor {
        ResourceDescriptor::Font(FontFace {
            family: "PressStart".to_string(),
            sources: vec![FontSource {
                src: "res/press_start.ttf".to_string(),
                format: "truetype".to_string(),
            }],
        })
    }

    #[test]
    fn declaration_completes_immediately() {
        let mut lane = FontFaceLane::new();
        let (tx, rx) = crossbeam_channel::unbounded();
        lane.start_load(
            &press_start(),
            CompletionSignal::new(BatchId::from_raw(0), "PressStart", tx),
        );

        // The signal fires inside start_load, before any font data exists.
        assert!(rx.try_recv().unwrap().result.is_ok());
        assert_eq!(lane.declared("PressStart").unwrap().len(), 1);

        lane.release("PressStart");
        assert!(!lane.is_declared("PressStart"));
    }

    #[test]
    fn non_font_descriptors_are_rejected() {
        let mut lane = FontFaceLane::new();
        let (tx, rx) = crossbeam_channel::unbounded();
        lane.start_load(
            &ResourceDescriptor::Path("res/a.png".to_string()),
            CompletionSignal::new(BatchId::from_raw(0), "res/a.png", tx),
        );
        assert!(rx.try_recv().unwrap().result.is_err());
    }
}

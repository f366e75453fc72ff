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

//! Structured-document preloading (plist, xml, fnt, tmx, tsx).
//!
//! The cache holds the document text; parsing stays with the host's own
//! parser. Preloading here only guarantees the file was readable UTF-8 and
//! is resident in memory when the host asks for it.

use ahash::AHashMap;
use anyhow::Context;
use phora_core::lane::ResourceLane;
use phora_core::resource::ResourceDescriptor;
use phora_core::signal::CompletionSignal;
use std::any::Any;

/// A lane that caches structured document text by path.
#[derive(Default)]
pub struct MarkupCacheLane {
    cache: AHashMap<String, String>,
}

impl MarkupCacheLane {
    /// Creates a lane with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached document for `path`, if it was preloaded.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.cache.get(path).map(String::as_str)
    }

    /// Checks whether `path` is present in the cache.
    pub fn contains(&self, path: &str) -> bool {
        self.cache.contains_key(path)
    }
}

impl ResourceLane for MarkupCacheLane {
    fn strategy_name(&self) -> &'static str {
        "MarkupCache"
    }

    fn start_load(&mut self, descriptor: &ResourceDescriptor, signal: CompletionSignal) {
        let path = descriptor.source();
        if self.cache.contains_key(path) {
            signal.complete();
            return;
        }
        match std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read document '{path}'"))
        {
            Ok(doc) => {
                self.cache.insert(path.to_string(), doc);
                signal.complete();
            }
            Err(e) => signal.fail(e),
        }
    }

    fn release(&mut self, path: &str) {
        if self.cache.remove(path).is_some() {
            log::debug!("evicted document '{path}'");
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

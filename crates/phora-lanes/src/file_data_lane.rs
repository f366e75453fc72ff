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

//! Plain text and binary file preloading: the generic file-data caches.

use ahash::AHashMap;
use anyhow::Context;
use phora_core::lane::ResourceLane;
use phora_core::resource::ResourceDescriptor;
use phora_core::signal::CompletionSignal;
use std::any::Any;

/// A lane that reads text files (scripts, shaders, json) into a string cache.
#[derive(Default)]
pub struct TextCacheLane {
    cache: AHashMap<String, String>,
}

impl TextCacheLane {
    /// Creates a lane with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached text for `path`, if it was preloaded.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.cache.get(path).map(String::as_str)
    }

    /// Checks whether `path` is present in the cache.
    pub fn contains(&self, path: &str) -> bool {
        self.cache.contains_key(path)
    }
}

impl ResourceLane for TextCacheLane {
    fn strategy_name(&self) -> &'static str {
        "TextCache"
    }

    fn start_load(&mut self, descriptor: &ResourceDescriptor, signal: CompletionSignal) {
        let path = descriptor.source();
        if self.cache.contains_key(path) {
            signal.complete();
            return;
        }
        match std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read text file '{path}'"))
        {
            Ok(text) => {
                self.cache.insert(path.to_string(), text);
                signal.complete();
            }
            Err(e) => signal.fail(e),
        }
    }

    fn release(&mut self, path: &str) {
        if self.cache.remove(path).is_some() {
            log::debug!("evicted text data '{path}'");
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A lane that reads files into a raw byte cache.
#[derive(Default)]
pub struct BinaryCacheLane {
    cache: AHashMap<String, Vec<u8>>,
}

impl BinaryCacheLane {
    /// Creates a lane with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached bytes for `path`, if it was preloaded.
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.cache.get(path).map(Vec::as_slice)
    }

    /// Checks whether `path` is present in the cache.
    pub fn contains(&self, path: &str) -> bool {
        self.cache.contains_key(path)
    }
}

impl ResourceLane for BinaryCacheLane {
    fn strategy_name(&self) -> &'static str {
        "BinaryCache"
    }

    fn start_load(&mut self, descriptor: &ResourceDescriptor, signal: CompletionSignal) {
        let path = descriptor.source();
        if self.cache.contains_key(path) {
            signal.complete();
            return;
        }
        match std::fs::read(path).with_context(|| format!("Failed to read binary file '{path}'")) {
            Ok(bytes) => {
                self.cache.insert(path.to_string(), bytes);
                signal.complete();
            }
            Err(e) => signal.fail(e),
        }
    }

    fn release(&mut self, path: &str) {
        if self.cache.remove(path).is_some() {
            log::debug!("evicted binary data '{path}'");
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
    use phora_core::signal::BatchId;

    #[test]
    fn text_and_binary_round_through_their_caches() {
        let dir = tempfile::tempdir().unwrap();
        let text_path = dir.path().join("config.json");
        let bin_path = dir.path().join("scene.ccbi");
        std::fs::write(&text_path, "{\"volume\": 0.8}").unwrap();
        std::fs::write(&bin_path, [0xCA, 0xFE]).unwrap();
        let text_path = text_path.to_str().unwrap().to_string();
        let bin_path = bin_path.to_str().unwrap().to_string();

        let (tx, rx) = crossbeam_channel::unbounded();

        let mut text_lane = TextCacheLane::new();
        text_lane.start_load(
            &ResourceDescriptor::Path(text_path.clone()),
            CompletionSignal::new(BatchId::from_raw(0), &text_path, tx.clone()),
        );
        assert!(rx.try_recv().unwrap().result.is_ok());
        assert_eq!(text_lane.get(&text_path), Some("{\"volume\": 0.8}"));

        let mut bin_lane = BinaryCacheLane::new();
        bin_lane.start_load(
            &ResourceDescriptor::Path(bin_path.clone()),
            CompletionSignal::new(BatchId::from_raw(0), &bin_path, tx),
        );
        assert!(rx.try_recv().unwrap().result.is_ok());
        assert_eq!(bin_lane.get(&bin_path), Some(&[0xCA, 0xFE][..]));

        text_lane.release(&text_path);
        bin_lane.release(&bin_path);
        assert!(!text_lane.contains(&text_path));
        assert!(!bin_lane.contains(&bin_path));
    }

    #[test]
    fn missing_file_fails_through_the_signal() {
        let mut lane = TextCacheLane::new();
        let (tx, rx) = crossbeam_channel::unbounded();
        lane.start_load(
            &ResourceDescriptor::Path("no/such/file.txt".to_string()),
            CompletionSignal::new(BatchId::from_raw(0), "no/such/file.txt", tx),
        );
        assert!(rx.try_recv().unwrap().result.is_err());
    }
}

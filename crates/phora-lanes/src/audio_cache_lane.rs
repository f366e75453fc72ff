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

//! Audio preloading into a CPU-side clip cache.
//!
//! `.wav` files are decoded to PCM eagerly; other containers (mp3, ogg, ...)
//! are cached as raw bytes for the host's own decoder. This lane is the
//! optional one: a host without an audio subsystem simply never registers it,
//! and the first Sound descriptor fails dispatch with a fatal error.

use ahash::AHashMap;
use anyhow::{anyhow, Context, Result};
use phora_core::lane::ResourceLane;
use phora_core::resource::ResourceDescriptor;
use phora_core::signal::CompletionSignal;
use std::any::Any;
use std::io::Cursor;

/// Interleaved PCM samples decoded from a `.wav` file.
#[derive(Debug, Clone)]
pub struct PcmClip {
    /// Interleaved samples normalized to `[-1.0, 1.0]`.
    pub samples: Vec<f32>,
    /// Number of channels (e.g. 2 for stereo).
    pub channels: u16,
    /// Samples per second per channel.
    pub sample_rate: u32,
}

/// A cached audio clip: decoded PCM, or the raw container bytes.
#[derive(Debug, Clone)]
pub enum AudioData {
    /// Decoded, playback-ready PCM.
    Pcm(PcmClip),
    /// Undecoded container bytes (non-wav formats).
    Raw(Vec<u8>),
}

/// A lane that preloads audio files and caches the clips by path.
#[derive(Default)]
pub struct AudioCacheLane {
    cache: AHashMap<String, AudioData>,
}

impl AudioCacheLane {
    /// Creates a lane with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached clip for `path`, if it was preloaded.
    pub fn get(&self, path: &str) -> Option<&AudioData> {
        self.cache.get(path)
    }

    /// Checks whether `path` is present in the cache.
    pub fn contains(&self, path: &str) -> bool {
        self.cache.contains_key(path)
    }

    fn load_clip(path: &str) -> Result<AudioData> {
        let bytes =
            std::fs::read(path).with_context(|| format!("Failed to read audio file '{path}'"))?;
        if path.ends_with(".wav") {
            Ok(AudioData::Pcm(Self::decode_wav(&bytes)?))
        } else {
            Ok(AudioData::Raw(bytes))
        }
    }

    fn decode_wav(bytes: &[u8]) -> Result<PcmClip> {
        let cursor = Cursor::new(bytes);
        let mut reader = hound::WavReader::new(cursor)?;

        let spec = reader.spec();

        let samples: Result<Vec<f32>, _> = match spec.sample_format {
            hound::SampleFormat::Float => reader.samples::<f32>().collect(),
            hound::SampleFormat::Int => {
                let max_value = (1 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|sample| sample.map(|s| s as f32 / max_value))
                    .collect()
            }
        };

        let samples = samples.map_err(|e| anyhow!("Failed to parse WAV samples: {}", e))?;

        Ok(PcmClip {
            samples,
            channels: spec.channels,
            sample_rate: spec.sample_rate,
        })
    }
}

impl ResourceLane for AudioCacheLane {
    fn strategy_name(&self) -> &'static str {
        "AudioCache"
    }

    fn start_load(&mut self, descriptor: &ResourceDescriptor, signal: CompletionSignal) {
        let path = descriptor.source();
        if self.cache.contains_key(path) {
            signal.complete();
            return;
        }
        match Self::load_clip(path) {
            Ok(clip) => {
                self.cache.insert(path.to_string(), clip);
                signal.complete();
            }
            Err(e) => signal.fail(e),
        }
    }

    fn release(&mut self, path: &str) {
        if self.cache.remove(path).is_some() {
            log::debug!("evicted audio clip '{path}'");
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

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

//! Scheduler configuration and the per-tick view of the host's frame loop.

use serde::{Deserialize, Serialize};

/// Tuning knobs for the preload scheduler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreloadConfig {
    /// When throttling is enabled and the host's frame rate is known to be
    /// below this floor, a tick performs no work at all. The host's frame
    /// budget takes precedence over background loading.
    pub min_frame_rate: f32,
}

impl Default for PreloadConfig {
    fn default() -> Self {
        Self {
            min_frame_rate: 20.0,
        }
    }
}

/// What the scheduler is told about the host's drive rate on each tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickContext {
    /// The host's current frame rate, if it tracks one. `None` never
    /// throttles: an unknown rate is not a slow rate.
    pub frames_per_second: Option<f32>,
}

impl TickContext {
    /// A context reporting a known frame rate.
    pub fn at_rate(frames_per_second: f32) -> Self {
        Self {
            frames_per_second: Some(frames_per_second),
        }
    }
}

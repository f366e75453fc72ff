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

//! # Phora Lanes
//!
//! Default implementations of the [`ResourceLane`](phora_core::lane::ResourceLane)
//! contract, one per resource kind. Each lane is a thin adapter over an
//! in-memory cache keyed by the descriptor's source: it reads (and, where it
//! makes sense, decodes) the file, stores the result, and consumes its
//! completion signal. All lanes here complete synchronously inside
//! `start_load`; the scheduler does not rely on that.

pub mod audio_cache_lane;
pub mod file_data_lane;
pub mod font_face_lane;
pub mod markup_cache_lane;
pub mod texture_cache_lane;

pub use audio_cache_lane::{AudioCacheLane, AudioData, PcmClip};
pub use file_data_lane::{BinaryCacheLane, TextCacheLane};
pub use font_face_lane::FontFaceLane;
pub use markup_cache_lane::MarkupCacheLane;
pub use texture_cache_lane::{CpuImage, TextureCacheLane};

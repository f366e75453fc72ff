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

//! The preload agent: tactical logic for incremental, non-blocking loading.
//!
//! This module is the public-facing API for requesting resource preloads and
//! querying their progress. It delegates the actual loading work to the
//! lanes; its own job is sequencing: one dispatch per tick, batches strictly
//! in submission order, completion detected from the lanes' asynchronous
//! signals.

pub mod agent;
pub mod batch;
pub mod registry;

pub use agent::{PreloadAgent, PreloadAgentStatus};
pub use batch::PreloadBatch;
pub use registry::ResourceLaneRegistry;

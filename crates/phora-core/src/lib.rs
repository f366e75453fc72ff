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

//! # Phora Core
//!
//! Foundational crate containing traits, core types, and interface contracts
//! that define the preloader's architecture.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod lane;
pub mod resource;
pub mod signal;

pub use config::{PreloadConfig, TickContext};
pub use error::PreloadError;
pub use lane::ResourceLane;
pub use resource::{ExtensionTable, FontFace, FontSource, ResourceDescriptor, ResourceKind};
pub use signal::{BatchId, CompletionSignal, LoadOutcome};

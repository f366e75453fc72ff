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

//! Defines the fatal error types of the preloading subsystem.
//!
//! Only conditions the scheduler cannot recover from locally live here:
//! a descriptor whose kind is unknown, or a recognized kind whose lane was
//! never installed. Per-resource load failures are deliberately absent:
//! they travel through [`LoadOutcome`](crate::signal::LoadOutcome), are
//! logged, and never abort a batch.

use crate::resource::ResourceKind;
use std::fmt;

/// A fatal condition raised synchronously from dispatch or release.
///
/// These are never caught internally; the host decides whether to halt or
/// recover (typically by registering the missing lane or extension).
#[derive(Debug)]
pub enum PreloadError {
    /// The classifier found no table entry for the descriptor's extension,
    /// and no lane is registered for the resulting raw kind.
    UnknownKind {
        /// The descriptor's source key.
        path: String,
        /// The unrecognized extension, verbatim.
        extension: String,
    },
    /// The kind is recognized but no lane was ever installed for it
    /// (e.g. a host without an audio subsystem).
    LaneUnavailable {
        /// The recognized kind with no lane.
        kind: ResourceKind,
        /// The descriptor's source key.
        path: String,
    },
}

impl fmt::Display for PreloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreloadError::UnknownKind { path, extension } => {
                write!(f, "Unknown filename extension '{extension}' for '{path}'")
            }
            PreloadError::LaneUnavailable { kind, path } => {
                write!(
                    f,
                    "No {kind} lane installed; register one before using '{path}'"
                )
            }
        }
    }
}

impl std::error::Error for PreloadError {}

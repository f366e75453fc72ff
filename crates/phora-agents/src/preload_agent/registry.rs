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

//! A registry mapping resource kinds to their lanes.
//!
//! Populated at initialization and open to extension: hosts register a lane
//! per kind (including [`ResourceKind::Other`] labels for custom kinds)
//! without the scheduler knowing any kind by name.

use phora_core::error::PreloadError;
use phora_core::lane::ResourceLane;
use phora_core::resource::ResourceKind;
use std::collections::HashMap;

/// Maps each [`ResourceKind`] to the lane that loads and releases it.
#[derive(Default)]
pub struct ResourceLaneRegistry {
    lanes: HashMap<ResourceKind, Box<dyn ResourceLane>>,
}

impl ResourceLaneRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a lane for a kind, replacing any previous lane.
    pub fn register(&mut self, kind: ResourceKind, lane: Box<dyn ResourceLane>) {
        log::debug!("registered {} lane for {kind} resources", lane.strategy_name());
        self.lanes.insert(kind, lane);
    }

    /// Resolves the lane for a kind.
    ///
    /// Failures are the fatal taxonomy: an unregistered [`ResourceKind::Other`]
    /// is an unknown extension; an unregistered named kind is an uninstalled
    /// lane. `path` only contextualizes the error.
    pub fn get_mut(
        &mut self,
        kind: &ResourceKind,
        path: &str,
    ) -> Result<&mut Box<dyn ResourceLane>, PreloadError> {
        self.lanes.get_mut(kind).ok_or_else(|| match kind {
            ResourceKind::Other(extension) => PreloadError::UnknownKind {
                path: path.to_string(),
                extension: extension.clone(),
            },
            _ => PreloadError::LaneUnavailable {
                kind: kind.clone(),
                path: path.to_string(),
            },
        })
    }

    /// Shared access to the lane registered for `kind`, e.g. to reach its
    /// cache through [`ResourceLane::as_any`].
    pub fn get(&self, kind: &ResourceKind) -> Option<&dyn ResourceLane> {
        self.lanes.get(kind).map(|lane| &**lane)
    }

    /// Number of registered lanes.
    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    /// Returns `true` if no lanes are registered.
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }
}

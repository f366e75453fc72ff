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

//! One preload request: its work-list and progress counters.

use phora_core::resource::ResourceDescriptor;
use phora_core::signal::BatchId;
use std::collections::VecDeque;

/// An ordered work-list of descriptors plus progress counters.
///
/// `total` is fixed at creation; `dispatched` and `loaded` are monotonic and
/// never exceed it. `loaded` advances only when a completion signal carrying
/// this batch's id is drained, `dispatched` only when the agent hands a
/// descriptor to a lane. The completion callback is `take()`n, so it can
/// fire at most once; the batch is discarded right after.
pub struct PreloadBatch {
    id: BatchId,
    pending: VecDeque<ResourceDescriptor>,
    total: usize,
    dispatched: usize,
    loaded: usize,
    on_complete: Option<Box<dyn FnOnce() + Send>>,
}

impl PreloadBatch {
    pub(crate) fn new(
        id: BatchId,
        descriptors: Vec<ResourceDescriptor>,
        on_complete: Box<dyn FnOnce() + Send>,
    ) -> Self {
        let total = descriptors.len();
        Self {
            id,
            pending: descriptors.into(),
            total,
            dispatched: 0,
            loaded: 0,
            on_complete: Some(on_complete),
        }
    }

    /// This batch's identity, as carried by its completion signals.
    pub fn id(&self) -> BatchId {
        self.id
    }

    /// Number of descriptors the batch was created with.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of descriptors handed to a lane so far.
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    /// Number of completion signals drained so far (failures included).
    pub fn loaded(&self) -> usize {
        self.loaded
    }

    /// Progress as an integer percentage: `100` for an empty batch,
    /// `floor(loaded / total * 100)` otherwise.
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            100
        } else {
            (self.loaded * 100 / self.total) as u32
        }
    }

    /// The next descriptor to dispatch, in original submission order.
    pub(crate) fn front(&self) -> Option<&ResourceDescriptor> {
        self.pending.front()
    }

    /// Removes and returns the front descriptor and counts it dispatched.
    pub(crate) fn take_front(&mut self) -> Option<ResourceDescriptor> {
        let descriptor = self.pending.pop_front()?;
        self.dispatched += 1;
        Some(descriptor)
    }

    /// Whether any descriptor still awaits dispatch.
    pub(crate) fn has_undispatched(&self) -> bool {
        self.dispatched < self.total
    }

    /// Counts one drained completion signal.
    pub(crate) fn mark_loaded(&mut self) {
        debug_assert!(self.loaded < self.total, "more signals than dispatches");
        self.loaded += 1;
    }

    /// Takes the completion callback; subsequent calls return `None`.
    pub(crate) fn take_on_complete(&mut self) -> Option<Box<dyn FnOnce() + Send>> {
        self.on_complete.take()
    }
}

impl std::fmt::Debug for PreloadBatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreloadBatch")
            .field("id", &self.id)
            .field("total", &self.total)
            .field("dispatched", &self.dispatched)
            .field("loaded", &self.loaded)
            .finish()
    }
}

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

//! # Lane Abstraction
//!
//! The capability contract every loading backend implements.
//!
//! A **Lane** owns the loading and eviction of one resource kind: a texture
//! cache, an audio decoder, a file-data cache. The scheduler routes each
//! dispatched descriptor to the lane registered for its kind and never looks
//! inside; lanes report back exclusively through the
//! [`CompletionSignal`](crate::signal::CompletionSignal) they are handed.
//!
//! Lanes may complete synchronously inside `start_load` or asynchronously
//! from another thread; the scheduler tolerates both. What a lane must never
//! do is drop the signal without consuming it: a descriptor that never
//! signals stalls its batch, and everything queued behind it, forever.

use crate::resource::ResourceDescriptor;
use crate::signal::CompletionSignal;
use std::any::Any;

/// A loading backend for one resource kind.
pub trait ResourceLane: Send {
    /// Human-readable name identifying this lane, for logging and debugging.
    fn strategy_name(&self) -> &'static str;

    /// Begins loading one resource.
    ///
    /// The lane must eventually consume `signal` via
    /// [`complete`](CompletionSignal::complete) or
    /// [`fail`](CompletionSignal::fail), within this call for a synchronous
    /// lane or from any later point for an asynchronous one. Failures are
    /// reported through the signal, never by panicking or by silently
    /// dropping it.
    fn start_load(&mut self, descriptor: &ResourceDescriptor, signal: CompletionSignal);

    /// Synchronously evicts a previously loaded resource by its source key.
    ///
    /// Best-effort: releasing a key that was never loaded is a no-op. This
    /// must not interact with in-flight loads; it neither cancels nor waits
    /// for anything currently loading.
    fn release(&mut self, path: &str);

    /// Downcast to the concrete lane type, e.g. to reach its cache.
    fn as_any(&self) -> &dyn Any;

    /// Downcast to the concrete lane type (mutable).
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

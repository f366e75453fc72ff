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

//! The tick-driven preload scheduler.
//!
//! The `PreloadAgent` owns no thread and no timer: it advances only when the
//! host's frame loop calls [`tick`](PreloadAgent::tick). Each tick dispatches
//! at most one descriptor of the active batch to its lane, drains the
//! completion signals that have arrived since the last tick, and fires the
//! batch's callback once every descriptor has signaled. Batches queue FIFO;
//! no two batches ever load concurrently, and no descriptor is dispatched
//! out of submission order.

use super::batch::PreloadBatch;
use super::registry::ResourceLaneRegistry;
use crossbeam_channel::{Receiver, Sender};
use phora_core::config::{PreloadConfig, TickContext};
use phora_core::error::PreloadError;
use phora_core::lane::ResourceLane;
use phora_core::resource::{ExtensionTable, ResourceDescriptor, ResourceKind};
use phora_core::signal::{BatchId, CompletionSignal, LoadOutcome};
use std::collections::VecDeque;

/// The incremental, non-blocking preload scheduler.
///
/// There is no hidden shared instance: the host creates one agent, keeps it
/// wherever it keeps its other subsystems, and drives it from its own loop.
/// While [`is_running`](PreloadAgent::is_running) is `false` the agent has no
/// work and ticking it is a no-op, so a host may skip it entirely.
pub struct PreloadAgent {
    config: PreloadConfig,
    classifier: ExtensionTable,
    lanes: ResourceLaneRegistry,
    active: Option<PreloadBatch>,
    queue: VecDeque<PreloadBatch>,
    running: bool,
    throttled: bool,
    outcome_tx: Sender<LoadOutcome>,
    outcome_rx: Receiver<LoadOutcome>,
    next_batch: u64,
    last_percentage: u32,
    loaded_total: u64,
    failed_total: u64,
}

/// A snapshot of the agent's state, for host-side monitoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreloadAgentStatus {
    /// Whether a batch is active.
    pub running: bool,
    /// Whether throttling is enabled.
    pub throttled: bool,
    /// Progress of the active batch (stale while idle).
    pub percentage: u32,
    /// Batches waiting behind the active one.
    pub queued_batches: usize,
    /// Completion signals drained over the agent's lifetime.
    pub loaded_total: u64,
    /// How many of those signals reported a failure.
    pub failed_total: u64,
}

impl PreloadAgent {
    /// Creates an idle agent with the default extension table and an empty
    /// lane registry.
    pub fn new(config: PreloadConfig) -> Self {
        let (outcome_tx, outcome_rx) = crossbeam_channel::unbounded();
        Self {
            config,
            classifier: ExtensionTable::default(),
            lanes: ResourceLaneRegistry::new(),
            active: None,
            queue: VecDeque::new(),
            running: false,
            throttled: false,
            outcome_tx,
            outcome_rx,
            next_batch: 0,
            last_percentage: 0,
            loaded_total: 0,
            failed_total: 0,
        }
    }

    /// Registers a lane for a kind, replacing any previous lane.
    pub fn register_lane(&mut self, kind: ResourceKind, lane: impl ResourceLane + 'static) {
        self.lanes.register(kind, Box::new(lane));
    }

    /// Associates a file extension with a kind in the classifier table.
    pub fn register_extension(&mut self, kind: ResourceKind, extension: impl Into<String>) {
        self.classifier.register(kind, extension);
    }

    /// Shared access to the lane registered for `kind`, e.g. to reach its
    /// cache through [`ResourceLane::as_any`].
    pub fn lane(&self, kind: &ResourceKind) -> Option<&dyn ResourceLane> {
        self.lanes.get(kind)
    }

    /// Enqueues a batch of descriptors.
    ///
    /// The batch owns the descriptor list it is given; nothing the caller
    /// does afterwards can affect in-flight state. If the agent is idle the
    /// batch becomes active immediately, but its first dispatch still waits
    /// for the next [`tick`](PreloadAgent::tick). Otherwise it waits behind
    /// every previously queued batch.
    ///
    /// `on_complete` fires exactly once, on the tick where the last
    /// descriptor's completion signal is drained, failures included, since
    /// a failed resource is counted rather than retried.
    pub fn preload(
        &mut self,
        descriptors: Vec<ResourceDescriptor>,
        on_complete: impl FnOnce() + Send + 'static,
    ) -> BatchId {
        let id = BatchId::from_raw(self.next_batch);
        self.next_batch += 1;
        let batch = PreloadBatch::new(id, descriptors, Box::new(on_complete));
        log::info!("enqueued {} with {} resource(s)", id, batch.total());

        if self.running {
            self.queue.push_back(batch);
        } else {
            self.running = true;
            self.last_percentage = batch.percentage();
            self.active = Some(batch);
        }
        id
    }

    /// Like [`preload`](PreloadAgent::preload), but first enables throttling
    /// for all subsequent work: while the host's frame rate stays below the
    /// configured floor, ticks perform no loading at all.
    pub fn preload_async(
        &mut self,
        descriptors: Vec<ResourceDescriptor>,
        on_complete: impl FnOnce() + Send + 'static,
    ) -> BatchId {
        self.throttled = true;
        self.preload(descriptors, on_complete)
    }

    /// Advances the scheduler by one step.
    ///
    /// Does nothing while idle. When throttled and the context reports a
    /// frame rate below the floor, does nothing either (no dispatch, no
    /// completion check), so a struggling host never spends its frame budget
    /// here. Otherwise: dispatch at most one descriptor, drain completion
    /// signals, and finish the batch if every descriptor has signaled.
    ///
    /// # Errors
    ///
    /// Propagates the fatal taxonomy from the dispatch step. The offending
    /// descriptor stays at the front of the batch and nothing is counted, so
    /// the same error re-raises on every tick until the host registers the
    /// missing lane or extension, after which loading resumes where it
    /// stalled.
    pub fn tick(&mut self, ctx: &TickContext) -> Result<(), PreloadError> {
        if !self.running {
            return Ok(());
        }
        if self.throttled {
            if let Some(fps) = ctx.frames_per_second {
                if fps < self.config.min_frame_rate {
                    log::debug!(
                        "frame rate {fps:.1} below floor {:.1}, skipping preload step",
                        self.config.min_frame_rate
                    );
                    return Ok(());
                }
            }
        }

        self.dispatch_one()?;
        self.drain_outcomes();
        self.finish_if_complete();
        Ok(())
    }

    /// Progress of the active batch as an integer percentage. While idle
    /// this holds the last computed value, which is stale by definition;
    /// hosts should consult it only while [`is_running`](PreloadAgent::is_running).
    pub fn percentage(&self) -> u32 {
        match &self.active {
            Some(active) => active.percentage(),
            None => self.last_percentage,
        }
    }

    /// Whether a batch is active.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether throttling has been enabled.
    pub fn is_throttled(&self) -> bool {
        self.throttled
    }

    /// Synchronously releases previously loaded resources.
    ///
    /// Each descriptor is classified and its lane's eviction called with the
    /// descriptor's source key. This never touches in-flight loads: it
    /// neither cancels nor waits for anything currently loading.
    ///
    /// # Errors
    ///
    /// Fail-fast: the first descriptor whose kind has no lane aborts the
    /// call. Releases already performed stand; the remainder of the list is
    /// untouched.
    pub fn purge_cached_data(
        &mut self,
        descriptors: &[ResourceDescriptor],
    ) -> Result<(), PreloadError> {
        for descriptor in descriptors {
            let kind = self.classifier.classify(descriptor);
            let lane = self.lanes.get_mut(&kind, descriptor.source())?;
            log::debug!(
                "releasing '{}' via {} lane",
                descriptor.source(),
                lane.strategy_name()
            );
            lane.release(descriptor.source());
        }
        Ok(())
    }

    /// Reports the current status of the agent.
    pub fn report_status(&self) -> PreloadAgentStatus {
        PreloadAgentStatus {
            running: self.running,
            throttled: self.throttled,
            percentage: self.percentage(),
            queued_batches: self.queue.len(),
            loaded_total: self.loaded_total,
            failed_total: self.failed_total,
        }
    }

    /// Dispatches the front descriptor of the active batch, if any remains.
    ///
    /// Lane resolution happens before the descriptor is consumed: on failure
    /// the batch is left exactly as it was.
    fn dispatch_one(&mut self) -> Result<(), PreloadError> {
        let Some(active) = self.active.as_mut() else {
            return Ok(());
        };
        if !active.has_undispatched() {
            return Ok(());
        }

        let front = active.front().expect("undispatched descriptors remain");
        let kind = self.classifier.classify(front);
        let lane = self.lanes.get_mut(&kind, front.source())?;

        let descriptor = active.take_front().expect("front exists");
        let signal =
            CompletionSignal::new(active.id(), descriptor.source(), self.outcome_tx.clone());
        log::debug!(
            "dispatching '{}' to {} lane ({}/{})",
            descriptor.source(),
            lane.strategy_name(),
            active.dispatched(),
            active.total()
        );
        lane.start_load(&descriptor, signal);
        Ok(())
    }

    /// Applies every completion signal that has arrived since the last tick.
    ///
    /// Signals are bound to a batch id; anything from an already-completed
    /// batch is dropped rather than corrupting the active batch's count.
    fn drain_outcomes(&mut self) {
        let outcomes: Vec<LoadOutcome> = self.outcome_rx.try_iter().collect();
        for outcome in outcomes {
            match self.active.as_mut() {
                Some(active) if outcome.batch == active.id() => {
                    if let Err(e) = &outcome.result {
                        self.failed_total += 1;
                        log::error!("Failed loading resource '{}': {e}", outcome.source);
                    }
                    active.mark_loaded();
                    self.loaded_total += 1;
                }
                _ => log::debug!(
                    "dropping completion signal for retired {} ('{}')",
                    outcome.batch,
                    outcome.source
                ),
            }
        }
    }

    /// Completes the active batch once every descriptor has signaled, then
    /// activates the next queued batch or goes idle.
    fn finish_if_complete(&mut self) {
        let percentage = match self.active.as_ref() {
            Some(active) => active.percentage(),
            None => return,
        };
        self.last_percentage = percentage;
        if percentage < 100 {
            return;
        }

        let mut batch = self.active.take().expect("active batch present");
        log::info!("{} complete ({} resources)", batch.id(), batch.total());
        if let Some(on_complete) = batch.take_on_complete() {
            on_complete();
        }

        match self.queue.pop_front() {
            Some(next) => {
                log::debug!("activating queued {}", next.id());
                self.last_percentage = next.percentage();
                self.active = Some(next);
            }
            None => {
                self.running = false;
                log::debug!("preload queue drained; agent idle");
            }
        }
    }
}

impl Default for PreloadAgent {
    fn default() -> Self {
        Self::new(PreloadConfig::default())
    }
}

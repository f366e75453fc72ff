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

//! The completion signal: how lanes report a finished load back to the agent.
//!
//! A [`CompletionSignal`] is minted by the scheduler when it dispatches one
//! descriptor and handed to the lane's `start_load`. The lane consumes it by
//! calling [`complete`](CompletionSignal::complete) or
//! [`fail`](CompletionSignal::fail), synchronously within the call or from
//! any later point including another thread. Consuming the token by value makes "at
//! most one signal per dispatched descriptor" a type-level guarantee.

use std::error::Error;

/// Identifies one preload batch for the lifetime of the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BatchId(u64);

impl BatchId {
    /// Wraps a raw batch counter value.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw counter value.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for BatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "batch#{}", self.0)
    }
}

/// The result of one descriptor's load, as delivered over the agent's
/// outcome channel.
#[derive(Debug)]
pub struct LoadOutcome {
    /// The batch the dispatched descriptor belonged to.
    pub batch: BatchId,
    /// The descriptor's source key, for logging.
    pub source: String,
    /// `Ok` on success; the lane's error otherwise. Errors are logged and
    /// counted, never retried or propagated.
    pub result: Result<(), Box<dyn Error + Send + Sync>>,
}

/// A single-use token bound to one dispatched descriptor of one batch.
pub struct CompletionSignal {
    batch: BatchId,
    source: String,
    sender: crossbeam_channel::Sender<LoadOutcome>,
}

impl CompletionSignal {
    /// Creates a signal bound to `batch` for the descriptor keyed by
    /// `source`, delivering into the scheduler's outcome channel.
    pub fn new(
        batch: BatchId,
        source: impl Into<String>,
        sender: crossbeam_channel::Sender<LoadOutcome>,
    ) -> Self {
        Self {
            batch,
            source: source.into(),
            sender,
        }
    }

    /// The batch this signal is bound to.
    pub fn batch(&self) -> BatchId {
        self.batch
    }

    /// The source key of the descriptor this signal is bound to.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Reports a successful load.
    pub fn complete(self) {
        self.send(Ok(()));
    }

    /// Reports a failed load. The batch still advances; the error is logged
    /// by the scheduler when it drains the channel.
    pub fn fail(self, error: impl Into<Box<dyn Error + Send + Sync>>) {
        self.send(Err(error.into()));
    }

    fn send(self, result: Result<(), Box<dyn Error + Send + Sync>>) {
        let outcome = LoadOutcome {
            batch: self.batch,
            source: self.source,
            result,
        };
        if let Err(e) = self.sender.send(outcome) {
            log::error!("Failed to deliver completion signal: {e}. Receiver likely disconnected.");
        }
    }
}

impl std::fmt::Debug for CompletionSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionSignal")
            .field("batch", &self.batch)
            .field("source", &self.source)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_delivers_ok_outcome() {
        let (tx, rx) = crossbeam_channel::unbounded();
        CompletionSignal::new(BatchId::from_raw(7), "res/a.png", tx).complete();

        let outcome = rx.try_recv().expect("outcome should be queued");
        assert_eq!(outcome.batch, BatchId::from_raw(7));
        assert_eq!(outcome.source, "res/a.png");
        assert!(outcome.result.is_ok());
    }

    #[test]
    fn fail_delivers_the_error() {
        let (tx, rx) = crossbeam_channel::unbounded();
        CompletionSignal::new(BatchId::from_raw(1), "res/b.mp3", tx).fail("decoder unavailable");

        let outcome = rx.try_recv().expect("outcome should be queued");
        let err = outcome.result.expect_err("outcome should carry the error");
        assert_eq!(err.to_string(), "decoder unavailable");
    }
}

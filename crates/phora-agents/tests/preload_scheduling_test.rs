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

use phora_agents::PreloadAgent;
use phora_core::config::TickContext;
use phora_core::error::PreloadError;
use phora_core::lane::ResourceLane;
use phora_core::resource::{ResourceDescriptor, ResourceKind};
use phora_core::signal::CompletionSignal;
use std::any::Any;
use std::sync::{Arc, Mutex};

// --- Test Setup: scripted lanes observing the agent from outside ---

type EventLog = Arc<Mutex<Vec<String>>>;

fn log_event(events: &EventLog, event: impl Into<String>) {
    events.lock().unwrap().push(event.into());
}

fn logged(events: &EventLog) -> Vec<String> {
    events.lock().unwrap().clone()
}

/// Completes synchronously inside `start_load` and records every call.
struct RecordingLane {
    events: EventLog,
}

impl ResourceLane for RecordingLane {
    fn strategy_name(&self) -> &'static str {
        "Recording"
    }

    fn start_load(&mut self, descriptor: &ResourceDescriptor, signal: CompletionSignal) {
        log_event(&self.events, format!("dispatch {}", descriptor.source()));
        signal.complete();
    }

    fn release(&mut self, path: &str) {
        log_event(&self.events, format!("release {path}"));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Parks every signal for the test body to complete later, simulating a
/// genuinely asynchronous backend.
struct DeferredLane {
    events: EventLog,
    parked: Arc<Mutex<Vec<CompletionSignal>>>,
}

impl ResourceLane for DeferredLane {
    fn strategy_name(&self) -> &'static str {
        "Deferred"
    }

    fn start_load(&mut self, descriptor: &ResourceDescriptor, signal: CompletionSignal) {
        log_event(&self.events, format!("dispatch {}", descriptor.source()));
        self.parked.lock().unwrap().push(signal);
    }

    fn release(&mut self, _path: &str) {}

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Fails every load through the signal.
struct FailingLane;

impl ResourceLane for FailingLane {
    fn strategy_name(&self) -> &'static str {
        "Failing"
    }

    fn start_load(&mut self, _descriptor: &ResourceDescriptor, signal: CompletionSignal) {
        signal.fail("synthetic decode failure");
    }

    fn release(&mut self, _path: &str) {}

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn descriptors(paths: &[&str]) -> Vec<ResourceDescriptor> {
    paths.iter().map(|p| ResourceDescriptor::from(*p)).collect()
}

// ---

#[test]
fn percentage_climbs_by_whole_resources_and_completes_once() {
    let events: EventLog = Default::default();
    let mut agent = PreloadAgent::default();
    agent.register_lane(
        ResourceKind::Image,
        RecordingLane {
            events: events.clone(),
        },
    );
    agent.register_lane(
        ResourceKind::Sound,
        RecordingLane {
            events: events.clone(),
        },
    );

    let completions = Arc::new(Mutex::new(0u32));
    let seen = completions.clone();
    agent.preload(descriptors(&["a.png", "b.mp3"]), move || {
        *seen.lock().unwrap() += 1;
    });

    assert_eq!(agent.percentage(), 0);
    agent.tick(&TickContext::default()).unwrap();
    assert_eq!(agent.percentage(), 50);
    agent.tick(&TickContext::default()).unwrap();
    assert_eq!(agent.percentage(), 100);
    assert_eq!(*completions.lock().unwrap(), 1);
    assert!(!agent.is_running());

    // Ticking an idle agent is a no-op; the callback never refires.
    agent.tick(&TickContext::default()).unwrap();
    assert_eq!(*completions.lock().unwrap(), 1);
    assert_eq!(
        logged(&events),
        vec!["dispatch a.png", "dispatch b.mp3"],
        "dispatch order must equal submission order"
    );
}

#[test]
fn one_dispatch_per_tick_and_out_of_order_completion() {
    let events: EventLog = Default::default();
    let parked = Arc::new(Mutex::new(Vec::new()));
    let mut agent = PreloadAgent::default();
    agent.register_lane(
        ResourceKind::Image,
        DeferredLane {
            events: events.clone(),
            parked: parked.clone(),
        },
    );

    let completions = Arc::new(Mutex::new(0u32));
    let seen = completions.clone();
    agent.preload(descriptors(&["a.png", "b.png", "c.png"]), move || {
        *seen.lock().unwrap() += 1;
    });

    // One dispatch per tick, in submission order, nothing completed yet.
    for expected in 1..=3 {
        agent.tick(&TickContext::default()).unwrap();
        assert_eq!(logged(&events).len(), expected);
        assert_eq!(agent.percentage(), 0);
    }
    assert_eq!(
        logged(&events),
        vec!["dispatch a.png", "dispatch b.png", "dispatch c.png"]
    );
    // A fourth tick has nothing left to dispatch.
    agent.tick(&TickContext::default()).unwrap();
    assert_eq!(logged(&events).len(), 3);

    // Complete the parked signals newest-first; the batch only cares that
    // every descriptor signals, not in which order.
    let mut signals: Vec<_> = parked.lock().unwrap().drain(..).collect();
    let mut percentages = vec![agent.percentage()];
    while let Some(signal) = signals.pop() {
        signal.complete();
        agent.tick(&TickContext::default()).unwrap();
        percentages.push(agent.percentage());
    }
    assert_eq!(percentages, vec![0, 33, 66, 100]);
    assert_eq!(*completions.lock().unwrap(), 1);
    assert!(!agent.is_running());
}

#[test]
fn empty_batch_completes_on_its_first_tick_without_dispatch() {
    let mut agent = PreloadAgent::default();
    let completions = Arc::new(Mutex::new(0u32));
    let seen = completions.clone();
    agent.preload(Vec::new(), move || {
        *seen.lock().unwrap() += 1;
    });

    assert!(agent.is_running());
    assert_eq!(agent.percentage(), 100);

    agent.tick(&TickContext::default()).unwrap();
    assert_eq!(*completions.lock().unwrap(), 1);
    assert!(!agent.is_running());
}

#[test]
fn queued_batches_run_strictly_after_their_predecessors() {
    let events: EventLog = Default::default();
    let mut agent = PreloadAgent::default();
    agent.register_lane(
        ResourceKind::Image,
        RecordingLane {
            events: events.clone(),
        },
    );

    let log_a = events.clone();
    agent.preload(descriptors(&["a.png"]), move || {
        log_event(&log_a, "complete A");
    });
    let log_b = events.clone();
    agent.preload(descriptors(&["b.png"]), move || {
        log_event(&log_b, "complete B");
    });

    while agent.is_running() {
        agent.tick(&TickContext::default()).unwrap();
    }

    assert_eq!(
        logged(&events),
        vec![
            "dispatch a.png",
            "complete A",
            "dispatch b.png",
            "complete B"
        ],
        "B must not dispatch before A's completion callback has fired"
    );
}

#[test]
fn per_resource_failure_never_blocks_the_batch() {
    let events: EventLog = Default::default();
    let mut agent = PreloadAgent::default();
    agent.register_lane(
        ResourceKind::Image,
        RecordingLane {
            events: events.clone(),
        },
    );
    agent.register_lane(ResourceKind::Sound, FailingLane);

    let completions = Arc::new(Mutex::new(0u32));
    let seen = completions.clone();
    agent.preload(descriptors(&["a.png", "b.mp3"]), move || {
        *seen.lock().unwrap() += 1;
    });

    agent.tick(&TickContext::default()).unwrap();
    agent.tick(&TickContext::default()).unwrap();

    // The failure is observable only via the status counters, not through
    // the completion contract.
    assert_eq!(agent.percentage(), 100);
    assert_eq!(*completions.lock().unwrap(), 1);
    let status = agent.report_status();
    assert_eq!(status.loaded_total, 2);
    assert_eq!(status.failed_total, 1);
}

#[test]
fn throttled_agent_does_no_work_below_the_frame_rate_floor() {
    let events: EventLog = Default::default();
    let mut agent = PreloadAgent::default();
    agent.register_lane(
        ResourceKind::Image,
        RecordingLane {
            events: events.clone(),
        },
    );

    let completions = Arc::new(Mutex::new(0u32));
    let seen = completions.clone();
    agent.preload_async(descriptors(&["a.png"]), move || {
        *seen.lock().unwrap() += 1;
    });
    assert!(agent.is_throttled());

    for _ in 0..5 {
        agent.tick(&TickContext::at_rate(10.0)).unwrap();
        assert!(logged(&events).is_empty());
        assert_eq!(agent.percentage(), 0);
        assert!(agent.is_running());
    }

    // An unknown rate never throttles: progress resumes immediately.
    agent.tick(&TickContext::default()).unwrap();
    assert_eq!(agent.percentage(), 100);
    assert_eq!(*completions.lock().unwrap(), 1);
}

#[test]
fn unknown_extension_halts_dispatch_until_the_host_recovers() {
    let events: EventLog = Default::default();
    let mut agent = PreloadAgent::default();

    let completions = Arc::new(Mutex::new(0u32));
    let seen = completions.clone();
    agent.preload(descriptors(&["notes.doc"]), move || {
        *seen.lock().unwrap() += 1;
    });

    // The same fatal error re-raises every tick; nothing is consumed.
    for _ in 0..2 {
        let err = agent.tick(&TickContext::default()).unwrap_err();
        assert!(matches!(err, PreloadError::UnknownKind { .. }), "{err}");
        assert_eq!(agent.percentage(), 0);
    }

    // Teaching the classifier and installing a lane resumes the batch.
    let kind = ResourceKind::Other("document".to_string());
    agent.register_extension(kind.clone(), "doc");
    agent.register_lane(
        kind,
        RecordingLane {
            events: events.clone(),
        },
    );
    agent.tick(&TickContext::default()).unwrap();
    assert_eq!(logged(&events), vec!["dispatch notes.doc"]);
    assert_eq!(*completions.lock().unwrap(), 1);
}

#[test]
fn recognized_kind_without_a_lane_is_fatal() {
    let mut agent = PreloadAgent::default();
    agent.preload(descriptors(&["boom.mp3"]), || {});

    let err = agent.tick(&TickContext::default()).unwrap_err();
    match err {
        PreloadError::LaneUnavailable { kind, path } => {
            assert_eq!(kind, ResourceKind::Sound);
            assert_eq!(path, "boom.mp3");
        }
        other => panic!("expected LaneUnavailable, got {other}"),
    }
}

//! Observers receive every state a [`Machine`](crate::Machine) passes
//! through. The reducer itself performs no I/O; tracing lives here.

use crate::machine::State;
use pvm_types::{Environment, Node};
use serde::{Serialize, Serializer};
use std::io::{self, Write};

/// Receives machine states between steps.
pub trait Observer {
    fn observe(&mut self, state: &State<'_>);
}

impl<F> Observer for F
where
    F: FnMut(&State<'_>),
{
    fn observe(&mut self, state: &State<'_>) {
        (self)(state)
    }
}

// ── PrintObserver ────────────────────────────────────────────────────────────

/// Writes one trace line per state: `[<step>]: <node>[, <environment>]`.
pub struct PrintObserver<W: Write> {
    out: W,
}

impl PrintObserver<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> PrintObserver<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Observer for PrintObserver<W> {
    fn observe(&mut self, state: &State<'_>) {
        if let Err(err) = writeln!(self.out, "{state}") {
            log::warn!(target: "pvm::trace", "failed to write trace line: {err}");
        }
    }
}

// ── LogObserver ──────────────────────────────────────────────────────────────

/// Sends every state to the `log` facade at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn observe(&mut self, state: &State<'_>) {
        log::debug!(target: "pvm::trace", "{state}");
    }
}

// ── TraceRecorder ────────────────────────────────────────────────────────────

/// An owned copy of one observed state.
///
/// Each snapshot keeps its own environment, so the history of a run can be
/// inspected (or rolled back to) after the fact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub step: u64,
    /// Serialised as its printed form.
    #[serde(serialize_with = "serialize_display")]
    pub node: Node,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,
}

impl From<&State<'_>> for Snapshot {
    fn from(state: &State<'_>) -> Self {
        Self {
            step: state.step,
            node: state.node.clone(),
            environment: state.environment.cloned(),
        }
    }
}

fn serialize_display<S: Serializer>(node: &Node, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(node)
}

/// Records every observed state.
#[derive(Debug, Default, Clone)]
pub struct TraceRecorder {
    snapshots: Vec<Snapshot>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn into_snapshots(self) -> Vec<Snapshot> {
        self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Printed trace lines, one per snapshot.
    pub fn lines(&self) -> Vec<String> {
        self.snapshots
            .iter()
            .map(|s| {
                State {
                    step: s.step,
                    node: &s.node,
                    environment: s.environment.as_ref(),
                }
                .to_string()
            })
            .collect()
    }

    /// The whole trace as a JSON array.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.snapshots)
    }
}

impl Observer for TraceRecorder {
    fn observe(&mut self, state: &State<'_>) {
        self.snapshots.push(Snapshot::from(state));
    }
}

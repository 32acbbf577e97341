//! Snapshot model shared by every tracer.
//!
//! A [`Trace`] is the full, ordered history of one tracer run. Each
//! [`Snapshot`] in it is self-contained: the [`State`] payload is a complete
//! copy of the algorithm's working data, so any position can be rendered
//! without replaying the ones before it.
//!
//! Traces are built through a [`TraceRecorder`], which is append-only and
//! checks the trace invariants when it is finished:
//!
//! - the first snapshot is [`ActionTag::Initialize`]
//! - exactly one terminal tag is recorded, and it is the last snapshot

pub mod recorder;
pub mod state;

pub use recorder::TraceRecorder;
pub use state::*;

use crate::tracers::Family;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Semantic event recorded by a tracer step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionTag {
    Initialize,
    Compare,
    Swap,
    PassComplete,
    NoSwaps,
    ComputeMid,
    Estimate,
    NarrowLeft,
    NarrowRight,
    NarrowMiddle,
    Found,
    NotFound,
    Visit,
    Relax,
    PathFound,
    Unreachable,
    Update,
    Match,
    Backtrack,
    Unmakeable,
    Sort,
    Select,
    Reject,
    PartialTake,
    DescendLeft,
    DescendRight,
    Complete,
}

impl ActionTag {
    /// Whether this tag ends a trace
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ActionTag::Complete
                | ActionTag::Found
                | ActionTag::NotFound
                | ActionTag::PathFound
                | ActionTag::Unreachable
                | ActionTag::Unmakeable
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActionTag::Initialize => "initialize",
            ActionTag::Compare => "compare",
            ActionTag::Swap => "swap",
            ActionTag::PassComplete => "pass-complete",
            ActionTag::NoSwaps => "no-swaps",
            ActionTag::ComputeMid => "compute-mid",
            ActionTag::Estimate => "estimate",
            ActionTag::NarrowLeft => "narrow-left",
            ActionTag::NarrowRight => "narrow-right",
            ActionTag::NarrowMiddle => "narrow-middle",
            ActionTag::Found => "found",
            ActionTag::NotFound => "not-found",
            ActionTag::Visit => "visit",
            ActionTag::Relax => "relax",
            ActionTag::PathFound => "path-found",
            ActionTag::Unreachable => "unreachable",
            ActionTag::Update => "update",
            ActionTag::Match => "match",
            ActionTag::Backtrack => "backtrack",
            ActionTag::Unmakeable => "unmakeable",
            ActionTag::Sort => "sort",
            ActionTag::Select => "select",
            ActionTag::Reject => "reject",
            ActionTag::PartialTake => "partial-take",
            ActionTag::DescendLeft => "descend-left",
            ActionTag::DescendRight => "descend-right",
            ActionTag::Complete => "complete",
        }
    }
}

impl fmt::Display for ActionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Running tallies attached to every snapshot.
///
/// All integer counters and `profit` only ever grow across a trace.
/// `target_distance` only ever shrinks (`None` is infinity).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Counters {
    pub comparisons: u64,
    pub swaps: u64,
    pub relaxations: u64,
    pub cells_filled: u64,
    pub selected: u64,
    pub profit: f64,
    pub target_distance: Option<u64>,
}

/// One recorded instant of an algorithm's execution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub action: ActionTag,
    pub description: String,
    pub state: State,
    pub counters: Counters,
}

/// Immutable sequence of snapshots produced by one tracer run.
///
/// Cloning is cheap; every clone shares the same snapshot storage.
#[derive(Debug, Clone, Serialize)]
pub struct Trace {
    family: Family,
    snapshots: Arc<[Snapshot]>,
}

impl Trace {
    pub(crate) fn new(family: Family, snapshots: Vec<Snapshot>) -> Self {
        Trace {
            family,
            snapshots: snapshots.into(),
        }
    }

    pub fn family(&self) -> Family {
        self.family
    }

    /// Get a snapshot by sequence index
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false for a finished trace; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.snapshots.iter()
    }

    /// The terminal snapshot
    pub fn last(&self) -> &Snapshot {
        // A finished trace holds at least two snapshots
        &self.snapshots[self.snapshots.len() - 1]
    }

    /// Sequence of action tags, in order
    pub fn actions(&self) -> Vec<ActionTag> {
        self.snapshots.iter().map(|s| s.action).collect()
    }

    /// Whether `other` shares this trace's storage
    pub fn ptr_eq(&self, other: &Trace) -> bool {
        Arc::ptr_eq(&self.snapshots, &other.snapshots)
    }

    /// Export the trace for presentation layers that consume JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Snapshot;
    type IntoIter = std::slice::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}

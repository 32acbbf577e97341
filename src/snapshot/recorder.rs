// Append-only trace builder

use crate::constants::DEFAULT_SNAPSHOT_LIMIT;
use crate::errors::TraceError;
use crate::snapshot::{ActionTag, Counters, Snapshot, State, Trace};
use crate::tracers::Family;

/// Collects snapshots for one tracer run.
///
/// The recorder keeps the running [`Counters`]; every pushed snapshot gets a
/// copy of them as they stand at that moment.
#[derive(Debug)]
pub struct TraceRecorder {
    family: Family,
    snapshots: Vec<Snapshot>,
    counters: Counters,
    max_snapshots: usize,
}

impl TraceRecorder {
    pub fn new(family: Family) -> Self {
        Self::with_limit(family, DEFAULT_SNAPSHOT_LIMIT)
    }

    pub fn with_limit(family: Family, max_snapshots: usize) -> Self {
        TraceRecorder {
            family,
            snapshots: Vec::new(),
            counters: Counters::default(),
            max_snapshots,
        }
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub fn counters_mut(&mut self) -> &mut Counters {
        &mut self.counters
    }

    /// Append a snapshot to the trace
    pub fn push(
        &mut self,
        action: ActionTag,
        description: impl Into<String>,
        state: State,
    ) -> Result<(), TraceError> {
        if self.snapshots.len() >= self.max_snapshots {
            return Err(TraceError::SnapshotLimitExceeded {
                family: self.family,
                limit: self.max_snapshots,
            });
        }

        self.snapshots.push(Snapshot {
            action,
            description: description.into(),
            state,
            counters: self.counters.clone(),
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Seal the recording, checking the trace invariants
    pub fn finish(self) -> Result<Trace, TraceError> {
        let first = self.snapshots.first().ok_or(TraceError::Empty {
            family: self.family,
        })?;
        if first.action != ActionTag::Initialize {
            return Err(TraceError::MissingInitialize {
                family: self.family,
                found: first.action,
            });
        }

        let last_index = self.snapshots.len() - 1;
        let last = &self.snapshots[last_index];
        if last_index == 0 || !last.action.is_terminal() {
            return Err(TraceError::MissingTerminal {
                family: self.family,
                found: last.action,
            });
        }

        if let Some((index, early)) = self.snapshots[..last_index]
            .iter()
            .enumerate()
            .find(|(_, s)| s.action.is_terminal())
        {
            return Err(TraceError::EarlyTerminal {
                family: self.family,
                found: early.action,
                index,
            });
        }

        tracing::debug!(
            family = %self.family,
            snapshots = self.snapshots.len(),
            terminal = %last.action,
            "trace recorded"
        );
        Ok(Trace::new(self.family, self.snapshots))
    }
}

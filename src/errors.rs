//! Error types
//!
//! Two kinds of failure exist, and neither covers an algorithm that simply
//! fails to succeed (a missing search target, an unmakeable amount): those are
//! ordinary terminal snapshots.
//!
//! - [`ValidationError`]: raised by the validation gate before any tracer runs.
//!   Carries the offending input field and a reason for the caller to surface.
//! - [`TraceError`]: a tracer contract violation. Reaching one after the gate
//!   has accepted the input is a bug.

use crate::snapshot::ActionTag;
use crate::tracers::Family;
use thiserror::Error;

/// Input rejected by the validation gate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Tracer contract violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceError {
    /// Parameters of the wrong shape for the family
    #[error("{family}: contract violation: {reason}")]
    Contract { family: Family, reason: String },

    /// The run produced more snapshots than the recorder allows
    #[error("{family}: snapshot limit of {limit} exceeded")]
    SnapshotLimitExceeded { family: Family, limit: usize },

    #[error("{family}: trace is empty")]
    Empty { family: Family },

    #[error("{family}: trace must begin with initialize, found {found}")]
    MissingInitialize { family: Family, found: ActionTag },

    #[error("{family}: trace must end with a terminal action, found {found}")]
    MissingTerminal { family: Family, found: ActionTag },

    #[error("{family}: terminal action {found} recorded at step {index} before the end")]
    EarlyTerminal {
        family: Family,
        found: ActionTag,
        index: usize,
    },
}

impl TraceError {
    pub fn contract(family: Family, reason: impl Into<String>) -> Self {
        TraceError::Contract {
            family,
            reason: reason.into(),
        }
    }
}

/// Any failure of [`generate_trace`](crate::tracers::generate_trace)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Trace(#[from] TraceError),
}

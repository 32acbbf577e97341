//! # Introduction
//!
//! Algoscope re-runs textbook algorithms on small inputs and records every
//! meaningful state transition as an immutable [`snapshot::Snapshot`]. The
//! resulting [`snapshot::Trace`] is replayed step by step, with a pseudocode
//! line highlighted for each step, through a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! key=value text → Gate → Params → Tracer → Trace → Playback → TUI
//! ```
//!
//! 1. [`gate`]: parses and range-checks raw input into typed tracer params.
//! 2. [`tracers`]: one pure function per algorithm family, each producing a
//!    [`snapshot::Trace`]. [`tracers::generate_trace`] is the entry point.
//! 3. [`snapshot`]: the snapshot model and the append-only recorder that
//!    enforces trace invariants.
//! 4. [`highlight`]: action tag to pseudocode line tables.
//! 5. [`playback`]: the playback state machine and its timer abstraction.
//! 6. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Families
//!
//! Bubble sort; binary, interpolation, and ternary search; Dijkstra; coin
//! change; longest common subsequence; activity selection; fractional
//! knapsack; job scheduling; pre-, in-, and post-order tree traversal.

pub mod constants;
pub mod errors;
pub mod gate;
pub mod highlight;
pub mod playback;
pub mod snapshot;
pub mod tracers;
pub mod ui;

pub use errors::{Error, TraceError, ValidationError};

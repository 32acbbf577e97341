//! Playback
//!
//! Replays a recorded [`Trace`](crate::snapshot::Trace) step by step. The
//! [`PlaybackController`] owns the position and the transport state; the
//! [`Scheduler`] supplies its recurring tick. Any timer mechanism can sit
//! behind the trait, and tests use [`ManualScheduler`] to drive time by hand.

pub mod controller;
pub mod scheduler;

pub use controller::{PlaybackController, PlaybackState};
pub use scheduler::{
    Clock, IntervalScheduler, ManualClock, ManualScheduler, RealtimeScheduler, Scheduler,
    SystemClock, TimerHandle,
};

// Recurring tick scheduling for playback

use rustc_hash::FxHashMap;
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of "now", measured from an arbitrary fixed origin
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Monotonic wall clock
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Virtual clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one handle while the
/// scheduler owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Identifies one armed timer. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Framework-independent recurring timer interface.
///
/// Ticks are pulled rather than pushed: the owner calls [`poll_tick`] from its
/// own loop and gets one `true` per elapsed interval. A cancelled handle never
/// reports another tick.
///
/// [`poll_tick`]: Scheduler::poll_tick
pub trait Scheduler {
    /// Start a recurring timer; the first tick is due one `interval` from now
    fn arm(&mut self, interval: Duration) -> TimerHandle;

    fn cancel(&mut self, handle: TimerHandle);

    /// Change the period. The tick already scheduled keeps its deadline;
    /// the new interval applies from the one after it.
    fn set_interval(&mut self, handle: TimerHandle, interval: Duration);

    /// Consume one due tick, if any
    fn poll_tick(&mut self, handle: TimerHandle) -> bool;

    fn is_armed(&self, handle: TimerHandle) -> bool;
}

#[derive(Debug, Clone, Copy)]
struct TimerEntry {
    interval: Duration,
    deadline: Duration,
}

/// [`Scheduler`] over any [`Clock`]
#[derive(Debug)]
pub struct IntervalScheduler<C: Clock> {
    clock: C,
    timers: FxHashMap<TimerHandle, TimerEntry>,
    next_id: u64,
}

/// Scheduler on the wall clock, used by the terminal viewer
pub type RealtimeScheduler = IntervalScheduler<SystemClock>;

/// Scheduler on a [`ManualClock`], for deterministic tests
pub type ManualScheduler = IntervalScheduler<ManualClock>;

impl<C: Clock> IntervalScheduler<C> {
    pub fn new(clock: C) -> Self {
        IntervalScheduler {
            clock,
            timers: FxHashMap::default(),
            next_id: 0,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Number of live timers
    pub fn armed_count(&self) -> usize {
        self.timers.len()
    }

    /// Time left until the earliest pending tick
    pub fn time_until_next_tick(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.timers
            .values()
            .map(|t| t.deadline.saturating_sub(now))
            .min()
    }
}

impl Default for RealtimeScheduler {
    fn default() -> Self {
        Self::new(SystemClock::new())
    }
}

impl<C: Clock> Scheduler for IntervalScheduler<C> {
    fn arm(&mut self, interval: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.timers.insert(
            handle,
            TimerEntry {
                interval,
                deadline: self.clock.now() + interval,
            },
        );
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.remove(&handle);
    }

    fn set_interval(&mut self, handle: TimerHandle, interval: Duration) {
        if let Some(timer) = self.timers.get_mut(&handle) {
            timer.interval = interval;
        }
    }

    fn poll_tick(&mut self, handle: TimerHandle) -> bool {
        let now = self.clock.now();
        match self.timers.get_mut(&handle) {
            Some(timer) if timer.deadline <= now => {
                timer.deadline += timer.interval;
                true
            }
            _ => false,
        }
    }

    fn is_armed(&self, handle: TimerHandle) -> bool {
        self.timers.contains_key(&handle)
    }
}

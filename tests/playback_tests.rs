// Playback controller driven by virtual time over real traces

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use algoscope::constants::{MAX_SPEED_MS, MIN_SPEED_MS};
use algoscope::gate::{self, RawInput};
use algoscope::highlight::HighlightMapper;
use algoscope::playback::{
    IntervalScheduler, ManualClock, ManualScheduler, PlaybackController, PlaybackState,
    Scheduler, TimerHandle,
};
use algoscope::snapshot::{ActionTag, Trace};
use algoscope::tracers::{generate_trace, Family};

const SPEED_MS: u64 = 100;

fn binary_search_trace() -> Trace {
    let input = RawInput::new()
        .with("array", "11,12,22,25,34,50,64,76,88,90")
        .with("target", "34");
    let params = gate::parse(Family::BinarySearch, &input).unwrap();
    generate_trace(Family::BinarySearch, &params).unwrap()
}

fn setup() -> (PlaybackController<ManualScheduler>, ManualClock) {
    let clock = ManualClock::new();
    let mut controller = PlaybackController::new(IntervalScheduler::new(clock.clone()));
    controller.set_speed(SPEED_MS);
    controller.start(binary_search_trace());
    (controller, clock)
}

fn wait(clock: &ManualClock, intervals: u64) {
    clock.advance(Duration::from_millis(SPEED_MS * intervals));
}

#[test]
fn test_play_to_end_then_reset() {
    let (mut controller, clock) = setup();
    let len = controller.trace().unwrap().len();

    controller.play();
    for _ in 0..len + 3 {
        wait(&clock, 1);
        controller.pump();
    }
    assert_eq!(controller.state(), PlaybackState::Finished);
    assert_eq!(controller.position(), len - 1);
    assert_eq!(controller.current_snapshot().unwrap().action, ActionTag::Found);
    assert!(!controller.is_playing());

    controller.reset();
    assert_eq!(controller.position(), 0);
    assert!(!controller.is_playing());
    assert_eq!(controller.state(), PlaybackState::Idle);
}

#[test]
fn test_no_ticks_after_pause_or_reset() {
    let (mut controller, clock) = setup();

    controller.play();
    wait(&clock, 2);
    assert_eq!(controller.pump(), 2);
    controller.pause();

    wait(&clock, 5);
    controller.pump();
    assert_eq!(controller.position(), 2);

    controller.play();
    wait(&clock, 1);
    controller.pump();
    controller.reset();

    wait(&clock, 5);
    controller.pump();
    assert_eq!(controller.position(), 0);
    assert_eq!(controller.scheduler().armed_count(), 0);
}

#[test]
fn test_step_forward_never_passes_the_end() {
    let (mut controller, _) = setup();
    let len = controller.trace().unwrap().len();
    controller.seek(1);
    for _ in 0..len * 2 {
        controller.step_forward();
        assert!(controller.position() <= len - 1);
    }
    assert_eq!(controller.state(), PlaybackState::Finished);
}

#[test]
fn test_speed_is_clamped() {
    let (mut controller, _) = setup();
    controller.set_speed(0);
    assert_eq!(controller.speed(), Duration::from_millis(MIN_SPEED_MS));
    controller.set_speed(u64::MAX);
    assert_eq!(controller.speed(), Duration::from_millis(MAX_SPEED_MS));
}

#[test]
fn test_new_trace_replaces_session() {
    let (mut controller, clock) = setup();
    controller.play();
    wait(&clock, 3);
    controller.pump();

    let input = RawInput::new().with("array", "2,1");
    let params = gate::parse(Family::BubbleSort, &input).unwrap();
    controller.start(generate_trace(Family::BubbleSort, &params).unwrap());
    assert_eq!(controller.position(), 0);
    assert_eq!(controller.state(), PlaybackState::Idle);
    assert_eq!(controller.trace().unwrap().family(), Family::BubbleSort);

    wait(&clock, 3);
    assert_eq!(controller.pump(), 0);
}

#[test]
fn test_highlight_follows_playback() {
    let (mut controller, _) = setup();
    let mapper = HighlightMapper::for_family(Family::BinarySearch);
    controller.seek(1);

    let snapshot = controller.current_snapshot().unwrap();
    assert_eq!(snapshot.action, ActionTag::ComputeMid);
    let line = mapper.lookup(snapshot.action).unwrap();
    assert!(mapper.listing()[line.0 - 1].contains("mid"));
}

/// Scheduler that shares its live-timer count with the test
struct CountingScheduler {
    inner: ManualScheduler,
    live: Rc<Cell<usize>>,
}

impl Scheduler for CountingScheduler {
    fn arm(&mut self, interval: Duration) -> TimerHandle {
        self.live.set(self.live.get() + 1);
        self.inner.arm(interval)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if self.inner.is_armed(handle) {
            self.live.set(self.live.get() - 1);
        }
        self.inner.cancel(handle);
    }

    fn set_interval(&mut self, handle: TimerHandle, interval: Duration) {
        self.inner.set_interval(handle, interval);
    }

    fn poll_tick(&mut self, handle: TimerHandle) -> bool {
        self.inner.poll_tick(handle)
    }

    fn is_armed(&self, handle: TimerHandle) -> bool {
        self.inner.is_armed(handle)
    }
}

#[test]
fn test_dropping_controller_cancels_timer() {
    let live = Rc::new(Cell::new(0));
    let scheduler = CountingScheduler {
        inner: IntervalScheduler::new(ManualClock::new()),
        live: Rc::clone(&live),
    };

    let mut controller = PlaybackController::new(scheduler);
    controller.start(binary_search_trace());
    controller.play();
    assert_eq!(live.get(), 1);

    drop(controller);
    assert_eq!(live.get(), 0);
}

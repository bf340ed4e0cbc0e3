//! Estimated progress for operations without real progress signals (made by FontLab https://www.fontlab.com/)
//!
//! An object-store put is one opaque round trip: it either finishes or it
//! doesn't, and nothing reports how far along it is. Rather than sitting at
//! 0% and then snapping to 100%, we project progress from the payload size
//! with an ease-out curve that stalls short of the finish line. Only the
//! caller, once the real operation has confirmed success, may push the bar
//! to 100 via [`ProgressAnimator::complete`].
//!
//! Nothing here sleeps or spawns. Time comes from a [`Clock`], frames come
//! from whoever calls [`ProgressAnimator::tick`], and a shared
//! [`CancelToken`] tells that frame driver when to stop.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Assumed sustained throughput: 2.5 MiB/s.
pub const ASSUMED_BYTES_PER_SEC: f64 = 2.5 * 1024.0 * 1024.0;
/// Fixed connection/setup latency added to every estimate.
pub const FIXED_LATENCY: Duration = Duration::from_millis(500);
pub const MIN_DURATION: Duration = Duration::from_millis(1500);
pub const MAX_DURATION: Duration = Duration::from_millis(10_000);

/// Default ceiling for projected progress.
pub const DEFAULT_MAX_PROGRESS: u8 = 95;

/// Guess how long storing `byte_size` bytes takes, clamped to 1.5-10 s.
pub fn estimate_duration(byte_size: u64) -> Duration {
    let secs = byte_size as f64 / ASSUMED_BYTES_PER_SEC + FIXED_LATENCY.as_secs_f64();
    let secs = secs.clamp(MIN_DURATION.as_secs_f64(), MAX_DURATION.as_secs_f64());
    Duration::from_millis((secs * 1000.0).round() as u64)
}

/// Starts fast, slows to a crawl near the end.
pub fn ease_out_quart(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(4)
}

/// Monotonic time source.
pub trait Clock: Send + Sync {
    /// Time elapsed since some fixed, clock-specific origin.
    fn now(&self) -> Duration;
}

/// Wall-clock time measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
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

/// Virtual clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    millis: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.millis
            .fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn set(&self, at: Duration) {
        self.millis.store(at.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_millis(self.millis.load(Ordering::SeqCst))
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// Shared flag telling a frame driver to stop scheduling ticks.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Whether the frame driver should schedule another tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Running { started: Duration },
    Settled,
    Completed,
    Cancelled,
}

/// Eased, capped progress projection.
///
/// `start` reports the first frame, each `tick` reports
/// `round(ease_out_quart(t) * max_progress)` until `t` reaches 1, `complete`
/// reports exactly one 100 and `cancel` goes silent.
pub struct ProgressAnimator<C> {
    clock: C,
    duration: Duration,
    max_progress: u8,
    on_progress: Box<dyn FnMut(u8) + Send>,
    phase: Phase,
    token: CancelToken,
}

impl<C: Clock> ProgressAnimator<C> {
    /// `max_progress` is capped at 99 so the projection alone never reads as done.
    pub fn new(
        clock: C,
        duration: Duration,
        max_progress: u8,
        on_progress: impl FnMut(u8) + Send + 'static,
    ) -> Self {
        Self {
            clock,
            duration,
            max_progress: max_progress.min(99),
            on_progress: Box::new(on_progress),
            phase: Phase::Idle,
            token: CancelToken::new(),
        }
    }

    /// Token a frame driver should poll between ticks.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn max_progress(&self) -> u8 {
        self.max_progress
    }

    /// Record the start time and report the first frame.
    pub fn start(&mut self) -> Tick {
        if self.phase != Phase::Idle {
            return self.tick();
        }
        self.phase = Phase::Running {
            started: self.clock.now(),
        };
        self.tick()
    }

    /// Report the projected value for the current time.
    pub fn tick(&mut self) -> Tick {
        let Phase::Running { started } = self.phase else {
            return Tick::Done;
        };

        let elapsed = self.clock.now().saturating_sub(started);
        let t = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
        };
        let mut value = (ease_out_quart(t) * f64::from(self.max_progress)).round() as u8;
        if t < 1.0 {
            // rounding must not reach the cap early
            value = value.min(self.max_progress.saturating_sub(1));
        }
        (self.on_progress)(value);

        if t < 1.0 {
            Tick::Continue
        } else {
            self.phase = Phase::Settled;
            Tick::Done
        }
    }

    /// Stop ticking and report 100. Call only once the real work succeeded.
    pub fn complete(&mut self) {
        match self.phase {
            Phase::Completed | Phase::Cancelled => {}
            _ => {
                self.phase = Phase::Completed;
                self.token.cancel();
                (self.on_progress)(100);
            }
        }
    }

    /// Stop ticking without reporting anything further.
    pub fn cancel(&mut self) {
        if self.phase != Phase::Completed {
            self.phase = Phase::Cancelled;
        }
        self.token.cancel();
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Completed | Phase::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::Mutex;

    fn recording(
        clock: &ManualClock,
        duration: Duration,
        max: u8,
    ) -> (ProgressAnimator<ManualClock>, Arc<Mutex<Vec<u8>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let animator = ProgressAnimator::new(clock.clone(), duration, max, move |p| {
            sink.lock().unwrap().push(p)
        });
        (animator, seen)
    }

    #[test]
    fn estimate_is_clamped() {
        assert_eq!(estimate_duration(0), Duration::from_millis(1500));
        assert_eq!(estimate_duration(u64::MAX), Duration::from_millis(10_000));
        assert_eq!(estimate_duration(1024 * 1024 * 1024), MAX_DURATION);
    }

    #[test]
    fn estimate_at_throughput() {
        let bytes = (2.5 * 1024.0 * 1024.0) as u64;
        // one second of transfer plus half a second of latency
        assert_eq!(estimate_duration(bytes), Duration::from_millis(1500));
        assert_eq!(estimate_duration(2 * bytes), Duration::from_millis(2500));
    }

    #[test]
    fn easing_endpoints() {
        assert_eq!(ease_out_quart(0.0), 0.0);
        assert_eq!(ease_out_quart(1.0), 1.0);
        assert!(ease_out_quart(0.5) > 0.9);
    }

    #[test]
    fn start_reports_zero_and_ticks_follow_the_curve() {
        let clock = ManualClock::new();
        let (mut anim, seen) = recording(&clock, Duration::from_millis(1000), 95);

        assert_eq!(anim.start(), Tick::Continue);
        clock.advance(Duration::from_millis(500));
        assert_eq!(anim.tick(), Tick::Continue);
        clock.advance(Duration::from_millis(500));
        assert_eq!(anim.tick(), Tick::Done);
        assert_eq!(anim.tick(), Tick::Done);

        // 1 - 0.5^4 = 0.9375 -> 89.06
        assert_eq!(*seen.lock().unwrap(), vec![0, 89, 95]);
    }

    #[test]
    fn complete_reports_one_hundred_once() {
        let clock = ManualClock::new();
        let (mut anim, seen) = recording(&clock, Duration::from_millis(1000), 95);

        anim.start();
        clock.advance(Duration::from_millis(200));
        anim.tick();
        anim.complete();
        anim.complete();
        clock.advance(Duration::from_millis(200));
        assert_eq!(anim.tick(), Tick::Done);

        let values = seen.lock().unwrap().clone();
        assert_eq!(values.iter().filter(|v| **v == 100).count(), 1);
        assert_eq!(values.last(), Some(&100));
        assert!(anim.token().is_cancelled());
    }

    #[test]
    fn cancel_goes_silent() {
        let clock = ManualClock::new();
        let (mut anim, seen) = recording(&clock, Duration::from_millis(1000), 95);

        anim.start();
        anim.cancel();
        clock.advance(Duration::from_millis(300));
        assert_eq!(anim.tick(), Tick::Done);
        anim.complete();

        assert_eq!(*seen.lock().unwrap(), vec![0]);
        assert!(anim.is_finished());
        assert!(anim.token().is_cancelled());
    }

    #[test]
    fn max_progress_is_capped_below_one_hundred() {
        let clock = ManualClock::new();
        let (mut anim, seen) = recording(&clock, Duration::from_millis(10), 100);
        anim.start();
        clock.advance(Duration::from_millis(50));
        anim.tick();
        assert_eq!(anim.max_progress(), 99);
        assert_eq!(seen.lock().unwrap().last(), Some(&99));
    }

    proptest! {
        #[test]
        fn projection_is_monotonic_and_below_cap(
            steps in proptest::collection::vec(0u64..400, 1..40),
            duration_ms in 1u64..5000,
        ) {
            let clock = ManualClock::new();
            let (mut anim, seen) = recording(&clock, Duration::from_millis(duration_ms), 95);
            let mut last = anim.start();
            for step in steps {
                clock.advance(Duration::from_millis(step));
                last = anim.tick();
                if last == Tick::Done {
                    break;
                }
            }
            let values = seen.lock().unwrap().clone();
            prop_assert!(values.windows(2).all(|w| w[0] <= w[1]));
            let (before, settled) = match last {
                Tick::Done => values.split_at(values.len() - 1),
                Tick::Continue => (&values[..], &values[..0]),
            };
            prop_assert!(before.iter().all(|v| *v < 95));
            prop_assert!(settled.iter().all(|v| *v == 95));
        }
    }
}

//! Frame driver for progress animations (made by FontLab https://www.fontlab.com/)

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use fontshelf_core::progress::{Clock, ProgressAnimator, Tick};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

/// Roughly one display refresh.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub type SharedAnimator<C> = Arc<Mutex<ProgressAnimator<C>>>;

pub fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Start `animator` and keep ticking it every `every` until it settles or its
/// token is cancelled by `complete`/`cancel`.
pub fn spawn<C>(animator: SharedAnimator<C>, every: Duration) -> JoinHandle<()>
where
    C: Clock + 'static,
{
    let token = lock(&animator).token();
    tokio::spawn(async move {
        let mut interval = time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // the first tick resolves immediately
        interval.tick().await;
        if token.is_cancelled() || lock(&animator).start() == Tick::Done {
            return;
        }

        loop {
            interval.tick().await;
            if token.is_cancelled() {
                break;
            }
            if lock(&animator).tick() == Tick::Done {
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontshelf_core::progress::ManualClock;

    fn recorded(
        clock: &ManualClock,
        duration: Duration,
    ) -> (SharedAnimator<ManualClock>, Arc<Mutex<Vec<u8>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let animator = ProgressAnimator::new(clock.clone(), duration, 95, move |p| {
            lock(&sink).push(p)
        });
        (Arc::new(Mutex::new(animator)), seen)
    }

    #[tokio::test]
    async fn cancelled_before_first_frame_reports_nothing() {
        let clock = ManualClock::new();
        let (animator, seen) = recorded(&clock, Duration::from_secs(2));
        lock(&animator).cancel();

        spawn(Arc::clone(&animator), Duration::from_millis(1))
            .await
            .expect("driver");

        assert!(lock(&seen).is_empty());
    }

    #[tokio::test]
    async fn settles_at_max_when_time_has_run_out() {
        let clock = ManualClock::new();
        let (animator, seen) = recorded(&clock, Duration::from_secs(2));
        clock.set(Duration::from_secs(3));

        spawn(Arc::clone(&animator), Duration::from_millis(1))
            .await
            .expect("driver");

        assert_eq!(*lock(&seen), vec![95]);
    }

    #[tokio::test]
    async fn complete_stops_a_running_driver() {
        let clock = ManualClock::new();
        let (animator, seen) = recorded(&clock, Duration::from_secs(2));
        let driver = spawn(Arc::clone(&animator), Duration::from_millis(1));

        time::sleep(Duration::from_millis(20)).await;
        clock.advance(Duration::from_millis(500));
        time::sleep(Duration::from_millis(20)).await;
        lock(&animator).complete();

        time::timeout(Duration::from_secs(5), driver)
            .await
            .expect("driver stopped")
            .expect("driver");

        let seen = lock(&seen);
        assert_eq!(seen.last(), Some(&100));
        assert_eq!(seen.iter().filter(|&&p| p == 100).count(), 1);
        assert!(seen[..seen.len() - 1].iter().all(|&p| p < 95));
    }
}

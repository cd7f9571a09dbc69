//! Tick schedule for the rest timer.
//!
//! The schedule is a plain [`Interval`] owned by the session. Nothing runs in
//! the background: a tick exists only once the owner awaits it, so an
//! unattended timer holds at most one pending tick instead of a growing
//! queue.

use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

/// Interval between rest timer ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A pending tick schedule. Dropping it cancels the schedule.
pub(crate) struct TickSchedule {
    interval: Interval,
}

impl TickSchedule {
    /// Schedule ticks every `period`, the first one `period` from now.
    ///
    /// Returns `None` when called outside a Tokio runtime. The runtime must
    /// have its time driver enabled.
    pub(crate) fn start(period: Duration) -> Option<Self> {
        Handle::try_current().ok()?;
        let mut interval = time::interval_at(Instant::now() + period, period);
        // Missed periods collapse into a single tick; the next one is a full
        // period after it is taken.
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Some(Self { interval })
    }

    /// Wait for the next tick. Cancel-safe.
    pub(crate) async fn wait(&mut self) {
        self.interval.tick().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_outside_runtime_is_none() {
        assert!(TickSchedule::start(TICK_PERIOD).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_every_period() {
        let mut schedule = TickSchedule::start(TICK_PERIOD).unwrap();

        let start = Instant::now();
        schedule.wait().await;
        schedule.wait().await;
        assert!(Instant::now() - start >= TICK_PERIOD * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn missed_periods_collapse_into_one_tick() {
        let mut schedule = TickSchedule::start(TICK_PERIOD).unwrap();
        time::sleep(TICK_PERIOD * 30).await;

        let before = Instant::now();
        schedule.wait().await;
        assert_eq!(Instant::now(), before);

        schedule.wait().await;
        assert!(Instant::now() - before >= TICK_PERIOD);
    }
}

//! Rest timer countdown.
//!
//! The countdown itself is pure: `start`, `stop` and `tick` take a timer by
//! value and return the next one. Scheduling the one-second ticks belongs
//! to the session shell, which calls `tick` whenever a tick fires.
//!
//! ```text
//! Idle --start--> Running            remaining = duration
//! Running --tick--> Running          remaining - 1, while > 0 afterwards
//! Running --tick--> Idle             remaining reached 0
//! Running --stop--> Idle             remaining = duration
//! ```

use serde::{Deserialize, Serialize};

/// Default rest period in seconds.
pub const DEFAULT_REST_SECONDS: u32 = 60;

/// Phase of the rest timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerPhase {
    Idle,
    Running,
}

impl TimerPhase {
    /// Name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Running => "Running",
        }
    }
}

/// What the timer exposes to renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub remaining_seconds: u32,
    pub active: bool,
}

/// Effect of a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// One second counted down; the timer keeps running.
    Counted { remaining: u32 },
    /// The countdown reached zero and the timer went idle.
    Finished,
    /// The timer was idle; nothing changed.
    Ignored,
}

/// Countdown between sets.
///
/// # Example
///
/// ```rust
/// use repcount::core::{RestTimer, TickOutcome, TimerPhase};
///
/// let timer = RestTimer::new(3).start();
/// assert_eq!(timer.phase(), TimerPhase::Running);
///
/// let (timer, outcome) = timer.tick();
/// assert_eq!(outcome, TickOutcome::Counted { remaining: 2 });
///
/// let (timer, _) = timer.tick();
/// let (timer, outcome) = timer.tick();
/// assert_eq!(outcome, TickOutcome::Finished);
/// assert_eq!(timer.state().remaining_seconds, 0);
/// assert!(!timer.state().active);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RestTimer {
    duration: u32,
    remaining: u32,
    phase: TimerPhase,
}

impl Default for RestTimer {
    fn default() -> Self {
        Self::new(DEFAULT_REST_SECONDS)
    }
}

impl RestTimer {
    /// An idle timer showing the full `duration`.
    pub fn new(duration: u32) -> Self {
        Self {
            duration,
            remaining: duration,
            phase: TimerPhase::Idle,
        }
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    pub fn state(&self) -> TimerState {
        TimerState {
            remaining_seconds: self.remaining,
            active: self.is_running(),
        }
    }

    /// Begin (or restart) the countdown from the full duration.
    #[must_use]
    pub fn start(self) -> Self {
        Self {
            remaining: self.duration,
            phase: TimerPhase::Running,
            ..self
        }
    }

    /// Stop the countdown and show the full duration again.
    #[must_use]
    pub fn stop(self) -> Self {
        Self::new(self.duration)
    }

    /// Count one second down.
    ///
    /// The tick that reaches zero also ends the countdown, leaving the timer
    /// idle at `0` until it is started or stopped again.
    #[must_use]
    pub fn tick(self) -> (Self, TickOutcome) {
        if !self.is_running() {
            return (self, TickOutcome::Ignored);
        }

        let remaining = self.remaining.saturating_sub(1);
        if remaining == 0 {
            let finished = Self {
                remaining: 0,
                phase: TimerPhase::Idle,
                ..self
            };
            return (finished, TickOutcome::Finished);
        }

        (Self { remaining, ..self }, TickOutcome::Counted { remaining })
    }
}

//! Core session types and logic.
//!
//! This module contains the pure part of the session model:
//! - Counters for reps, sets and weight
//! - The ordered history of saved sets
//! - The rest timer countdown
//!
//! Nothing in here touches storage, clocks for scheduling, or logging.
//! The `session` module wraps these values and decides when to persist them.

mod counters;
mod history;
mod timer;

pub use counters::{Counters, DEFAULT_WEIGHT_STEP};
pub use history::{History, HistoryEntry};
pub use timer::{RestTimer, TickOutcome, TimerPhase, TimerState, DEFAULT_REST_SECONDS};

//! Messages exchanged with the rendering layer.

use crate::core::{Counters, HistoryEntry, TimerState};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user action forwarded by the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", content = "id", rename_all = "snake_case")]
pub enum Intent {
    IncrementReps,
    DecrementReps,
    IncrementSets,
    DecrementSets,
    IncreaseWeight,
    DecreaseWeight,
    SaveSet,
    DeleteEntry(Uuid),
    ResetAll,
    StartTimer,
    StopTimer,
    /// Start when idle, stop when running
    ToggleTimer,
}

/// Everything a renderer needs to draw the session screen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub counters: Counters,
    pub history: Vec<HistoryEntry>,
    pub timer: TimerState,
}

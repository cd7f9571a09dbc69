//! Saved-set history.
//!
//! The history is an ordered log of sets the user saved. Entries are
//! appended at the tail and never edited afterwards; the only other
//! mutation is deleting an entry by id.

use super::counters::Counters;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Record of a single saved set.
///
/// # Example
///
/// ```rust
/// use repcount::core::{Counters, HistoryEntry};
///
/// let counters = Counters { reps: 8, sets: 1, weight: 40.0 };
/// let entry = HistoryEntry::from_counters(&counters);
///
/// assert_eq!(entry.set, 1);
/// assert_eq!(entry.reps, 8);
/// assert_eq!(entry.weight, 40.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unique identifier used for deletion
    pub id: Uuid,
    /// Set number at the time of saving
    pub set: u32,
    /// Repetitions performed
    pub reps: u32,
    /// Weight used, in kilograms
    pub weight: f64,
    /// When the set was saved
    pub saved_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Build an entry from the current counters with a fresh id.
    pub fn from_counters(counters: &Counters) -> Self {
        Self {
            id: Uuid::new_v4(),
            set: counters.sets,
            reps: counters.reps,
            weight: counters.weight,
            saved_at: Utc::now(),
        }
    }
}

/// Ordered log of saved sets, unique by id.
///
/// Serializes as a plain list of entries. Deserializing drops any entry
/// whose id was already seen, keeping the first occurrence.
///
/// # Example
///
/// ```rust
/// use repcount::core::{Counters, History, HistoryEntry};
///
/// let mut history = History::new();
/// let first = HistoryEntry::from_counters(&Counters { reps: 5, sets: 0, weight: 20.0 });
/// let second = HistoryEntry::from_counters(&Counters { reps: 5, sets: 1, weight: 22.5 });
/// let first_id = first.id;
///
/// history.push(first);
/// history.push(second);
/// assert_eq!(history.len(), 2);
///
/// assert!(history.remove(first_id).is_some());
/// assert!(history.remove(first_id).is_none());
/// assert_eq!(history.entries()[0].set, 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<HistoryEntry>", into = "Vec<HistoryEntry>")]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry at the tail.
    ///
    /// Returns `false` and leaves the history unchanged if an entry with the
    /// same id is already present.
    pub fn push(&mut self, entry: HistoryEntry) -> bool {
        if self.contains(entry.id) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Remove the entry with `id`, returning it if it was present.
    pub fn remove(&mut self, id: Uuid) -> Option<HistoryEntry> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(index))
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<HistoryEntry>> for History {
    fn from(entries: Vec<HistoryEntry>) -> Self {
        let mut seen = HashSet::with_capacity(entries.len());
        let entries = entries
            .into_iter()
            .filter(|entry| seen.insert(entry.id))
            .collect();
        Self { entries }
    }
}

impl From<History> for Vec<HistoryEntry> {
    fn from(history: History) -> Self {
        history.entries
    }
}

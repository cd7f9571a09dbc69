//! Session store: the imperative shell around the core types.
//!
//! [`SessionStore`] owns the counters, the saved-set history and the rest
//! timer. Every mutation that should survive a restart is written to the
//! configured [`KeyValueStore`] right away. Storage failures during a
//! mutation are logged and the in-memory change is kept, so user actions
//! never fail.
//!
//! # Rest timer scheduling
//!
//! `start_timer` arms a one-second interval on the current Tokio runtime.
//! Nothing runs in the background: the tick is applied when the owner
//! awaits [`SessionStore::next_tick`], so ticks and user intents are
//! handled on the same task and never interleave:
//!
//! ```rust,no_run
//! use repcount::{Intent, MemoryStore, SessionStore};
//! use tokio::sync::mpsc;
//!
//! async fn run(mut intents: mpsc::Receiver<Intent>) {
//!     let mut store = SessionStore::new(MemoryStore::new());
//!     loop {
//!         tokio::select! {
//!             Some(intent) = intents.recv() => store.apply(intent),
//!             Some(timer) = store.next_tick() => {
//!                 println!("{}s left", timer.remaining_seconds);
//!             }
//!             else => break,
//!         }
//!     }
//! }
//! ```

mod intent;
mod ticker;

pub use intent::{Intent, SessionSnapshot};
pub use ticker::TICK_PERIOD;

use crate::builder::SessionStoreBuilder;
use crate::config::SessionConfig;
use crate::core::{Counters, History, HistoryEntry, RestTimer, TickOutcome, TimerPhase, TimerState};
use crate::storage::{load_record, save_record, KeyValueStore, StorageError};
use serde::de::DeserializeOwned;
use ticker::TickSchedule;
use tracing::{debug, info, trace, warn};
use uuid::Uuid;

/// Owner of all workout session state.
pub struct SessionStore {
    storage: Box<dyn KeyValueStore>,
    config: SessionConfig,
    counters: Counters,
    history: History,
    timer: RestTimer,
    schedule: Option<TickSchedule>,
}

impl SessionStore {
    /// Create a store with the default configuration and restore any
    /// state persisted in `storage`.
    pub fn new(storage: impl KeyValueStore + 'static) -> Self {
        let mut store = Self::with_parts(Box::new(storage), SessionConfig::default());
        store.load_persisted();
        store
    }

    /// Start building a store with a custom configuration.
    pub fn builder() -> SessionStoreBuilder {
        SessionStoreBuilder::new()
    }

    /// Assemble a store without touching storage. `config` must already
    /// be validated.
    pub(crate) fn with_parts(storage: Box<dyn KeyValueStore>, config: SessionConfig) -> Self {
        Self {
            storage,
            timer: RestTimer::new(config.rest_seconds),
            config,
            counters: Counters::new(),
            history: History::new(),
            schedule: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn timer(&self) -> TimerState {
        self.timer.state()
    }

    pub fn timer_phase(&self) -> TimerPhase {
        self.timer.phase()
    }

    /// Copy of the current state for rendering.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            counters: self.counters,
            history: self.history.entries().to_vec(),
            timer: self.timer.state(),
        }
    }

    /// Dispatch a user intent to the matching operation.
    pub fn apply(&mut self, intent: Intent) {
        trace!(?intent, "applying intent");
        match intent {
            Intent::IncrementReps => self.increment_reps(),
            Intent::DecrementReps => self.decrement_reps(),
            Intent::IncrementSets => self.increment_sets(),
            Intent::DecrementSets => self.decrement_sets(),
            Intent::IncreaseWeight => self.increase_weight(),
            Intent::DecreaseWeight => self.decrease_weight(),
            Intent::SaveSet => {
                self.save_set();
            }
            Intent::DeleteEntry(id) => {
                self.delete_entry(id);
            }
            Intent::ResetAll => self.reset_all(),
            Intent::StartTimer => {
                self.start_timer();
            }
            Intent::StopTimer => {
                self.stop_timer();
            }
            Intent::ToggleTimer => {
                self.toggle_timer();
            }
        }
    }

    pub fn increment_reps(&mut self) {
        self.update_counters("increment_reps", Counters::increment_reps);
    }

    /// No-op at zero.
    pub fn decrement_reps(&mut self) {
        self.update_counters("decrement_reps", Counters::decrement_reps);
    }

    pub fn increment_sets(&mut self) {
        self.update_counters("increment_sets", Counters::increment_sets);
    }

    /// No-op at zero.
    pub fn decrement_sets(&mut self) {
        self.update_counters("decrement_sets", Counters::decrement_sets);
    }

    /// Add one weight step.
    pub fn increase_weight(&mut self) {
        let step = self.config.weight_step;
        self.update_counters("increase_weight", |c| c.increase_weight(step));
    }

    /// Remove one weight step, clamping at zero.
    pub fn decrease_weight(&mut self) {
        let step = self.config.weight_step;
        self.update_counters("decrease_weight", |c| c.decrease_weight(step));
    }

    /// Record the current counters as a finished set.
    ///
    /// The new entry carries the pre-call `(sets, reps, weight)`. Afterwards
    /// `sets` is incremented and `reps`/`weight` are cleared. Both records
    /// are persisted.
    pub fn save_set(&mut self) -> HistoryEntry {
        let entry = HistoryEntry::from_counters(&self.counters);
        self.history.push(entry.clone());
        self.counters = self.counters.after_save();

        debug!(
            id = %entry.id,
            set = entry.set,
            reps = entry.reps,
            weight = entry.weight,
            "set saved"
        );
        self.persist_or_warn();
        entry
    }

    /// Remove the history entry with `id`.
    ///
    /// Returns `false` (and writes nothing) if no such entry exists.
    pub fn delete_entry(&mut self, id: Uuid) -> bool {
        let Some(removed) = self.history.remove(id) else {
            debug!(%id, "delete ignored, no such entry");
            return false;
        };

        debug!(id = %removed.id, set = removed.set, "history entry deleted");
        if let Err(e) = self.persist_history() {
            warn!(error = %e, "failed to persist history");
        }
        true
    }

    /// Zero all counters, and clear the history when
    /// `reset_clears_history` is set.
    pub fn reset_all(&mut self) {
        self.counters = Counters::new();
        if self.config.reset_clears_history {
            self.history.clear();
        }

        info!(
            cleared_history = self.config.reset_clears_history,
            "session reset"
        );
        self.persist_or_warn();
    }

    /// Start the rest timer from the full duration.
    ///
    /// Any tick schedule already armed is replaced, so a restart never
    /// produces duplicate ticks.
    pub fn start_timer(&mut self) -> TimerState {
        self.cancel_schedule();
        self.timer = self.timer.start();
        self.schedule = TickSchedule::start(TICK_PERIOD);

        if self.schedule.is_none() {
            warn!("no Tokio runtime; rest timer must be driven with tick()");
        }
        debug!(
            remaining = self.timer.state().remaining_seconds,
            phase = self.timer.phase().name(),
            "rest timer started"
        );
        self.timer.state()
    }

    /// Stop the rest timer and show the full duration again.
    pub fn stop_timer(&mut self) -> TimerState {
        self.cancel_schedule();
        if self.timer.is_running() {
            debug!(
                remaining = self.timer.state().remaining_seconds,
                phase = self.timer.phase().name(),
                "rest timer stopped"
            );
        }
        self.timer = self.timer.stop();
        self.timer.state()
    }

    /// Start when idle, stop when running.
    pub fn toggle_timer(&mut self) -> TimerState {
        if self.timer.is_running() {
            self.stop_timer()
        } else {
            self.start_timer()
        }
    }

    /// Apply one tick to the rest timer.
    ///
    /// Normally invoked through [`next_tick`](Self::next_tick). Ticking an
    /// idle timer changes nothing.
    pub fn tick(&mut self) -> TimerState {
        let (timer, outcome) = self.timer.tick();
        self.timer = timer;

        match outcome {
            TickOutcome::Counted { remaining } => trace!(remaining, "rest timer tick"),
            TickOutcome::Finished => {
                self.cancel_schedule();
                info!("rest timer finished");
            }
            TickOutcome::Ignored => trace!("tick ignored, timer idle"),
        }
        self.timer.state()
    }

    /// Wait for the next scheduled tick and apply it.
    ///
    /// Returns `None` right away when no tick schedule is active. Periods
    /// that passed while nobody was waiting count as a single tick.
    /// Cancel-safe, so it can be used as a `tokio::select!` branch.
    pub async fn next_tick(&mut self) -> Option<TimerState> {
        self.schedule.as_mut()?.wait().await;
        Some(self.tick())
    }

    /// Restore counters and history from storage.
    ///
    /// Missing or unreadable records fall back to zero counters and an
    /// empty history; decode failures are logged, never returned.
    pub fn load_persisted(&mut self) {
        let counters: Counters = self.load_or_default(&self.config.counters_key);
        let history: History = self.load_or_default(&self.config.history_key);

        self.counters = counters.sanitized();
        self.history = history;
        info!(
            reps = self.counters.reps,
            sets = self.counters.sets,
            weight = self.counters.weight,
            entries = self.history.len(),
            "session restored"
        );
    }

    /// Write counters and history to storage.
    pub fn persist(&self) -> Result<(), StorageError> {
        self.persist_counters()?;
        self.persist_history()
    }

    fn update_counters(&mut self, op: &'static str, update: impl FnOnce(Counters) -> Counters) {
        let next = update(self.counters);
        if next == self.counters {
            trace!(op, "counters unchanged");
            return;
        }

        self.counters = next;
        debug!(
            op,
            reps = next.reps,
            sets = next.sets,
            weight = next.weight,
            "counters updated"
        );
        if let Err(e) = self.persist_counters() {
            warn!(op, error = %e, "failed to persist counters");
        }
    }

    fn persist_or_warn(&self) {
        if let Err(e) = self.persist() {
            warn!(error = %e, "failed to persist session");
        }
    }

    fn persist_counters(&self) -> Result<(), StorageError> {
        save_record(
            self.storage.as_ref(),
            &self.config.counters_key,
            self.config.codec,
            &self.counters,
        )
    }

    fn persist_history(&self) -> Result<(), StorageError> {
        save_record(
            self.storage.as_ref(),
            &self.config.history_key,
            self.config.codec,
            &self.history,
        )
    }

    fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match load_record(self.storage.as_ref(), key, self.config.codec) {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!(key, "no persisted record");
                T::default()
            }
            Err(e) => {
                warn!(key, error = %e, "discarding unreadable record");
                T::default()
            }
        }
    }

    fn cancel_schedule(&mut self) {
        if self.schedule.take().is_some() {
            trace!("tick schedule cancelled");
        }
    }
}

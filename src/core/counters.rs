//! Session counters for reps, sets and weight.
//!
//! Counters are small `Copy` values. Every operation returns a new value
//! instead of mutating in place, so callers decide when a change becomes
//! visible (and when it gets persisted).

use serde::{Deserialize, Serialize};

/// Default weight increment in kilograms.
pub const DEFAULT_WEIGHT_STEP: f64 = 2.5;

/// The three numeric values of a workout session.
///
/// None of the fields can go below zero: decrementing at zero is a no-op
/// and a weight decrement that would cross zero lands exactly on `0.0`.
///
/// # Example
///
/// ```rust
/// use repcount::core::{Counters, DEFAULT_WEIGHT_STEP};
///
/// let counters = Counters::new()
///     .increment_reps()
///     .increment_reps()
///     .increase_weight(DEFAULT_WEIGHT_STEP);
///
/// assert_eq!(counters.reps, 2);
/// assert_eq!(counters.weight, 2.5);
///
/// // Decrementing at zero leaves the value untouched.
/// let counters = counters.decrement_sets();
/// assert_eq!(counters.sets, 0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Counters {
    /// Repetitions in the current set
    pub reps: u32,
    /// Sets completed so far
    pub sets: u32,
    /// Working weight in kilograms
    pub weight: f64,
}

impl Counters {
    /// All counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn increment_reps(self) -> Self {
        Self {
            reps: self.reps.saturating_add(1),
            ..self
        }
    }

    #[must_use]
    pub fn decrement_reps(self) -> Self {
        Self {
            reps: self.reps.saturating_sub(1),
            ..self
        }
    }

    #[must_use]
    pub fn increment_sets(self) -> Self {
        Self {
            sets: self.sets.saturating_add(1),
            ..self
        }
    }

    #[must_use]
    pub fn decrement_sets(self) -> Self {
        Self {
            sets: self.sets.saturating_sub(1),
            ..self
        }
    }

    /// Add `step` kilograms.
    #[must_use]
    pub fn increase_weight(self, step: f64) -> Self {
        Self {
            weight: snap_to_step(self.weight + step, step),
            ..self
        }
    }

    /// Remove `step` kilograms, clamping at zero.
    #[must_use]
    pub fn decrease_weight(self, step: f64) -> Self {
        Self {
            weight: snap_to_step(self.weight - step, step).max(0.0),
            ..self
        }
    }

    /// Counters after a set has been saved: one more set, reps and weight
    /// cleared for the next one.
    #[must_use]
    pub fn after_save(self) -> Self {
        Self {
            reps: 0,
            sets: self.sets.saturating_add(1),
            weight: 0.0,
        }
    }

    /// Repair values that cannot be produced by the operations above.
    ///
    /// Persisted data may have been edited by hand; a negative, NaN or
    /// infinite weight is replaced with `0.0`.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let weight = if self.weight.is_finite() && self.weight > 0.0 {
            self.weight
        } else {
            0.0
        };
        Self { weight, ..self }
    }

    /// Check whether every counter is zero.
    pub fn is_zero(&self) -> bool {
        self.reps == 0 && self.sets == 0 && self.weight == 0.0
    }
}

/// Largest distance from a whole number of steps still treated as
/// rounding drift.
const STEP_TOLERANCE: f64 = 1e-9;

/// Pull `weight` onto the nearest multiple of `step` when it is only off by
/// floating-point drift. Weights genuinely between steps are left alone.
fn snap_to_step(weight: f64, step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return weight;
    }
    let steps = weight / step;
    let whole = steps.round();
    if (steps - whole).abs() < STEP_TOLERANCE {
        whole * step
    } else {
        weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_counters_are_zero() {
        let counters = Counters::new();
        assert!(counters.is_zero());
        assert_eq!(counters, Counters::default());
    }

    #[test]
    fn reps_and_sets_step_by_one() {
        let counters = Counters::new()
            .increment_reps()
            .increment_reps()
            .increment_sets();

        assert_eq!(counters.reps, 2);
        assert_eq!(counters.sets, 1);

        let counters = counters.decrement_reps().decrement_sets();
        assert_eq!(counters.reps, 1);
        assert_eq!(counters.sets, 0);
    }

    #[test]
    fn decrement_at_zero_is_noop() {
        let counters = Counters::new().decrement_reps().decrement_sets();
        assert_eq!(counters, Counters::new());
    }

    #[test]
    fn weight_steps_and_clamps() {
        let counters = Counters::new()
            .increase_weight(DEFAULT_WEIGHT_STEP)
            .increase_weight(DEFAULT_WEIGHT_STEP);
        assert_eq!(counters.weight, 5.0);

        let counters = counters.decrease_weight(DEFAULT_WEIGHT_STEP);
        assert_eq!(counters.weight, 2.5);

        let counters = counters
            .decrease_weight(DEFAULT_WEIGHT_STEP)
            .decrease_weight(DEFAULT_WEIGHT_STEP);
        assert_eq!(counters.weight, 0.0);
    }

    #[test]
    fn weight_decrement_crossing_zero_lands_on_zero() {
        let counters = Counters {
            weight: 1.0,
            ..Counters::new()
        };
        assert_eq!(counters.decrease_weight(DEFAULT_WEIGHT_STEP).weight, 0.0);
    }

    #[test]
    fn inexact_steps_return_to_zero() {
        let mut counters = Counters::new();
        for _ in 0..3 {
            counters = counters.increase_weight(0.1);
        }
        for _ in 0..3 {
            counters = counters.decrease_weight(0.1);
        }
        assert_eq!(counters.weight, 0.0);
    }

    #[test]
    fn n_steps_land_on_the_step_grid() {
        for step in [0.1, 0.3, 0.7, 1.1, 0.15, 0.35] {
            let mut counters = Counters::new();
            for n in 1..=50u32 {
                counters = counters.increase_weight(step);
                assert_eq!(counters.weight, f64::from(n) * step, "step {step} n {n}");
            }
        }
    }

    #[test]
    fn off_grid_weight_is_kept() {
        let counters = Counters {
            weight: 1.0,
            ..Counters::new()
        };
        assert_eq!(counters.increase_weight(DEFAULT_WEIGHT_STEP).weight, 3.5);
    }

    #[test]
    fn increments_saturate() {
        let counters = Counters {
            reps: u32::MAX,
            sets: u32::MAX,
            weight: 0.0,
        };
        let counters = counters.increment_reps().increment_sets();
        assert_eq!(counters.reps, u32::MAX);
        assert_eq!(counters.sets, u32::MAX);
    }

    #[test]
    fn after_save_advances_set_and_clears_rest() {
        let counters = Counters {
            reps: 3,
            sets: 2,
            weight: 5.0,
        };
        let next = counters.after_save();
        assert_eq!(
            next,
            Counters {
                reps: 0,
                sets: 3,
                weight: 0.0
            }
        );
    }

    #[test]
    fn sanitized_repairs_bad_weight() {
        for weight in [-5.0, f64::NAN, f64::INFINITY] {
            let counters = Counters {
                reps: 1,
                sets: 1,
                weight,
            };
            assert_eq!(counters.sanitized().weight, 0.0);
        }

        let good = Counters {
            reps: 1,
            sets: 1,
            weight: 7.5,
        };
        assert_eq!(good.sanitized(), good);
    }

    #[test]
    fn counters_serialize_with_field_names() {
        let counters = Counters {
            reps: 3,
            sets: 2,
            weight: 5.0,
        };
        let json = serde_json::to_value(counters).unwrap();
        assert_eq!(json["reps"], 3);
        assert_eq!(json["sets"], 2);
        assert_eq!(json["weight"], 5.0);
    }
}

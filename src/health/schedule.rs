//! Fixed ages at which the frailty index is sampled

use crate::error::{HealthError, HealthResult};

/// Ordered ages `0, step, 2*step, ...` shared read-only by every individual
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSchedule {
    step: f64,
    ages: Vec<f64>,
}

impl SampleSchedule {
    /// Build a schedule of `length` ages spaced `step` apart, starting at 0
    pub fn new(step: f64, length: usize) -> HealthResult<Self> {
        if !step.is_finite() || step <= 0.0 || length == 0 {
            return Err(HealthError::InvalidSchedule { step, length });
        }

        // Multiply rather than accumulate so late ages don't drift
        let ages = (0..length).map(|i| i as f64 * step).collect();

        Ok(Self { step, ages })
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of sample ages (L)
    pub fn len(&self) -> usize {
        self.ages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ages.is_empty()
    }

    /// Age at schedule index `index`, if within the schedule
    pub fn age(&self, index: usize) -> Option<f64> {
        self.ages.get(index).copied()
    }

    pub fn ages(&self) -> &[f64] {
        &self.ages
    }
}

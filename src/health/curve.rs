//! Per-individual FI curve sampled at the schedule ages
//!
//! Every finished curve has exactly `capacity` entries so curves from a whole
//! population can be averaged column by column. Ages the individual never
//! reached hold [`UNSAMPLED`].

use super::config::HUB_NODE_COUNT;
use super::deficits::FrailtyIndex;
use super::schedule::SampleSchedule;
use crate::error::{HealthError, HealthResult};

/// Marker for a curve entry the individual did not live to see
pub const UNSAMPLED: f64 = -1.0;

/// Two parallel FI series (all nodes and hub nodes) with a cursor into the schedule
#[derive(Debug, Clone, PartialEq)]
pub struct FiCurve {
    fi_tot: Vec<f64>,
    fi_hub: Vec<f64>,
    /// Next unfilled schedule index
    cursor: usize,
    capacity: usize,
}

impl FiCurve {
    /// New curve holding FI = 0 at age 0
    pub fn new(capacity: usize) -> Self {
        let mut curve = Self {
            fi_tot: Vec::with_capacity(capacity),
            fi_hub: Vec::with_capacity(capacity),
            cursor: 0,
            capacity,
        };
        curve.reset();
        curve
    }

    /// Curve sized to a schedule
    pub fn for_schedule(schedule: &SampleSchedule) -> Self {
        Self::new(schedule.len())
    }

    /// Clear both series and start again from a healthy birth
    pub fn reset(&mut self) {
        self.fi_tot.clear();
        self.fi_hub.clear();
        self.fi_tot.push(FrailtyIndex::HEALTHY.tot);
        self.fi_hub.push(FrailtyIndex::HEALTHY.hub);
        self.cursor = 1;
    }

    /// Append `deficits_tot / node_count` and `deficits_hub / 30` at the cursor
    pub fn sample_fi(&mut self, node_count: u32, deficits_tot: u32, deficits_hub: u32) -> HealthResult<()> {
        let fi = FrailtyIndex::from_counts(deficits_tot, node_count, deficits_hub, HUB_NODE_COUNT)?;
        self.push(fi)
    }

    /// Append an already-computed frailty index at the cursor
    pub fn push(&mut self, fi: FrailtyIndex) -> HealthResult<()> {
        if self.cursor >= self.capacity {
            return Err(HealthError::CurveOverflow { capacity: self.capacity });
        }
        self.fi_tot.push(fi.tot);
        self.fi_hub.push(fi.hub);
        self.cursor += 1;
        Ok(())
    }

    /// Pad both series with [`UNSAMPLED`] up to full capacity
    pub fn fill_remaining(&mut self) {
        // Resizes from the cursor so both series end up exactly `capacity` long
        self.fi_tot.resize(self.capacity, UNSAMPLED);
        self.fi_hub.resize(self.capacity, UNSAMPLED);
    }

    /// Age of the next unfilled entry, or `None` once the schedule is used up
    pub fn next_sample_time(&self, schedule: &SampleSchedule) -> Option<f64> {
        if self.cursor >= self.capacity {
            return None;
        }
        schedule.age(self.cursor)
    }

    /// Number of entries actually sampled (including age 0)
    pub fn sampled(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.cursor >= self.capacity
    }

    pub fn fi_tot(&self) -> &[f64] {
        &self.fi_tot
    }

    pub fn fi_hub(&self) -> &[f64] {
        &self.fi_hub
    }

    /// FItot with unsampled entries as NaN, for tabular export
    pub fn tot_as_nan(&self) -> Vec<f64> {
        self.fi_tot.iter().map(|&v| sentinel_to_nan(v)).collect()
    }

    /// FI30 with unsampled entries as NaN, for tabular export
    pub fn hub_as_nan(&self) -> Vec<f64> {
        self.fi_hub.iter().map(|&v| sentinel_to_nan(v)).collect()
    }
}

/// Map the [`UNSAMPLED`] marker to NaN, leaving real values as they are
pub fn sentinel_to_nan(value: f64) -> f64 {
    if value == UNSAMPLED {
        f64::NAN
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_curve_starts_healthy() {
        let curve = FiCurve::new(150);
        assert_eq!(curve.fi_tot(), &[0.0]);
        assert_eq!(curve.fi_hub(), &[0.0]);
        assert_eq!(curve.sampled(), 1);
    }

    #[test]
    fn test_sample_appends_one_entry() {
        let mut curve = FiCurve::new(150);
        curve.sample_fi(100, 10, 6).unwrap();
        assert_eq!(curve.fi_tot(), &[0.0, 0.10]);
        assert_eq!(curve.fi_hub(), &[0.0, 0.2]);
        assert_eq!(curve.sampled(), 2);

        curve.sample_fi(100, 25, 9).unwrap();
        // Earlier entries are untouched
        assert_eq!(curve.fi_tot(), &[0.0, 0.10, 0.25]);
        assert_eq!(curve.fi_hub(), &[0.0, 0.2, 0.3]);
        assert_eq!(curve.sampled(), 3);
    }

    #[test]
    fn test_sample_rejects_zero_nodes() {
        let mut curve = FiCurve::new(150);
        assert!(matches!(curve.sample_fi(0, 0, 0), Err(HealthError::InvalidNodeCount)));
        assert_eq!(curve.sampled(), 1);
    }

    #[test]
    fn test_overflow_is_reported() {
        let mut curve = FiCurve::new(3);
        curve.sample_fi(10, 1, 0).unwrap();
        curve.sample_fi(10, 2, 0).unwrap();
        assert!(curve.is_full());
        assert!(matches!(
            curve.sample_fi(10, 3, 0),
            Err(HealthError::CurveOverflow { capacity: 3 })
        ));
        assert_eq!(curve.fi_tot().len(), 3);
    }

    #[test]
    fn test_fill_after_five_samples() {
        let mut curve = FiCurve::new(150);
        for d in 1..5 {
            curve.sample_fi(100, d, 0).unwrap();
        }
        assert_eq!(curve.sampled(), 5);
        curve.fill_remaining();

        assert_eq!(curve.fi_tot().len(), 150);
        assert_eq!(curve.fi_hub().len(), 150);
        assert_eq!(&curve.fi_tot()[..5], &[0.0, 0.01, 0.02, 0.03, 0.04]);
        assert!(curve.fi_tot()[5..].iter().all(|&v| v == UNSAMPLED));
        assert!(curve.fi_hub()[5..].iter().all(|&v| v == UNSAMPLED));
    }

    #[test]
    fn test_fill_full_curve_is_noop() {
        let mut curve = FiCurve::new(2);
        curve.sample_fi(10, 5, 0).unwrap();
        curve.fill_remaining();
        assert_eq!(curve.fi_tot(), &[0.0, 0.5]);
    }

    #[test]
    fn test_reset_after_fill() {
        let mut curve = FiCurve::new(10);
        curve.sample_fi(10, 5, 3).unwrap();
        curve.fill_remaining();
        curve.reset();
        assert_eq!(curve.fi_tot(), &[0.0]);
        assert_eq!(curve.fi_hub(), &[0.0]);
        assert_eq!(curve.sampled(), 1);
    }

    #[test]
    fn test_next_sample_time_follows_cursor() {
        let schedule = SampleSchedule::new(2.0, 3).unwrap();
        let mut curve = FiCurve::for_schedule(&schedule);
        assert_eq!(curve.next_sample_time(&schedule), Some(2.0));
        curve.sample_fi(10, 0, 0).unwrap();
        assert_eq!(curve.next_sample_time(&schedule), Some(4.0));
        curve.sample_fi(10, 0, 0).unwrap();
        assert_eq!(curve.next_sample_time(&schedule), None);
    }

    #[test]
    fn test_nan_view() {
        let mut curve = FiCurve::new(3);
        curve.sample_fi(10, 2, 3).unwrap();
        curve.fill_remaining();
        let tot = curve.tot_as_nan();
        assert_eq!(&tot[..2], &[0.0, 0.2]);
        assert!(tot[2].is_nan());
        assert!(curve.hub_as_nan()[2].is_nan());
    }
}

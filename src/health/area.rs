//! Running area under the (1 - FI) curve, used for QALY

use super::deficits::FrailtyIndex;
use super::summary::Qaly;
use crate::error::{HealthError, HealthResult};

/// Piecewise-constant integral of (1 - FItot) and (1 - FI30) over time
///
/// Integration runs from `t_low` to each new time, then moves `t_low` forward.
/// Calling [`AreaAccumulator::add_area`] twice with the same time adds nothing
/// the second time. While inactive, time is still tracked but no area is added.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AreaAccumulator {
    area: f64,
    area_hub: f64,
    t_low: f64,
    active: bool,
}

impl AreaAccumulator {
    /// Accumulator integrating from time 0
    pub fn from_birth() -> Self {
        Self {
            active: true,
            ..Default::default()
        }
    }

    /// Accumulator that adds no area until [`AreaAccumulator::begin_at`] is called
    pub fn inactive() -> Self {
        Self::default()
    }

    /// Start integration at `time` without adding area
    pub fn begin_at(&mut self, time: f64) -> HealthResult<()> {
        self.check_time(time)?;
        self.t_low = time;
        self.active = true;
        Ok(())
    }

    fn check_time(&self, time: f64) -> HealthResult<()> {
        if !time.is_finite() {
            return Err(HealthError::InvalidTime(time));
        }
        if time < self.t_low {
            return Err(HealthError::TimeReversed { time, t_low: self.t_low });
        }
        Ok(())
    }

    /// Add `(1 - FI) * (time - t_low)` for both FI variants and advance `t_low`
    pub fn add_area(&mut self, time: f64, fi: FrailtyIndex) -> HealthResult<()> {
        self.check_time(time)?;
        if !self.active {
            self.t_low = time;
            return Ok(());
        }

        let (height, height_hub) = fi.quality_weights();
        let width = time - self.t_low;
        self.area += height * width;
        self.area_hub += height_hub * width;
        self.t_low = time;
        Ok(())
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn area_hub(&self) -> f64 {
        self.area_hub
    }

    pub fn t_low(&self) -> f64 {
        self.t_low
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn qaly(&self) -> Qaly {
        Qaly {
            tot: self.area,
            hub: self.area_hub,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_healthy_interval_adds_full_width() {
        let mut acc = AreaAccumulator::from_birth();
        let fi = FrailtyIndex::from_counts(0, 10, 0, 30).unwrap();
        acc.add_area(2.0, fi).unwrap();
        assert_eq!(acc.area(), 2.0);
        assert_eq!(acc.area_hub(), 2.0);
        assert_eq!(acc.t_low(), 2.0);
    }

    #[test]
    fn test_damage_reduces_height() {
        let mut acc = AreaAccumulator::from_birth();
        acc.add_area(10.0, FrailtyIndex::HEALTHY).unwrap();
        let fi = FrailtyIndex::from_counts(25, 100, 15, 30).unwrap();
        acc.add_area(14.0, fi).unwrap();
        assert_relative_eq!(acc.area(), 10.0 + 0.75 * 4.0);
        assert_relative_eq!(acc.area_hub(), 10.0 + 0.5 * 4.0);
    }

    #[test]
    fn test_repeated_time_is_idempotent() {
        let mut acc = AreaAccumulator::from_birth();
        let fi = FrailtyIndex::from_counts(5, 10, 0, 30).unwrap();
        acc.add_area(3.0, fi).unwrap();
        let once = acc.area();
        acc.add_area(3.0, fi).unwrap();
        acc.add_area(3.0, fi).unwrap();
        assert_eq!(acc.area(), once);
    }

    #[test]
    fn test_area_is_monotone_in_time() {
        let fi = FrailtyIndex::from_counts(7, 10, 20, 30).unwrap();
        let mut previous = 0.0;
        for t in [0.5, 1.0, 4.0, 4.0, 9.25] {
            let mut acc = AreaAccumulator::from_birth();
            acc.add_area(t, fi).unwrap();
            assert!(acc.area() >= previous);
            previous = acc.area();
        }
    }

    #[test]
    fn test_time_cannot_go_backwards() {
        let mut acc = AreaAccumulator::from_birth();
        acc.add_area(5.0, FrailtyIndex::HEALTHY).unwrap();
        assert!(matches!(
            acc.add_area(4.0, FrailtyIndex::HEALTHY),
            Err(HealthError::TimeReversed { .. })
        ));
        assert_eq!(acc.area(), 5.0);
    }

    #[test]
    fn test_non_finite_time_is_rejected() {
        let mut acc = AreaAccumulator::from_birth();
        acc.add_area(2.0, FrailtyIndex::HEALTHY).unwrap();
        for time in [f64::NAN, f64::INFINITY] {
            assert!(matches!(
                acc.add_area(time, FrailtyIndex::HEALTHY),
                Err(HealthError::InvalidTime(_))
            ));
        }
        assert_eq!(acc.area(), 2.0);
        assert_eq!(acc.t_low(), 2.0);

        acc.add_area(5.0, FrailtyIndex::HEALTHY).unwrap();
        assert_eq!(acc.area(), 5.0);
        assert!(acc.begin_at(f64::NAN).is_err());
    }

    #[test]
    fn test_inactive_still_tracks_time() {
        let mut acc = AreaAccumulator::inactive();
        acc.add_area(10.0, FrailtyIndex::HEALTHY).unwrap();
        assert_eq!(acc.area(), 0.0);
        assert_eq!(acc.t_low(), 10.0);

        assert!(matches!(
            acc.add_area(5.0, FrailtyIndex::HEALTHY),
            Err(HealthError::TimeReversed { .. })
        ));
        assert!(matches!(acc.begin_at(5.0), Err(HealthError::TimeReversed { .. })));
        assert!(!acc.is_active());
    }

    #[test]
    fn test_inactive_until_begun() {
        let mut acc = AreaAccumulator::inactive();
        acc.add_area(30.0, FrailtyIndex::HEALTHY).unwrap();
        assert_eq!(acc.area(), 0.0);

        acc.begin_at(30.0).unwrap();
        acc.add_area(32.5, FrailtyIndex::HEALTHY).unwrap();
        assert_eq!(acc.qaly(), Qaly { tot: 2.5, hub: 2.5 });
    }
}

//! Population-level averages over finished individuals
//!
//! Curves all have the schedule length, so averaging is done column by
//! column, skipping ages an individual never reached.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::events::IndividualResult;
use crate::health::UNSAMPLED;

/// Mean health measures across a cohort
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortSummary {
    /// Number of individuals averaged
    pub individuals: usize,

    /// Mean FItot at each schedule age (NaN where nobody was alive)
    pub mean_fi_tot: Vec<f64>,

    /// Mean FI30 at each schedule age (NaN where nobody was alive)
    pub mean_fi_hub: Vec<f64>,

    /// Number of individuals alive at each schedule age
    pub alive: Vec<usize>,

    pub mean_qaly_tot: f64,
    pub mean_qaly_hub: f64,

    /// Individuals who lived to the disease start / end
    pub reached_disease_start: usize,
    pub reached_disease_end: usize,

    pub too_sick: usize,
}

impl CohortSummary {
    /// Average a cohort's results
    pub fn from_results(results: &[IndividualResult]) -> Self {
        let length = results.iter().map(|r| r.fi_tot.len()).max().unwrap_or(0);

        let columns: Vec<(f64, f64, usize)> = (0..length)
            .into_par_iter()
            .map(|age| column_mean(results, age))
            .collect();

        let individuals = results.len();
        let (mean_qaly_tot, mean_qaly_hub) = if individuals == 0 {
            (0.0, 0.0)
        } else {
            let n = individuals as f64;
            (
                results.iter().map(|r| r.summary.qaly_tot()).sum::<f64>() / n,
                results.iter().map(|r| r.summary.qaly_hub()).sum::<f64>() / n,
            )
        };

        Self {
            individuals,
            mean_fi_tot: columns.iter().map(|c| c.0).collect(),
            mean_fi_hub: columns.iter().map(|c| c.1).collect(),
            alive: columns.iter().map(|c| c.2).collect(),
            mean_qaly_tot,
            mean_qaly_hub,
            reached_disease_start: results.iter().filter(|r| r.summary.start().is_some()).count(),
            reached_disease_end: results.iter().filter(|r| r.summary.end().is_some()).count(),
            too_sick: results.iter().filter(|r| r.too_sick).count(),
        }
    }
}

fn column_mean(results: &[IndividualResult], age: usize) -> (f64, f64, usize) {
    let mut sum_tot = 0.0;
    let mut sum_hub = 0.0;
    let mut count = 0;

    for result in results {
        match (result.fi_tot.get(age), result.fi_hub.get(age)) {
            (Some(&tot), Some(&hub)) if tot != UNSAMPLED && hub != UNSAMPLED => {
                sum_tot += tot;
                sum_hub += hub;
                count += 1;
            }
            _ => {}
        }
    }

    if count == 0 {
        (f64::NAN, f64::NAN, 0)
    } else {
        (sum_tot / count as f64, sum_hub / count as f64, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventKind, LifeEvent, ReplayEngine};
    use crate::health::HealthConfig;
    use approx::assert_relative_eq;

    fn death(individual: u32, time: f64, deficits: (u32, u32)) -> LifeEvent {
        LifeEvent {
            individual,
            time,
            kind: EventKind::Death,
            deficits: Some(deficits),
        }
    }

    #[test]
    fn test_cohort_means_skip_unreached_ages() {
        let config = HealthConfig {
            curve_length: 5,
            ..HealthConfig::with_nodes(100)
        };
        let engine = ReplayEngine::new(config).unwrap();
        let events = [
            LifeEvent {
                individual: 1,
                time: 0.5,
                kind: EventKind::Damage,
                deficits: Some((20, 0)),
            },
            death(1, 3.5, (40, 0)),
            death(2, 1.5, (10, 0)),
        ];
        let results = engine.replay_cohort(&events).unwrap();
        let summary = CohortSummary::from_results(&results);

        assert_eq!(summary.individuals, 2);
        assert_eq!(summary.alive, vec![2, 2, 1, 1, 0]);
        // Age 1: individual 1 at 0.2, individual 2 still healthy
        assert_relative_eq!(summary.mean_fi_tot[1], 0.1);
        assert_relative_eq!(summary.mean_fi_tot[2], 0.2);
        assert!(summary.mean_fi_tot[4].is_nan());

        // QALY: 0.5 + 3.0 * 0.8 = 2.9 and 1.5
        assert_relative_eq!(summary.mean_qaly_tot, (2.9 + 1.5) / 2.0, epsilon = 1e-12);
        assert_eq!(summary.reached_disease_start, 0);
    }

    #[test]
    fn test_empty_cohort() {
        let summary = CohortSummary::from_results(&[]);
        assert_eq!(summary.individuals, 0);
        assert!(summary.mean_fi_tot.is_empty());
        assert_eq!(summary.mean_qaly_tot, 0.0);
    }
}

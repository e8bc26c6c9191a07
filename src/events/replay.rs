//! Replay recorded life events through a reusable health state

use std::collections::BTreeMap;
use std::sync::Arc;

use log::{debug, info};
use rayon::prelude::*;

use super::{EventKind, LifeEvent};
use crate::error::{HealthError, HealthResult};
use crate::health::{HealthConfig, HealthState, SampleSchedule, SummaryRecord};

/// Owned results for one individual, detached from the state that produced them
#[derive(Debug, Clone, PartialEq)]
pub struct IndividualResult {
    pub individual: u32,
    pub summary: SummaryRecord,
    pub fi_tot: Vec<f64>,
    pub fi_hub: Vec<f64>,
    pub too_sick: bool,
}

/// Feeds event logs into [`HealthState`]s built from one config and schedule
#[derive(Debug, Clone)]
pub struct ReplayEngine {
    config: HealthConfig,
    schedule: Arc<SampleSchedule>,
}

impl ReplayEngine {
    /// Create an engine, validating the config and building the shared schedule
    pub fn new(config: HealthConfig) -> HealthResult<Self> {
        config.validate()?;
        let schedule = Arc::new(config.build_schedule()?);
        Ok(Self { config, schedule })
    }

    pub fn config(&self) -> &HealthConfig {
        &self.config
    }

    pub fn schedule(&self) -> &SampleSchedule {
        &self.schedule
    }

    /// A fresh state sharing this engine's schedule
    pub fn new_state(&self) -> HealthResult<HealthState> {
        HealthState::new(self.config.clone(), Arc::clone(&self.schedule))
    }

    /// Replay one individual's events, in order, on a reused state
    ///
    /// The state is reset first. The last event must be the death.
    pub fn replay_individual(
        &self,
        state: &mut HealthState,
        individual: u32,
        events: &[LifeEvent],
    ) -> HealthResult<IndividualResult> {
        state.reset();

        for event in events {
            if state.summary().is_some() {
                return Err(HealthError::Parse(format!(
                    "individual {} has events after death",
                    individual
                )));
            }

            // Area and samples up to this time use the counts from before the event
            state.advance_to(event.time)?;
            if let Some((tot, hub)) = event.deficits {
                state.set_deficits(tot, hub)?;
            }

            match event.kind {
                EventKind::Damage => {}
                EventKind::DiseaseStart => state.set_fi_start()?,
                EventKind::DiseaseEnd => state.set_fi_end(event.time)?,
                EventKind::TooSick => state.mark_too_sick()?,
                EventKind::Death => state.die(event.time)?,
            }
        }

        let too_sick = state.too_sick();
        let outcome = state.export().map_err(|_| {
            HealthError::Parse(format!("individual {} has no death event", individual))
        })?;

        debug!("Individual {}: {}", individual, outcome.summary);

        Ok(IndividualResult {
            individual,
            summary: outcome.summary,
            fi_tot: outcome.curve.fi_tot().to_vec(),
            fi_hub: outcome.curve.fi_hub().to_vec(),
            too_sick,
        })
    }

    /// Replay every individual in `events`, in parallel, ordered by individual id
    ///
    /// Each worker thread reuses a single [`HealthState`]; only the schedule is shared.
    pub fn replay_cohort(&self, events: &[LifeEvent]) -> HealthResult<Vec<IndividualResult>> {
        let grouped = group_by_individual(events);
        info!("Replaying {} individuals", grouped.len());

        grouped
            .into_par_iter()
            .map_init(
                || self.new_state(),
                |state, (individual, lives)| {
                    let state = state
                        .as_mut()
                        .map_err(|e| HealthError::Config(e.to_string()))?;
                    self.replay_individual(state, individual, &lives)
                },
            )
            .collect()
    }
}

/// Group events per individual, keeping file order within each individual
fn group_by_individual(events: &[LifeEvent]) -> Vec<(u32, Vec<LifeEvent>)> {
    let mut grouped: BTreeMap<u32, Vec<LifeEvent>> = BTreeMap::new();
    for event in events {
        grouped.entry(event.individual).or_default().push(*event);
    }
    grouped.into_iter().collect()
}

//! Health state tracking for a single individual

use std::sync::Arc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::area::AreaAccumulator;
use super::config::{HealthConfig, QalyOrigin, HUB_NODE_COUNT};
use super::curve::FiCurve;
use super::deficits::{DeficitCounters, FrailtyIndex};
use super::schedule::SampleSchedule;
use super::summary::{Checkpoints, SummaryRecord};
use crate::error::{HealthError, HealthResult};
use crate::hubs::HubNodes;

/// Where an individual is in their life cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifePhase {
    /// Counters, area and curve are being updated
    Alive,
    /// Death recorded; summary and curve are final
    Dead,
    /// Outcome handed to export; nothing may change until reset
    Exported,
}

impl Default for LifePhase {
    fn default() -> Self {
        LifePhase::Alive
    }
}

/// Final results for one individual, borrowed from the [`HealthState`]
#[derive(Debug, Clone, Copy)]
pub struct Outcome<'a> {
    pub summary: SummaryRecord,
    pub curve: &'a FiCurve,
}

/// Live health measures for the individual currently being simulated
///
/// One instance is reused for a whole population: [`HealthState::reset`]
/// before each new life clears every counter in place.
#[derive(Debug, Clone)]
pub struct HealthState {
    config: HealthConfig,
    schedule: Arc<SampleSchedule>,
    counters: DeficitCounters,
    area: AreaAccumulator,
    checkpoints: Checkpoints,
    summary: Option<SummaryRecord>,
    curve: FiCurve,
    too_sick: bool,
    phase: LifePhase,
}

impl HealthState {
    /// Create a state for a validated config, sharing `schedule` with other states
    pub fn new(config: HealthConfig, schedule: Arc<SampleSchedule>) -> HealthResult<Self> {
        config.validate()?;
        if schedule.len() != config.curve_length {
            return Err(HealthError::InvalidSchedule {
                step: schedule.step(),
                length: schedule.len(),
            });
        }

        let mut state = Self {
            counters: DeficitCounters::new(config.node_count, HUB_NODE_COUNT),
            area: AreaAccumulator::inactive(),
            checkpoints: Checkpoints::default(),
            summary: None,
            curve: FiCurve::for_schedule(&schedule),
            too_sick: false,
            phase: LifePhase::Alive,
            config,
            schedule,
        };
        state.reset();
        Ok(state)
    }

    /// Create a state with its own schedule built from `config`
    pub fn from_config(config: HealthConfig) -> HealthResult<Self> {
        config.validate()?;
        let schedule = Arc::new(config.build_schedule()?);
        Self::new(config, schedule)
    }

    /// Start a new individual: healthy, alive, nothing recorded
    pub fn reset(&mut self) {
        if self.phase == LifePhase::Dead {
            warn!("Discarding outcome that was never exported");
        }

        self.counters.reset();
        self.too_sick = false;
        self.checkpoints.clear();
        self.summary = None;
        self.area = match self.config.qaly_origin {
            QalyOrigin::Birth => AreaAccumulator::from_birth(),
            QalyOrigin::DiseaseEnd => AreaAccumulator::inactive(),
        };
        self.curve.reset();
        self.phase = LifePhase::Alive;
    }

    pub fn phase(&self) -> LifePhase {
        self.phase
    }

    pub fn config(&self) -> &HealthConfig {
        &self.config
    }

    pub fn schedule(&self) -> &SampleSchedule {
        &self.schedule
    }

    pub fn counters(&self) -> &DeficitCounters {
        &self.counters
    }

    pub fn area(&self) -> &AreaAccumulator {
        &self.area
    }

    pub fn checkpoints(&self) -> &Checkpoints {
        &self.checkpoints
    }

    pub fn curve(&self) -> &FiCurve {
        &self.curve
    }

    /// Final summary, available once the individual has died
    pub fn summary(&self) -> Option<&SummaryRecord> {
        self.summary.as_ref()
    }

    pub fn too_sick(&self) -> bool {
        self.too_sick
    }

    /// Current frailty index from the live counters
    pub fn frailty(&self) -> HealthResult<FrailtyIndex> {
        self.counters.frailty()
    }

    fn require(&self, phase: LifePhase, operation: &'static str) -> HealthResult<()> {
        if self.phase != phase {
            return Err(HealthError::InvalidPhase {
                operation,
                phase: self.phase,
            });
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Counter updates
    // ---------------------------------------------------------------------

    /// Record that `node` has just been damaged
    ///
    /// Each node must be reported at most once per life.
    pub fn damage_node(&mut self, node: usize, hubs: &HubNodes) -> HealthResult<()> {
        self.require(LifePhase::Alive, "damage node")?;
        if node >= self.config.node_count as usize {
            return Err(HealthError::UnknownNode(node));
        }
        self.counters.damage(hubs.contains(node))
    }

    /// Overwrite the damage counts with values tracked by the simulation
    pub fn set_deficits(&mut self, deficits_tot: u32, deficits_hub: u32) -> HealthResult<()> {
        self.require(LifePhase::Alive, "set deficits")?;
        self.counters.set(deficits_tot, deficits_hub)
    }

    /// Flag the individual as unable to acquire the disease
    pub fn mark_too_sick(&mut self) -> HealthResult<()> {
        self.require(LifePhase::Alive, "mark too sick")?;
        self.too_sick = true;
        Ok(())
    }

    /// Set `too_sick` once fewer than `min_undamaged` nodes remain healthy
    ///
    /// The flag never clears before the next reset.
    pub fn update_too_sick(&mut self, min_undamaged: u32) -> HealthResult<bool> {
        self.require(LifePhase::Alive, "update too sick")?;
        if self.counters.undamaged() < min_undamaged {
            self.too_sick = true;
        }
        Ok(self.too_sick)
    }

    // ---------------------------------------------------------------------
    // Time-driven measures
    // ---------------------------------------------------------------------

    /// Integrate (1 - FI) from the last integration time up to `time`
    pub fn add_area(&mut self, time: f64) -> HealthResult<()> {
        self.require(LifePhase::Alive, "add area")?;
        let fi = self.counters.frailty()?;
        self.area.add_area(time, fi)
    }

    /// Append the current FI to the curve
    pub fn sample_fi(&mut self) -> HealthResult<()> {
        self.require(LifePhase::Alive, "sample FI")?;
        let fi = self.counters.frailty()?;
        self.curve.push(fi)
    }

    /// Age at which the curve next needs a sample
    pub fn next_sample_time(&self) -> Option<f64> {
        self.curve.next_sample_time(&self.schedule)
    }

    /// Bring area and curve up to `time` using the counters as they stand
    ///
    /// Call before applying any damage that happens at `time`. Every schedule
    /// age at or before `time` gets a sample; ages past the end of the
    /// schedule are not sampled.
    pub fn advance_to(&mut self, time: f64) -> HealthResult<()> {
        self.add_area(time)?;

        let mut crossed = 0;
        while let Some(age) = self.next_sample_time() {
            if age > time {
                break;
            }
            self.sample_fi()?;
            crossed += 1;
        }
        if crossed > 0 {
            debug!("Sampled FI {} time(s) up to t={}", crossed, time);
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Checkpoints
    // ---------------------------------------------------------------------

    /// Record FI at the start of the disease
    pub fn set_fi_start(&mut self) -> HealthResult<()> {
        self.require(LifePhase::Alive, "record disease start")?;
        let fi = self.counters.frailty()?;
        self.checkpoints.set_start(fi)
    }

    /// Record FI at the end of the disease, which happens at `time`
    ///
    /// With [`QalyOrigin::DiseaseEnd`] this is also where QALY integration begins.
    pub fn set_fi_end(&mut self, time: f64) -> HealthResult<()> {
        self.add_area(time)?;
        let fi = self.counters.frailty()?;
        self.checkpoints.set_end(fi)?;

        if self.config.qaly_origin == QalyOrigin::DiseaseEnd {
            self.area.begin_at(time)?;
        }
        Ok(())
    }

    /// Record death at `time`: FI checkpoint, QALY, then curve padding
    pub fn die(&mut self, time: f64) -> HealthResult<()> {
        self.add_area(time)?;
        self.set_fi_death()?;
        self.assign_qaly()?;
        self.curve.fill_remaining();
        self.phase = LifePhase::Dead;

        debug!(
            "Death at t={} after {} samples, FItot={:.4}",
            time,
            self.curve.sampled(),
            self.counters.frailty()?.tot
        );
        Ok(())
    }

    fn set_fi_death(&mut self) -> HealthResult<()> {
        let fi = self.counters.frailty()?;
        self.checkpoints.set_death(fi)
    }

    fn assign_qaly(&mut self) -> HealthResult<()> {
        self.summary = Some(self.checkpoints.finalize(self.area.qaly())?);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Export
    // ---------------------------------------------------------------------

    /// Hand the finished summary and curve to export
    pub fn export(&mut self) -> HealthResult<Outcome<'_>> {
        self.require(LifePhase::Dead, "export")?;
        let summary = self.summary.ok_or(HealthError::InvalidPhase {
            operation: "export",
            phase: self.phase,
        })?;
        self.phase = LifePhase::Exported;
        Ok(Outcome {
            summary,
            curve: &self.curve,
        })
    }
}

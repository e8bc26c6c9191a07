//! Checkpointed FI values and QALY totals for one individual

use std::fmt;

use serde::{Deserialize, Serialize};

use super::curve::{sentinel_to_nan, UNSAMPLED};
use super::deficits::FrailtyIndex;
use crate::error::{HealthError, HealthResult};

/// QALY totals: area under (1 - FItot) and (1 - FI30) over age
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Qaly {
    pub tot: f64,
    pub hub: f64,
}

/// FI checkpoints recorded while an individual is alive
///
/// Each checkpoint may be written once. The death checkpoint is required
/// before a [`SummaryRecord`] can be built.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Checkpoints {
    start: Option<FrailtyIndex>,
    end: Option<FrailtyIndex>,
    death: Option<FrailtyIndex>,
}

impl Checkpoints {
    pub fn set_start(&mut self, fi: FrailtyIndex) -> HealthResult<()> {
        set_once(&mut self.start, fi, "disease start")
    }

    pub fn set_end(&mut self, fi: FrailtyIndex) -> HealthResult<()> {
        set_once(&mut self.end, fi, "disease end")
    }

    pub fn set_death(&mut self, fi: FrailtyIndex) -> HealthResult<()> {
        set_once(&mut self.death, fi, "death")
    }

    pub fn start(&self) -> Option<FrailtyIndex> {
        self.start
    }

    pub fn end(&self) -> Option<FrailtyIndex> {
        self.end
    }

    pub fn death(&self) -> Option<FrailtyIndex> {
        self.death
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Freeze the checkpoints together with the QALY totals
    pub fn finalize(&self, qaly: Qaly) -> HealthResult<SummaryRecord> {
        let death = self.death.ok_or(HealthError::MissingCheckpoint("death"))?;
        Ok(SummaryRecord {
            start: self.start,
            end: self.end,
            death,
            qaly,
        })
    }
}

fn set_once(slot: &mut Option<FrailtyIndex>, fi: FrailtyIndex, name: &'static str) -> HealthResult<()> {
    if slot.is_some() {
        return Err(HealthError::CheckpointAlreadySet(name));
    }
    *slot = Some(fi);
    Ok(())
}

/// Final per-individual record handed to export
///
/// Only built at death, so every value it holds is final. Checkpoints the
/// individual never reached read back as [`UNSAMPLED`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryRecord {
    start: Option<FrailtyIndex>,
    end: Option<FrailtyIndex>,
    death: FrailtyIndex,
    qaly: Qaly,
}

impl SummaryRecord {
    pub fn start(&self) -> Option<FrailtyIndex> {
        self.start
    }

    pub fn end(&self) -> Option<FrailtyIndex> {
        self.end
    }

    pub fn death(&self) -> FrailtyIndex {
        self.death
    }

    pub fn qaly(&self) -> Qaly {
        self.qaly
    }

    pub fn fi_tot_start(&self) -> f64 {
        self.start.map_or(UNSAMPLED, |fi| fi.tot)
    }

    pub fn fi_hub_start(&self) -> f64 {
        self.start.map_or(UNSAMPLED, |fi| fi.hub)
    }

    pub fn fi_tot_end(&self) -> f64 {
        self.end.map_or(UNSAMPLED, |fi| fi.tot)
    }

    pub fn fi_hub_end(&self) -> f64 {
        self.end.map_or(UNSAMPLED, |fi| fi.hub)
    }

    pub fn fi_tot_death(&self) -> f64 {
        self.death.tot
    }

    pub fn fi_hub_death(&self) -> f64 {
        self.death.hub
    }

    pub fn qaly_tot(&self) -> f64 {
        self.qaly.tot
    }

    pub fn qaly_hub(&self) -> f64 {
        self.qaly.hub
    }

    /// The eight export columns, unreached checkpoints as the -1.0 marker
    pub fn columns(&self) -> [f64; 8] {
        [
            self.fi_tot_start(),
            self.fi_tot_end(),
            self.fi_tot_death(),
            self.fi_hub_start(),
            self.fi_hub_end(),
            self.fi_hub_death(),
            self.qaly_tot(),
            self.qaly_hub(),
        ]
    }

    /// Flat row with unreached checkpoints as NaN
    pub fn to_row(&self, individual: u32) -> SummaryRow {
        SummaryRow {
            individual,
            fi_tot_start: sentinel_to_nan(self.fi_tot_start()),
            fi_tot_end: sentinel_to_nan(self.fi_tot_end()),
            fi_tot_death: self.fi_tot_death(),
            fi30_start: sentinel_to_nan(self.fi_hub_start()),
            fi30_end: sentinel_to_nan(self.fi_hub_end()),
            fi30_death: self.fi_hub_death(),
            qaly_tot: self.qaly_tot(),
            qaly30: self.qaly_hub(),
        }
    }
}

impl fmt::Display for SummaryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "FItot start: {}, end: {}, death: {}",
            self.fi_tot_start(),
            self.fi_tot_end(),
            self.fi_tot_death()
        )?;
        writeln!(
            f,
            "FI30 start: {}, end: {}, death: {}",
            self.fi_hub_start(),
            self.fi_hub_end(),
            self.fi_hub_death()
        )?;
        write!(f, "QALYtot: {}, QALY30: {}", self.qaly_tot(), self.qaly_hub())
    }
}

/// Serializable row matching the FI/QALY table layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRow {
    pub individual: u32,
    #[serde(rename = "FItotstart")]
    pub fi_tot_start: f64,
    #[serde(rename = "FItotend")]
    pub fi_tot_end: f64,
    #[serde(rename = "FItotdeath")]
    pub fi_tot_death: f64,
    #[serde(rename = "FI30start")]
    pub fi30_start: f64,
    #[serde(rename = "FI30end")]
    pub fi30_end: f64,
    #[serde(rename = "FI30death")]
    pub fi30_death: f64,
    #[serde(rename = "QALYtot")]
    pub qaly_tot: f64,
    #[serde(rename = "QALY30")]
    pub qaly30: f64,
}

//! Load life-event logs from CSV
//!
//! Expected columns: `individual,time,event,deficits_tot,deficits_hub`, where
//! the deficit columns are the damage counts in effect from `time` onward.
//! Both deficit columns may be left empty to keep the previous counts.

use std::path::Path;

use csv::Reader;
use log::info;

use super::{EventKind, LifeEvent};
use crate::error::{HealthError, HealthResult};

/// Raw CSV row matching the event log columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    individual: u32,
    time: f64,
    event: String,
    deficits_tot: Option<u32>,
    deficits_hub: Option<u32>,
}

impl CsvRow {
    fn to_event(self) -> HealthResult<LifeEvent> {
        let kind = match self.event.trim().to_ascii_lowercase().as_str() {
            "damage" => EventKind::Damage,
            "disease_start" => EventKind::DiseaseStart,
            "disease_end" => EventKind::DiseaseEnd,
            "too_sick" => EventKind::TooSick,
            "death" => EventKind::Death,
            other => return Err(HealthError::Parse(format!("unknown event kind: {}", other))),
        };

        if !self.time.is_finite() || self.time < 0.0 {
            return Err(HealthError::Parse(format!(
                "individual {} has invalid event time {}",
                self.individual, self.time
            )));
        }

        let deficits = match (self.deficits_tot, self.deficits_hub) {
            (Some(tot), Some(hub)) => Some((tot, hub)),
            (None, None) => None,
            _ => {
                return Err(HealthError::Parse(format!(
                    "individual {} at time {} gives only one deficit count",
                    self.individual, self.time
                )))
            }
        };

        Ok(LifeEvent {
            individual: self.individual,
            time: self.time,
            kind,
            deficits,
        })
    }
}

/// Load all events from a CSV file
pub fn load_events<P: AsRef<Path>>(path: P) -> HealthResult<Vec<LifeEvent>> {
    let path = path.as_ref();
    let events = load_events_from_reader(std::fs::File::open(path)?)?;
    info!("Loaded {} events from {}", events.len(), path.display());
    Ok(events)
}

/// Load events from any reader (e.g., string buffer, network stream)
pub fn load_events_from_reader<R: std::io::Read>(reader: R) -> HealthResult<Vec<LifeEvent>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut events = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        events.push(row.to_event()?);
    }

    Ok(events)
}

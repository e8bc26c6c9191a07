//! Recorded life events and their replay through [`crate::HealthState`]

pub mod loader;
mod replay;

pub use loader::{load_events, load_events_from_reader};
pub use replay::{IndividualResult, ReplayEngine};

use serde::{Deserialize, Serialize};

/// What happened to an individual at an event time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// One or more nodes were damaged
    Damage,
    DiseaseStart,
    DiseaseEnd,
    /// Too few undamaged nodes remain to acquire the disease
    TooSick,
    Death,
}

/// A single event in an individual's simulated life
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifeEvent {
    pub individual: u32,
    pub time: f64,
    pub kind: EventKind,
    /// `(deficits_tot, deficits_hub)` from this time on; `None` keeps the previous counts
    pub deficits: Option<(u32, u32)>,
}

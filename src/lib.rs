//! Frailty Qaly - health measures for network-based aging simulations
//!
//! This library provides:
//! - Frailty-index (FI) curves sampled on a fixed age schedule
//! - FI checkpoints at disease start, disease end and death
//! - QALY totals as the area under (1 - FI) over age
//! - Replay of recorded life events and cohort-level averages
//!
//! The damage simulation itself lives elsewhere; it reports counts and events
//! to a [`HealthState`], one individual at a time.

pub mod error;
pub mod health;
pub mod hubs;
pub mod events;
pub mod population;

// Re-export commonly used types
pub use error::{HealthError, HealthResult};
pub use health::{HealthConfig, HealthState, FiCurve, SampleSchedule, SummaryRecord, LifePhase};
pub use hubs::HubNodes;
pub use events::{LifeEvent, EventKind, ReplayEngine, IndividualResult};
pub use population::CohortSummary;

//! Frailty-index curves, FI checkpoints and QALY for one individual at a time

mod area;
mod config;
mod curve;
mod deficits;
mod schedule;
mod state;
mod summary;

pub use area::AreaAccumulator;
pub use config::{HealthConfig, QalyOrigin, HUB_NODE_COUNT, DEFAULT_SAMPLE_STEP, DEFAULT_CURVE_LENGTH};
pub use curve::{FiCurve, UNSAMPLED, sentinel_to_nan};
pub use deficits::{DeficitCounters, FrailtyIndex};
pub use schedule::SampleSchedule;
pub use state::{HealthState, LifePhase, Outcome};
pub use summary::{Checkpoints, Qaly, SummaryRecord, SummaryRow};

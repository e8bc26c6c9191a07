//! Error types for health-measure tracking

use thiserror::Error;

use crate::health::LifePhase;

/// Errors raised when a health operation is given invalid input or is called out of order
#[derive(Debug, Error)]
pub enum HealthError {
    #[error("node count must be positive")]
    InvalidNodeCount,

    #[error("sample schedule needs a positive finite step and length, got step {step} and length {length}")]
    InvalidSchedule { step: f64, length: usize },

    #[error("FI curve is full ({capacity} samples)")]
    CurveOverflow { capacity: usize },

    #[error("{counter} deficits cannot exceed {limit}, got {value}")]
    DeficitsOutOfRange { counter: &'static str, value: u32, limit: u32 },

    #[error("{counter} deficits cannot decrease from {current} to {requested}")]
    DeficitsDecreased { counter: &'static str, current: u32, requested: u32 },

    #[error("node {0} is outside the network")]
    UnknownNode(usize),

    #[error("time {0} is not a finite number")]
    InvalidTime(f64),

    #[error("time {time} is earlier than the last integration time {t_low}")]
    TimeReversed { time: f64, t_low: f64 },

    #[error("{0} checkpoint already recorded")]
    CheckpointAlreadySet(&'static str),

    #[error("{0} checkpoint has not been recorded")]
    MissingCheckpoint(&'static str),

    #[error("cannot {operation} while individual is {phase:?}")]
    InvalidPhase { operation: &'static str, phase: LifePhase },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("event log error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Shorthand result type for health operations
pub type HealthResult<T> = Result<T, HealthError>;

//! Configuration for health-measure tracking

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::schedule::SampleSchedule;
use crate::error::{HealthError, HealthResult};

/// Number of most-connected nodes tracked for FI30; the FI30 denominator
pub const HUB_NODE_COUNT: u32 = 30;

/// Default spacing between FI samples (years)
pub const DEFAULT_SAMPLE_STEP: f64 = 1.0;

/// Default number of FI samples per individual (ages 0..150)
pub const DEFAULT_CURVE_LENGTH: usize = 150;

/// Point in life from which QALY is integrated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QalyOrigin {
    /// Integrate (1 - FI) from age 0
    #[default]
    Birth,
    /// Integrate only after the disease has ended; zero if the individual dies first
    DiseaseEnd,
}

/// Configuration shared by every individual in a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Total number of deficit nodes in the network (N)
    pub node_count: u32,

    /// Age spacing of the sample schedule
    pub sample_step: f64,

    /// Number of entries in every FI curve
    pub curve_length: usize,

    /// Where QALY integration starts
    pub qaly_origin: QalyOrigin,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            node_count: 10_000,
            sample_step: DEFAULT_SAMPLE_STEP,
            curve_length: DEFAULT_CURVE_LENGTH,
            qaly_origin: QalyOrigin::Birth,
        }
    }
}

impl HealthConfig {
    /// Default configuration for a network of `node_count` nodes
    pub fn with_nodes(node_count: u32) -> Self {
        Self {
            node_count,
            ..Default::default()
        }
    }

    /// Check every field before any individual is simulated
    pub fn validate(&self) -> HealthResult<()> {
        if self.node_count == 0 {
            return Err(HealthError::InvalidNodeCount);
        }
        if !self.sample_step.is_finite() || self.sample_step <= 0.0 || self.curve_length == 0 {
            return Err(HealthError::InvalidSchedule {
                step: self.sample_step,
                length: self.curve_length,
            });
        }
        Ok(())
    }

    /// Sample schedule described by `sample_step` and `curve_length`
    pub fn build_schedule(&self) -> HealthResult<SampleSchedule> {
        SampleSchedule::new(self.sample_step, self.curve_length)
    }

    /// Load and validate a JSON configuration file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> HealthResult<Self> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON configuration string
    pub fn from_json_str(json: &str) -> HealthResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = HealthConfig::default();
        assert_eq!(config.curve_length, 150);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_nodes() {
        let config = HealthConfig::with_nodes(0);
        assert!(matches!(config.validate(), Err(HealthError::InvalidNodeCount)));
    }

    #[test]
    fn test_small_network_is_valid() {
        // Networks smaller than the hub set are still valid
        assert!(HealthConfig::with_nodes(10).validate().is_ok());
        assert!(HealthConfig::with_nodes(1).validate().is_ok());
    }

    #[test]
    fn test_unknown_hub_count_field_is_ignored() {
        let config = HealthConfig::from_json_str(r#"{"node_count": 10, "hub_count": 20}"#)
            .expect("valid config");
        assert_eq!(config.node_count, 10);
    }

    #[test]
    fn test_rejects_bad_step() {
        for step in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = HealthConfig {
                sample_step: step,
                ..HealthConfig::with_nodes(100)
            };
            assert!(matches!(config.validate(), Err(HealthError::InvalidSchedule { .. })));
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = HealthConfig::from_json_str(r#"{"node_count": 200, "qaly_origin": "disease_end"}"#)
            .expect("valid config");
        assert_eq!(config.node_count, 200);
        assert_eq!(config.qaly_origin, QalyOrigin::DiseaseEnd);
        assert_eq!(config.curve_length, DEFAULT_CURVE_LENGTH);
    }

    #[test]
    fn test_invalid_json_config_is_rejected() {
        assert!(HealthConfig::from_json_str(r#"{"node_count": 0}"#).is_err());
        assert!(HealthConfig::from_json_str("not json").is_err());
    }
}

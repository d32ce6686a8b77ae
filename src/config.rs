//! # Footprint configuration
//!
//! A [`FootprintConfig`] is handed to
//! [`FootprintCalculator::new`](crate::footprint::FootprintCalculator::new) and replaces
//! any process-wide switch: two calculators with different settings can run side by
//! side.
//!
//! ```rust
//! use footprint::config::{FootprintConfig, UnknownTrackingPolicy};
//!
//! let config = FootprintConfig::from_json_str(r#"{"unknown_tracking": "reject"}"#).unwrap();
//! assert_eq!(config.unknown_tracking, UnknownTrackingPolicy::Reject);
//! assert!(!config.verbose);
//! ```
use serde::Deserialize;

use crate::footprint_errors::FootprintError;

/// What to do with a `TRACKSYS` value outside {J2000, B1950, APP, GAL}.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownTrackingPolicy {
    /// Read the base coordinates as FK5 J2000 and log a warning.
    #[default]
    AssumeJ2000,
    /// Fail with [`FootprintError::UnknownTrackingSystem`].
    Reject,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FootprintConfig {
    /// Log intermediate values (base position, rotation, corners) at debug level.
    pub verbose: bool,
    pub unknown_tracking: UnknownTrackingPolicy,
}

impl FootprintConfig {
    /// Read a configuration from JSON; missing keys keep their default.
    pub fn from_json_str(json: &str) -> Result<Self, FootprintError> {
        serde_json::from_str(json).map_err(|e| FootprintError::InvalidConfigJson(e.to_string()))
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_unknown_tracking(mut self, policy: UnknownTrackingPolicy) -> Self {
        self.unknown_tracking = policy;
        self
    }
}

#[cfg(test)]
mod config_test {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FootprintConfig::default();
        assert!(!config.verbose);
        assert_eq!(config.unknown_tracking, UnknownTrackingPolicy::AssumeJ2000);
        assert_eq!(FootprintConfig::from_json_str("{}").unwrap(), config);
    }

    #[test]
    fn test_builders() {
        let config = FootprintConfig::default()
            .with_verbose(true)
            .with_unknown_tracking(UnknownTrackingPolicy::Reject);
        assert_eq!(
            FootprintConfig::from_json_str(r#"{"verbose": true, "unknown_tracking": "reject"}"#)
                .unwrap(),
            config
        );
    }

    #[test]
    fn test_invalid_policy() {
        let err = FootprintConfig::from_json_str(r#"{"unknown_tracking": "guess"}"#).unwrap_err();
        assert_eq!(err, FootprintError::InvalidConfigJson(String::new()));
    }
}

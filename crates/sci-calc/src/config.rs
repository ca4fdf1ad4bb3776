//! Engine configuration
//!
//! Loaded from JSON; every field has a default so an empty object is a
//! valid configuration.

use serde::{Deserialize, Serialize};

use crate::core::history::History;
use crate::core::number::{DEFAULT_PRECISION, MAX_PRECISION};

/// What to do when a function is applied outside its domain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainPolicy {
    /// Silently produce 0 (divide by zero, sqrt of a negative, ...)
    #[default]
    DefaultToZero,
    /// Report a [`DomainError`](crate::core::DomainError) and leave the state unchanged
    Reject,
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Significant digits kept by decimal arithmetic
    pub precision: u32,
    /// Handling of divide by zero and similar domain errors
    pub domain_policy: DomainPolicy,
    /// Maximum number of history entries
    pub history_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            domain_policy: DomainPolicy::DefaultToZero,
            history_capacity: History::DEFAULT_MAX_ENTRIES,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON could not be deserialized
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Precision outside `1..=50`
    #[error("Precision {0} out of range (1..=50)")]
    InvalidPrecision(u32),
}

impl EngineConfig {
    /// Parses and validates a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that the values are usable by the engine
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.precision == 0 || self.precision > MAX_PRECISION {
            return Err(ConfigError::InvalidPrecision(self.precision));
        }
        Ok(())
    }

    /// Sets the precision
    #[must_use]
    pub const fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Sets the domain policy
    #[must_use]
    pub const fn with_domain_policy(mut self, policy: DomainPolicy) -> Self {
        self.domain_policy = policy;
        self
    }

    /// Sets the history capacity
    #[must_use]
    pub const fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }
}

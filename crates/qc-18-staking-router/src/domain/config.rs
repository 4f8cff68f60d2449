//! Registry configuration and validation
//!
//! The global ceilings are passed in at construction so boundary behaviour can
//! be exercised with small values in tests.
//!
//! # Example
//!
//! ```ignore
//! use qc_18_staking_router::domain::RegistryConfigBuilder;
//!
//! let config = RegistryConfigBuilder::new()
//!     .max_modules_count(4)
//!     .max_name_length(16)
//!     .build()
//!     .expect("Valid config");
//! ```

use super::errors::{RegistryError, RegistryResult};
use serde::{Deserialize, Serialize};
use std::env;

/// Default ceiling on registered modules.
pub const DEFAULT_MAX_MODULES_COUNT: usize = 32;

/// Default ceiling on module name length, in bytes.
pub const DEFAULT_MAX_NAME_LENGTH: usize = 31;

/// Registry ceilings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Maximum number of modules the registry holds
    pub max_modules_count: usize,
    /// Maximum module name length in bytes
    pub max_name_length: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_modules_count: DEFAULT_MAX_MODULES_COUNT,
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
        }
    }
}

impl RegistryConfig {
    /// Create a new configuration with validation
    pub fn new(max_modules_count: usize, max_name_length: usize) -> RegistryResult<Self> {
        let config = Self {
            max_modules_count,
            max_name_length,
        };
        config.validate()?;
        Ok(config)
    }

    /// Small ceilings for boundary tests.
    pub fn for_testing() -> Self {
        Self {
            max_modules_count: 4,
            max_name_length: 16,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `QC_STAKING_MAX_MODULES`: module ceiling (default: 32)
    /// - `QC_STAKING_MAX_NAME_LENGTH`: name length ceiling in bytes (default: 31)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> RegistryResult<Self> {
        let config = Self {
            max_modules_count: env::var("QC_STAKING_MAX_MODULES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_MODULES_COUNT),
            max_name_length: env::var("QC_STAKING_MAX_NAME_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_NAME_LENGTH),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject ceilings that would make every add fail.
    pub fn validate(&self) -> RegistryResult<()> {
        if self.max_modules_count == 0 {
            return Err(RegistryError::ConfigError(
                "max_modules_count cannot be 0".to_string(),
            ));
        }
        if self.max_name_length == 0 {
            return Err(RegistryError::ConfigError(
                "max_name_length cannot be 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for RegistryConfig with validation
#[derive(Default)]
pub struct RegistryConfigBuilder {
    max_modules_count: Option<usize>,
    max_name_length: Option<usize>,
}

impl RegistryConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the module ceiling
    pub fn max_modules_count(mut self, count: usize) -> Self {
        self.max_modules_count = Some(count);
        self
    }

    /// Set the name length ceiling (bytes)
    pub fn max_name_length(mut self, length: usize) -> Self {
        self.max_name_length = Some(length);
        self
    }

    /// Build the RegistryConfig, validating all parameters
    pub fn build(self) -> RegistryResult<RegistryConfig> {
        let defaults = RegistryConfig::default();
        let config = RegistryConfig {
            max_modules_count: self.max_modules_count.unwrap_or(defaults.max_modules_count),
            max_name_length: self.max_name_length.unwrap_or(defaults.max_name_length),
        };
        config.validate()?;
        Ok(config)
    }
}

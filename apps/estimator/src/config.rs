//! # Estimator Configuration
//!
//! Loaded once at startup, read-only afterwards.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--catalog`, `--materials`, `--minimum-job-total`)
//! 2. Environment variables (`FIELDCREW_*`)
//! 3. Config file (`--config <path>`, else `fieldcrew.toml` if present)
//! 4. Defaults (this file)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use fieldcrew_core::{Money, PricingPolicy, MINIMUM_JOB_TOTAL};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "fieldcrew";

/// Environment variable prefix (`FIELDCREW_MINIMUM_JOB_TOTAL`, ...).
pub const ENV_PREFIX: &str = "FIELDCREW";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// JSON array of service items. Bundled catalog when absent.
    pub catalog_path: Option<PathBuf>,

    /// JSON object of material base costs. Bundled pricebook when absent.
    pub materials_path: Option<PathBuf>,

    /// Floor for estimate totals, whole currency units.
    pub minimum_job_total: i64,

    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        EstimatorConfig {
            catalog_path: None,
            materials_path: None,
            minimum_job_total: MINIMUM_JOB_TOTAL.units(),
            pretty: true,
        }
    }
}

impl EstimatorConfig {
    /// Loads defaults, then the config file, then `FIELDCREW_*` variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    pub(crate) fn load_with_prefix(path: Option<&Path>, env_prefix: &str) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config: EstimatorConfig = config::Config::builder()
            .add_source(file)
            .add_source(config::Environment::with_prefix(env_prefix).try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.minimum_job_total < 0 {
            return Err(ConfigError::InvalidValue("minimum_job_total".to_string()));
        }

        Ok(())
    }

    /// The pricing policy this configuration selects.
    pub fn pricing_policy(&self) -> PricingPolicy {
        PricingPolicy::default().with_minimum_job_total(Money::from_units(self.minimum_job_total))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error(transparent)]
    Source(#[from] config::ConfigError),
}

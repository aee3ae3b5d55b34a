//! # Estimator Error Types
//!
//! What the CLI can fail with. Core errors are wrapped, not re-described.
//!
//! ## Error Flow
//! ```text
//! ValidationError ─► PricingError / CatalogError ─┐
//!                                                  ├─► EstimatorError ─► anyhow (main)
//! config::ConfigError ─► ConfigError ──────────────┘
//! ```

use std::path::PathBuf;

use fieldcrew_core::{CatalogError, LookupKey, PricingError};
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum EstimatorError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A catalog, materials or request file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Catalog or materials table rejected.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// The estimate could not be priced.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The request document is not a list of line items.
    #[error("Invalid estimate request: {0}")]
    Request(#[source] serde_json::Error),

    /// `show` was asked for a key the catalog does not have.
    #[error("Service item not found: {0}")]
    NotFound(LookupKey),

    /// Writing results to the output stream failed.
    #[error("Failed to write output: {0}")]
    Output(#[source] std::io::Error),
}

impl EstimatorError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EstimatorError::Read {
            path: path.into(),
            source,
        }
    }
}

pub type EstimatorResult<T> = Result<T, EstimatorError>;

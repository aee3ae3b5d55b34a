//! # Pricing State
//!
//! The engine's collaborators, loaded once from configuration.
//!
//! ```text
//! EstimatorConfig
//!   ├── catalog_path?   ──► ServiceCatalog::from_json   | ServiceCatalog::builtin
//!   ├── materials_path? ──► MaterialsTable::from_json   | MaterialsTable::builtin
//!   └── minimum_job_total ─► PricingPolicy
//! ```
//!
//! Read-only after construction, so no locking is needed.

use std::fs;
use std::path::Path;

use fieldcrew_core::{Estimator, MaterialsTable, PricingPolicy, ServiceCatalog};
use tracing::{debug, info};

use crate::config::EstimatorConfig;
use crate::error::{EstimatorError, EstimatorResult};

#[derive(Debug)]
pub struct PricingState {
    pub catalog: ServiceCatalog,
    pub materials: MaterialsTable,
    pub policy: PricingPolicy,
}

impl PricingState {
    pub fn load(config: &EstimatorConfig) -> EstimatorResult<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => ServiceCatalog::from_json(&read_to_string(path)?)?,
            None => ServiceCatalog::builtin()?,
        };
        let source = config
            .catalog_path
            .as_deref()
            .map_or_else(|| "builtin".into(), Path::to_string_lossy);
        info!(items = catalog.len(), %source, "Service catalog loaded");

        let materials = match &config.materials_path {
            Some(path) => MaterialsTable::from_json(&read_to_string(path)?)?,
            None => MaterialsTable::builtin()?,
        };
        info!(entries = materials.len(), "Materials table loaded");

        let policy = config.pricing_policy();
        debug!(?policy, "Pricing policy selected");

        Ok(PricingState {
            catalog,
            materials,
            policy,
        })
    }

    /// An estimator borrowing this state.
    pub fn estimator(&self) -> Estimator<'_> {
        Estimator::new(&self.catalog, &self.materials).with_policy(self.policy)
    }
}

pub(crate) fn read_to_string(path: &Path) -> EstimatorResult<String> {
    fs::read_to_string(path).map_err(|source| EstimatorError::read(path, source))
}

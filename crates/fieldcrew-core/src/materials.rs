//! # Materials Cost Table
//!
//! The pricebook of raw material costs, keyed by `ServiceItem::material_key`.
//! The table itself is owned outside the engine; pricing only needs the
//! read-only [`MaterialCostTable`] port.
//!
//! Absence is not an error: a key with no entry prices as zero materials.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::error::{CatalogError, CatalogResult};
use crate::validation::validate_material_cost;

/// Read-only lookup of a material base cost (before markup).
///
/// `Send + Sync` so one table can back any number of concurrent estimates.
pub trait MaterialCostTable: Send + Sync {
    fn base_cost(&self, key: &str) -> Option<f64>;
}

impl MaterialCostTable for HashMap<String, f64> {
    fn base_cost(&self, key: &str) -> Option<f64> {
        self.get(key).copied()
    }
}

impl MaterialCostTable for BTreeMap<String, f64> {
    fn base_cost(&self, key: &str) -> Option<f64> {
        self.get(key).copied()
    }
}

/// A table with no entries; every key prices as zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMaterials;

impl MaterialCostTable for NoMaterials {
    fn base_cost(&self, _key: &str) -> Option<f64> {
        None
    }
}

// =============================================================================
// Materials Table
// =============================================================================

const BUILTIN_MATERIALS_JSON: &str = include_str!("../data/materials.json");

/// Validated, immutable materials pricebook.
///
/// Serializes as a flat JSON object: `{"hvac-tuneup-kit": 85.0, ...}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialsTable {
    costs: BTreeMap<String, f64>,
}

impl MaterialsTable {
    /// Builds a table, rejecting non-finite or negative costs.
    pub fn new<I, K>(entries: I) -> CatalogResult<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut costs = BTreeMap::new();
        for (key, cost) in entries {
            let key = key.into();
            if let Err(source) = validate_material_cost(cost) {
                return Err(CatalogError::InvalidMaterial { key, source });
            }
            costs.insert(key, cost);
        }
        Ok(MaterialsTable { costs })
    }

    /// Parses a flat JSON object of `key -> base cost`.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let costs: BTreeMap<String, f64> = serde_json::from_str(json)?;
        Self::new(costs)
    }

    /// The reference pricebook shipped with the engine.
    ///
    /// ```rust
    /// use fieldcrew_core::materials::{MaterialCostTable, MaterialsTable};
    ///
    /// let table = MaterialsTable::builtin().unwrap();
    /// assert_eq!(table.base_cost("hvac-tuneup-kit"), Some(85.0));
    /// ```
    pub fn builtin() -> CatalogResult<Self> {
        Self::from_json(BUILTIN_MATERIALS_JSON)
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.costs.iter().map(|(key, cost)| (key.as_str(), *cost))
    }
}

impl MaterialCostTable for MaterialsTable {
    fn base_cost(&self, key: &str) -> Option<f64> {
        self.costs.get(key).copied()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_loads() {
        let table = MaterialsTable::builtin().unwrap();
        assert!(!table.is_empty());
        assert_eq!(table.base_cost("toilet-rebuild-kit"), Some(30.0));
        assert_eq!(table.base_cost("unobtainium"), None);
    }

    #[test]
    fn test_rejects_negative_and_non_finite_costs() {
        let err = MaterialsTable::new([("pipe", -1.0)]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidMaterial { ref key, .. } if key == "pipe"));

        assert!(MaterialsTable::new([("wire", f64::NAN)]).is_err());
        assert!(MaterialsTable::new([("free-sample", 0.0)]).is_ok());
    }

    #[test]
    fn test_from_json_rejects_malformed_documents() {
        assert!(matches!(
            MaterialsTable::from_json("[1, 2]"),
            Err(CatalogError::Json(_))
        ));
        assert!(MaterialsTable::from_json(r#"{"breaker": "cheap"}"#).is_err());
    }

    #[test]
    fn test_iter_is_key_ordered() {
        let table = MaterialsTable::new([("b", 2.0), ("a", 1.0)]).unwrap();
        let keys: Vec<&str> = table.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_other_tables_implement_the_port() {
        let mut map = HashMap::new();
        map.insert("fitting".to_string(), 12.5);
        assert_eq!(map.base_cost("fitting"), Some(12.5));
        assert_eq!(NoMaterials.base_cost("fitting"), None);
    }
}

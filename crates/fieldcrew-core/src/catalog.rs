//! # Service Catalog
//!
//! Immutable, in-memory table of [`ServiceItem`]s with two indexes.
//!
//! ## Lookup Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  find(key)                                                              │
//! │                                                                         │
//! │  Numeric(n) ───────────────► by_id[n] ──────────────► item | None       │
//! │                                                                         │
//! │  Coded(s) ──► s parses as integer?                                      │
//! │                 │ yes ──► by_id[s] ── hit ──────────► item              │
//! │                 │                    └ miss ──┐                         │
//! │                 └ no ─────────────────────────┴──► by_code[s] ► item    │
//! │                                                            | None       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog is built once and shared by reference (or `Arc`) with every
//! caller. There is no global instance.

use std::collections::HashMap;

use crate::error::{CatalogError, CatalogResult};
use crate::types::{LookupKey, ServiceItem};
use crate::validation::validate_service_item;

const BUILTIN_CATALOG_JSON: &str = include_str!("../data/service_items.json");

/// Read-only catalog of priced service items.
#[derive(Debug, Clone, Default)]
pub struct ServiceCatalog {
    items: Vec<ServiceItem>,
    by_id: HashMap<u64, usize>,
    by_code: HashMap<String, usize>,
}

impl ServiceCatalog {
    /// Builds a catalog, validating every item.
    ///
    /// Fails on the first invalid item, duplicate id or duplicate code.
    /// Insertion order is kept for [`list_all`](Self::list_all).
    pub fn new(items: Vec<ServiceItem>) -> CatalogResult<Self> {
        let mut by_id = HashMap::with_capacity(items.len());
        let mut by_code = HashMap::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            validate_service_item(item).map_err(|source| CatalogError::InvalidItem {
                id: item.id,
                source,
            })?;

            if by_id.insert(item.id, index).is_some() {
                return Err(CatalogError::DuplicateId(item.id));
            }
            if by_code.insert(item.code.clone(), index).is_some() {
                return Err(CatalogError::DuplicateCode(item.code.clone()));
            }
        }

        Ok(ServiceCatalog {
            items,
            by_id,
            by_code,
        })
    }

    /// Parses a JSON array of service items.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let items: Vec<ServiceItem> = serde_json::from_str(json)?;
        Self::new(items)
    }

    /// The reference catalog shipped with the engine.
    ///
    /// ```rust
    /// use fieldcrew_core::ServiceCatalog;
    ///
    /// let catalog = ServiceCatalog::builtin().unwrap();
    /// let item = catalog.find_by_id(1001).unwrap();
    /// assert_eq!(item.standard_price.units(), 165);
    /// ```
    pub fn builtin() -> CatalogResult<Self> {
        Self::from_json(BUILTIN_CATALOG_JSON)
    }

    /// Resolves a lookup key to exactly one item.
    ///
    /// Numeric keys match ids only. String keys are first tried as an id,
    /// then as a code.
    pub fn find(&self, key: &LookupKey) -> Option<&ServiceItem> {
        if let Some(item) = key.as_id().and_then(|id| self.find_by_id(id)) {
            return Some(item);
        }

        key.as_code().and_then(|code| self.find_by_code(code))
    }

    pub fn find_by_id(&self, id: u64) -> Option<&ServiceItem> {
        self.by_id.get(&id).map(|&index| &self.items[index])
    }

    pub fn find_by_code(&self, code: &str) -> Option<&ServiceItem> {
        self.by_code.get(code).map(|&index| &self.items[index])
    }

    /// Every entry, in insertion order.
    pub fn list_all(&self) -> &[ServiceItem] {
        &self.items
    }

    /// Entries whose `category_key` equals `category`, in insertion order.
    pub fn in_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a ServiceItem> + 'a {
        self.items
            .iter()
            .filter(move |item| item.category_key == category)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

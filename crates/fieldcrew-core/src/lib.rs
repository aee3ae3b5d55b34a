//! # fieldcrew-core: Estimate Pricing Engine
//!
//! Turns a catalog of priced service items plus the caller's modifiers
//! (quantity, tier, material cost) into a minimum-enforced job estimate.
//! Everything here is a pure function with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Fieldcrew Back Office                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │        Estimate UI / HTTP handlers / estimator CLI              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ &[LineItemInput]                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ fieldcrew-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │ materials │  │  pricing  │  │ estimate  │  │   │
//! │  │   │  find()   │  │ base_cost │  │ one line  │  │ all lines │  │   │
//! │  │   │ list_all()│  │  (port)   │  │  rounding │  │  minimum  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO GLOBAL STATE • PURE FUNCTIONS       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ServiceItem, LineItemInput, EstimateResult, ...)
//! - [`money`] - Whole-unit Money type
//! - [`catalog`] - Immutable service catalog with id/code lookup
//! - [`materials`] - Materials cost port and the bundled pricebook
//! - [`pricing`] - Single line pricing
//! - [`estimate`] - Whole estimate pricing and the minimum job total
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use fieldcrew_core::{calculate_estimate, LineItemInput, MaterialsTable, ServiceCatalog};
//!
//! let catalog = ServiceCatalog::builtin().unwrap();
//! let materials = MaterialsTable::builtin().unwrap();
//!
//! let estimate = calculate_estimate(
//!     &catalog,
//!     &materials,
//!     &[LineItemInput::new(3001_i64), LineItemInput::new("2003"), LineItemInput::new(1001_i64)],
//! )
//! .unwrap();
//!
//! assert_eq!(estimate.subtotal.units(), 703);
//! assert!(!estimate.applied_minimum);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod estimate;
pub mod materials;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::ServiceCatalog;
pub use error::{AmountOverflow, CatalogError, PricingError, ValidationError};
pub use estimate::{calculate_estimate, Estimator};
pub use materials::{MaterialCostTable, MaterialsTable, NoMaterials};
pub use money::Money;
pub use pricing::{calculate_line_item_total, LineItemRequest, PricingPolicy};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Floor for an estimate's total, compared against the subtotal.
pub const MINIMUM_JOB_TOTAL: Money = Money::from_units(150);

/// Uplift applied to raw material cost (18%).
pub const MATERIAL_MARKUP: f64 = 1.18;

/// Standing compliance/safety surcharge applied to every line (3%).
pub const SAFETY_MODE_MULTIPLIER: f64 = 1.03;

/// Quantity used when a line does not specify one.
pub const DEFAULT_QUANTITY: f64 = 1.0;

//! # Error Types
//!
//! Domain-specific error types for fieldcrew-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  fieldcrew-core errors (this file)                                      │
//! │  ├── PricingError     - Estimate could not be priced (all-or-nothing)   │
//! │  ├── AmountOverflow   - A computed amount does not fit in Money         │
//! │  ├── CatalogError     - Catalog / materials table could not be built    │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  estimator app errors (separate crate)                                  │
//! │  └── EstimatorError   - Config, file and output failures                │
//! │                                                                         │
//! │  Flow: ValidationError → PricingError / CatalogError → EstimatorError   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A catalog miss is NOT an error at the lookup layer: `ServiceCatalog::find`
//! returns `None`, and only the estimate aggregator turns absence into
//! [`PricingError::ServiceItemNotFound`].

use thiserror::Error;

use crate::types::LookupKey;

// =============================================================================
// Pricing Error
// =============================================================================

/// Failures of a whole-estimate calculation.
///
/// Any of these aborts the estimate; no partial result is ever returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// A line item references an id or code that is not in the catalog.
    ///
    /// The message embeds the key exactly as the caller supplied it, e.g.
    /// `Service item not found: 99999`.
    #[error("Service item not found: {key}")]
    ServiceItemNotFound { key: LookupKey },

    /// A line item carries a malformed modifier (non-finite or
    /// non-positive quantity, negative material cost).
    #[error("Invalid line item at position {index}: {source}")]
    InvalidLineItem {
        index: usize,
        source: ValidationError,
    },

    /// A line priced past the range of [`Money`](crate::money::Money), or
    /// pushed the running subtotal past it.
    #[error("Line item at position {index}: {source}")]
    AmountOutOfRange {
        index: usize,
        source: AmountOverflow,
    },
}

impl PricingError {
    /// Creates a ServiceItemNotFound error for the given key.
    pub fn not_found(key: impl Into<LookupKey>) -> Self {
        PricingError::ServiceItemNotFound { key: key.into() }
    }

    /// Returns the unresolvable key, if that is what failed.
    pub fn missing_key(&self) -> Option<&LookupKey> {
        match self {
            PricingError::ServiceItemNotFound { key } => Some(key),
            PricingError::InvalidLineItem { .. } | PricingError::AmountOutOfRange { .. } => None,
        }
    }
}

// =============================================================================
// Amount Overflow
// =============================================================================

/// The pricing stage whose result left the `Money` range.
///
/// Quantities and material costs have no upper bound, so a large enough
/// input overflows one of these instead of being rejected by validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmountOverflow {
    #[error("labor amount is out of range")]
    Labor,

    #[error("materials amount is out of range")]
    Materials,

    #[error("line total is out of range")]
    LineTotal,

    #[error("subtotal is out of range")]
    Subtotal,
}

// =============================================================================
// Catalog Error
// =============================================================================

/// Errors raised while constructing a catalog or materials table.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two items share the same numeric id.
    #[error("Duplicate service id: {0}")]
    DuplicateId(u64),

    /// Two items share the same code.
    #[error("Duplicate service code: '{0}'")]
    DuplicateCode(String),

    /// An item failed field validation.
    #[error("Invalid service item {id}: {source}")]
    InvalidItem { id: u64, source: ValidationError },

    /// A materials table entry has an unusable base cost.
    #[error("Invalid material '{key}': {source}")]
    InvalidMaterial { key: String, source: ValidationError },

    /// The JSON document could not be parsed.
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation before pricing logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Invalid format (e.g., illegal characters in a code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

pub type PricingResult<T> = Result<T, PricingError>;

pub type CatalogResult<T> = Result<T, CatalogError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_embeds_raw_key() {
        let err = PricingError::not_found(99999_i64);
        assert_eq!(err.to_string(), "Service item not found: 99999");

        let err = PricingError::not_found("EL-404");
        assert_eq!(err.to_string(), "Service item not found: EL-404");
    }

    #[test]
    fn test_missing_key_is_structured() {
        let err = PricingError::not_found(99999_i64);
        assert_eq!(err.missing_key(), Some(&LookupKey::Numeric(99999)));

        let err = PricingError::InvalidLineItem {
            index: 2,
            source: ValidationError::MustBePositive {
                field: "quantity".to_string(),
            },
        };
        assert_eq!(err.missing_key(), None);
        assert_eq!(
            err.to_string(),
            "Invalid line item at position 2: quantity must be positive"
        );
    }

    #[test]
    fn test_amount_out_of_range_names_the_stage() {
        let err = PricingError::AmountOutOfRange {
            index: 1,
            source: AmountOverflow::Subtotal,
        };
        assert_eq!(err.missing_key(), None);
        assert_eq!(
            err.to_string(),
            "Line item at position 1: subtotal is out of range"
        );
    }

    #[test]
    fn test_catalog_error_messages() {
        assert_eq!(
            CatalogError::DuplicateId(1001).to_string(),
            "Duplicate service id: 1001"
        );
        assert_eq!(
            CatalogError::DuplicateCode("EL-1".to_string()).to_string(),
            "Duplicate service code: 'EL-1'"
        );

        let err = CatalogError::InvalidItem {
            id: 7,
            source: ValidationError::Required {
                field: "code".to_string(),
            },
        };
        assert_eq!(err.to_string(), "Invalid service item 7: code is required");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::NotFinite {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be a finite number");

        let err = ValidationError::TooLong {
            field: "code".to_string(),
            max: 50,
        };
        assert_eq!(err.to_string(), "code must be at most 50 characters");
    }
}

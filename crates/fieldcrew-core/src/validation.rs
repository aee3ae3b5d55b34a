//! # Validation Module
//!
//! Input validation for catalog entries and estimate modifiers.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Catalog build (ServiceCatalog::new, MaterialsTable::new)               │
//! │  ├── id, code, name, category format checks                             │
//! │  └── material base costs finite and non-negative                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Estimate aggregation (calculate_estimate)                              │
//! │  ├── quantity finite and > 0                                            │
//! │  └── materialCost finite and >= 0                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Line pricing (calculate_line_item_total)                               │
//! │  └── no checks: inputs are already validated                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use fieldcrew_core::validation::{validate_service_code, validate_quantity};
//!
//! validate_service_code("PL-TOILET").unwrap();
//! validate_quantity(2.5).unwrap();
//! assert!(validate_quantity(0.0).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{LineItemInput, ServiceItem};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_CODE_LEN: usize = 50;
const MAX_NAME_LEN: usize = 200;

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates a service id. Ids are positive.
pub fn validate_service_id(id: u64) -> ValidationResult<()> {
    if id == 0 {
        return Err(ValidationError::MustBePositive {
            field: "id".to_string(),
        });
    }

    Ok(())
}

/// Validates a service code.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Letters, digits, hyphens and underscores only
///
/// ```rust
/// use fieldcrew_core::validation::validate_service_code;
///
/// assert!(validate_service_code("3001").is_ok());
/// assert!(validate_service_code("").is_err());
/// assert!(validate_service_code("has space").is_err());
/// ```
pub fn validate_service_code(code: &str) -> ValidationResult<()> {
    if code.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.len() > MAX_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: MAX_CODE_LEN,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a service name: non-empty, at most 200 characters.
pub fn validate_service_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates every field of a catalog entry.
pub fn validate_service_item(item: &ServiceItem) -> ValidationResult<()> {
    validate_service_id(item.id)?;
    validate_service_code(&item.code)?;
    validate_service_name(&item.name)?;

    if item.standard_price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "standardPrice".to_string(),
        });
    }

    if let Some(key) = &item.material_key {
        if key.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "materialKey".to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be finite
/// - Must be strictly positive; fractional values are allowed
/// - No upper bound here; pricing reports amounts past the `Money` range
pub fn validate_quantity(quantity: f64) -> ValidationResult<()> {
    if !quantity.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "quantity".to_string(),
        });
    }

    if quantity <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a material cost (explicit or from the materials table).
///
/// Zero is allowed: it means "no materials".
pub fn validate_material_cost(cost: f64) -> ValidationResult<()> {
    if !cost.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "materialCost".to_string(),
        });
    }

    if cost < 0.0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "materialCost".to_string(),
        });
    }

    Ok(())
}

/// Validates the optional modifiers of one estimate line.
pub fn validate_line_item_input(input: &LineItemInput) -> ValidationResult<()> {
    if let Some(quantity) = input.quantity {
        validate_quantity(quantity)?;
    }

    if let Some(cost) = input.material_cost {
        validate_material_cost(cost)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

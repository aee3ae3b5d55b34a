//! # Domain Types
//!
//! Core domain types used throughout the pricing engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │  ServiceItem    │   │ LineItemInput   │   │ EstimateResult  │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  id (u64)       │   │  id (LookupKey) │   │  line_items     │        │
//! │  │  code (string)  │   │  quantity?      │   │  subtotal       │        │
//! │  │  standard_price │   │  material_cost? │   │  adjusted_total │        │
//! │  │  risk_factor    │   │  tier?          │   │  applied_minimum│        │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘        │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │     Tier        │   │   RiskFactor    │   │   LookupKey     │        │
//! │  │  basic   0.90   │   │  low     1.00   │   │  Numeric(i64)   │        │
//! │  │  standard 1.00  │   │  medium  1.10   │   │  Coded(String)  │        │
//! │  │  premium 1.15   │   │  high    1.20   │   └─────────────────┘        │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every service item has:
//! - `id`: positive integer, what estimates reference
//! - `code`: business identifier, 1:1 with `id`, may itself look numeric

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tier
// =============================================================================

/// Caller-chosen service quality level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Basic,
    #[default]
    Standard,
    Premium,
}

impl Tier {
    /// Multiplier applied to the combined labor + materials base.
    #[inline]
    pub const fn multiplier(&self) -> f64 {
        match self {
            Tier::Basic => 0.9,
            Tier::Standard => 1.0,
            Tier::Premium => 1.15,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Tier::Basic => "basic",
            Tier::Standard => "standard",
            Tier::Premium => "premium",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Risk Factor
// =============================================================================

/// Catalog-assigned hazard/complexity label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum RiskFactor {
    Low,
    #[default]
    Medium,
    High,
}

impl RiskFactor {
    /// Price multiplier for this risk level.
    ///
    /// `Low` carries no uplift. Medium and high are the reference values.
    #[inline]
    pub const fn multiplier(&self) -> f64 {
        match self {
            RiskFactor::Low => 1.0,
            RiskFactor::Medium => 1.10,
            RiskFactor::High => 1.20,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            RiskFactor::Low => "low",
            RiskFactor::Medium => "medium",
            RiskFactor::High => "high",
        }
    }
}

impl fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Service Item
// =============================================================================

/// A priced catalog entry. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItem {
    /// Unique positive identifier.
    pub id: u64,

    /// Unique business code, 1:1 with `id`.
    pub code: String,

    /// Display name shown on estimates.
    pub name: String,

    /// Trade / service family. Not used for pricing.
    pub category_key: String,

    /// Per-unit labor rate in whole currency units.
    pub standard_price: Money,

    /// Defaults to `medium` when absent from the source data.
    #[serde(default)]
    pub risk_factor: RiskFactor,

    /// Key into the materials cost table, used when the caller
    /// does not supply an explicit material cost.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub material_key: Option<String>,
}

// =============================================================================
// Lookup Key
// =============================================================================

/// How a line item refers to a service: by numeric id or by code.
///
/// Deserializes from either a JSON number or a JSON string. The string
/// form is coerced numerically first (see `ServiceCatalog::find`). Numbers
/// must be whole and fit in an `i64`; `1001.0` is accepted as `1001`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, TS)]
#[ts(export)]
#[serde(untagged)]
pub enum LookupKey {
    Numeric(i64),
    Coded(String),
}

impl LookupKey {
    /// The numeric id this key can denote, if any.
    ///
    /// ```rust
    /// use fieldcrew_core::LookupKey;
    ///
    /// assert_eq!(LookupKey::from(3001_i64).as_id(), Some(3001));
    /// assert_eq!(LookupKey::from("3001").as_id(), Some(3001));
    /// assert_eq!(LookupKey::from("HV-TUNE").as_id(), None);
    /// assert_eq!(LookupKey::from(-4_i64).as_id(), None);
    /// ```
    pub fn as_id(&self) -> Option<u64> {
        match self {
            LookupKey::Numeric(n) => u64::try_from(*n).ok(),
            LookupKey::Coded(code) => code.parse::<u64>().ok(),
        }
    }

    /// The code this key can denote. Numeric keys never match codes.
    pub fn as_code(&self) -> Option<&str> {
        match self {
            LookupKey::Numeric(_) => None,
            LookupKey::Coded(code) => Some(code),
        }
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKey::Numeric(n) => write!(f, "{n}"),
            LookupKey::Coded(code) => f.write_str(code),
        }
    }
}

impl<'de> Deserialize<'de> for LookupKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LookupKeyVisitor)
    }
}

struct LookupKeyVisitor;

impl<'de> Visitor<'de> for LookupKeyVisitor {
    type Value = LookupKey;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a whole-number service id or a service code string")
    }

    fn visit_i64<E: de::Error>(self, id: i64) -> Result<LookupKey, E> {
        Ok(LookupKey::Numeric(id))
    }

    fn visit_u64<E: de::Error>(self, id: u64) -> Result<LookupKey, E> {
        i64::try_from(id)
            .map(LookupKey::Numeric)
            .map_err(|_| E::custom(format!("service id {id} is out of range")))
    }

    fn visit_f64<E: de::Error>(self, id: f64) -> Result<LookupKey, E> {
        // i64::MAX as f64 is 2^63, one past the largest i64
        if id.fract() == 0.0 && id >= i64::MIN as f64 && id < i64::MAX as f64 {
            Ok(LookupKey::Numeric(id as i64))
        } else {
            Err(E::custom(format!("service id {id} is not a whole number in range")))
        }
    }

    fn visit_str<E: de::Error>(self, code: &str) -> Result<LookupKey, E> {
        Ok(LookupKey::Coded(code.to_string()))
    }

    fn visit_string<E: de::Error>(self, code: String) -> Result<LookupKey, E> {
        Ok(LookupKey::Coded(code))
    }
}

impl From<i64> for LookupKey {
    fn from(id: i64) -> Self {
        LookupKey::Numeric(id)
    }
}

impl From<&str> for LookupKey {
    fn from(code: &str) -> Self {
        LookupKey::Coded(code.to_string())
    }
}

impl From<String> for LookupKey {
    fn from(code: String) -> Self {
        LookupKey::Coded(code)
    }
}

// =============================================================================
// Line Item Input
// =============================================================================

/// One requested line of an estimate, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItemInput {
    pub id: LookupKey,

    /// Labor multiplier. Defaults to 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub quantity: Option<f64>,

    /// Explicit material cost; overrides the item's material key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub material_cost: Option<f64>,

    /// Defaults to `standard`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub tier: Option<Tier>,
}

impl LineItemInput {
    /// A line with every modifier left at its default.
    pub fn new(id: impl Into<LookupKey>) -> Self {
        LineItemInput {
            id: id.into(),
            quantity: None,
            material_cost: None,
            tier: None,
        }
    }

    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_material_cost(mut self, cost: f64) -> Self {
        self.material_cost = Some(cost);
        self
    }

    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = Some(tier);
        self
    }
}

// =============================================================================
// Calculated Line Item
// =============================================================================

/// A priced line. Produced fresh on every calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedLineItem {
    pub service_id: u64,
    pub code: String,
    pub name: String,
    /// Quantity with the default applied.
    pub quantity: f64,
    /// Tier with the default applied.
    pub tier: Tier,
    pub labor_portion: Money,
    /// Marked-up materials, rounded before being combined with labor.
    pub materials_portion: Money,
    pub line_total: Money,
}

// =============================================================================
// Estimate Result
// =============================================================================

/// A fully priced estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResult {
    /// Same order as the caller's input list.
    pub line_items: Vec<CalculatedLineItem>,
    /// Sum of all line totals.
    pub subtotal: Money,
    /// `subtotal`, unless raised to the minimum job total.
    pub adjusted_total: Money,
    /// True iff the minimum job total changed the total.
    pub applied_minimum: bool,
}

impl EstimateResult {
    /// Amount added on top of the subtotal by the minimum job total.
    pub fn minimum_adjustment(&self) -> Money {
        self.adjusted_total - self.subtotal
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Line Item Pricing
//!
//! Prices one resolved service item with its modifiers.
//!
//! ## Calculation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. labor      = round(standard_price × quantity)                      │
//! │  2. base       = explicit material cost                                 │
//! │                  | materials[material_key]                              │
//! │                  | 0                                                    │
//! │  3. materials  = round(base × 1.18)      ◄── rounded HERE, not later    │
//! │  4. combined   = labor + materials                                      │
//! │  5-7. total    = round(combined × tier × risk × safety)                 │
//! │                   multiplied left to right, in this order               │
//! │                                                                         │
//! │  Example: HVAC tune-up (3001), standard tier, medium risk               │
//! │    labor 175, base 85 → materials round(100.3) = 100                    │
//! │    total = round(275 × 1.0 × 1.10 × 1.03) = round(311.575) = 312        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rounding the materials before combining is load-bearing: rounding only
//! once at the end gives different totals on some inputs.
//!
//! Quantity and material cost have no upper bound, so every stage above
//! can leave the `Money` range. The stage that does is returned as an
//! [`AmountOverflow`] instead of a saturated or wrapped amount.

use serde::{Deserialize, Serialize};

use crate::error::AmountOverflow;
use crate::materials::MaterialCostTable;
use crate::money::Money;
use crate::types::{CalculatedLineItem, ServiceItem, Tier};
use crate::{DEFAULT_QUANTITY, MATERIAL_MARKUP, MINIMUM_JOB_TOTAL, SAFETY_MODE_MULTIPLIER};

// =============================================================================
// Pricing Policy
// =============================================================================

/// The standing numeric policy the engine prices under.
///
/// `PricingPolicy::default()` is the reference policy; every published
/// total is computed with it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPolicy {
    /// Floor applied to the estimate subtotal.
    pub minimum_job_total: Money,
    /// Uplift on raw material cost.
    pub material_markup: f64,
    /// Compliance surcharge applied to every line.
    pub safety_multiplier: f64,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        PricingPolicy {
            minimum_job_total: MINIMUM_JOB_TOTAL,
            material_markup: MATERIAL_MARKUP,
            safety_multiplier: SAFETY_MODE_MULTIPLIER,
        }
    }
}

impl PricingPolicy {
    /// Reference policy with a different minimum job total.
    pub fn with_minimum_job_total(mut self, minimum: Money) -> Self {
        self.minimum_job_total = minimum;
        self
    }
}

// =============================================================================
// Line Item Request
// =============================================================================

/// A resolved service item plus the caller's modifiers.
#[derive(Debug, Clone, Copy)]
pub struct LineItemRequest<'a> {
    pub service: &'a ServiceItem,
    pub quantity: Option<f64>,
    pub tier: Option<Tier>,
    pub material_cost: Option<f64>,
}

impl<'a> LineItemRequest<'a> {
    pub fn new(service: &'a ServiceItem) -> Self {
        LineItemRequest {
            service,
            quantity: None,
            tier: None,
            material_cost: None,
        }
    }

    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = Some(tier);
        self
    }

    pub fn with_material_cost(mut self, cost: f64) -> Self {
        self.material_cost = Some(cost);
        self
    }
}

// =============================================================================
// Calculation
// =============================================================================

/// Prices one line under the reference policy.
///
/// Pure. Modifiers are expected to be validated already (the estimate
/// aggregator does this); the only failure left is an amount too large
/// for [`Money`].
///
/// ```rust
/// use fieldcrew_core::pricing::{calculate_line_item_total, LineItemRequest};
/// use fieldcrew_core::{MaterialsTable, ServiceCatalog, Tier};
///
/// let catalog = ServiceCatalog::builtin().unwrap();
/// let materials = MaterialsTable::builtin().unwrap();
/// let call = catalog.find_by_id(1001).unwrap();
///
/// let line = calculate_line_item_total(&LineItemRequest::new(call).with_tier(Tier::Premium), &materials)?;
/// assert_eq!(line.line_total.units(), 215);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn calculate_line_item_total<M>(
    request: &LineItemRequest<'_>,
    materials: &M,
) -> Result<CalculatedLineItem, AmountOverflow>
where
    M: MaterialCostTable + ?Sized,
{
    price_line_item(request, materials, &PricingPolicy::default())
}

/// Prices one line under an explicit policy.
pub fn price_line_item<M>(
    request: &LineItemRequest<'_>,
    materials: &M,
    policy: &PricingPolicy,
) -> Result<CalculatedLineItem, AmountOverflow>
where
    M: MaterialCostTable + ?Sized,
{
    let service = request.service;
    let quantity = request.quantity.unwrap_or(DEFAULT_QUANTITY);
    let tier = request.tier.unwrap_or_default();

    let labor_portion = Money::try_from_rounded(service.standard_price.as_f64() * quantity)
        .ok_or(AmountOverflow::Labor)?;

    let material_base = request
        .material_cost
        .or_else(|| {
            service
                .material_key
                .as_deref()
                .and_then(|key| materials.base_cost(key))
        })
        .unwrap_or(0.0);
    let materials_portion = Money::try_from_rounded(material_base * policy.material_markup)
        .ok_or(AmountOverflow::Materials)?;

    let combined = labor_portion
        .checked_add(materials_portion)
        .ok_or(AmountOverflow::LineTotal)?;

    // Order is fixed: tier, then risk, then safety.
    let line_total = Money::try_from_rounded(
        combined.as_f64()
            * tier.multiplier()
            * service.risk_factor.multiplier()
            * policy.safety_multiplier,
    )
    .ok_or(AmountOverflow::LineTotal)?;

    Ok(CalculatedLineItem {
        service_id: service.id,
        code: service.code.clone(),
        name: service.name.clone(),
        quantity,
        tier,
        labor_portion,
        materials_portion,
        line_total,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{MaterialsTable, NoMaterials};
    use crate::types::RiskFactor;

    fn service(price: i64, risk: RiskFactor, material_key: Option<&str>) -> ServiceItem {
        ServiceItem {
            id: 1,
            code: "TEST-1".to_string(),
            name: "Test service".to_string(),
            category_key: "electrical".to_string(),
            standard_price: Money::from_units(price),
            risk_factor: risk,
            material_key: material_key.map(str::to_string),
        }
    }

    fn materials() -> MaterialsTable {
        MaterialsTable::new([("kit", 85.0), ("device", 4.5)]).unwrap()
    }

    #[test]
    fn test_reference_rounding_order() {
        let item = service(175, RiskFactor::Medium, Some("kit"));
        let line = calculate_line_item_total(&LineItemRequest::new(&item), &materials()).unwrap();

        assert_eq!(line.labor_portion.units(), 175);
        assert_eq!(line.materials_portion.units(), 100);
        assert_eq!(line.line_total.units(), 312);
    }

    #[test]
    fn test_defaults_match_explicit_quantity_and_tier() {
        let item = service(165, RiskFactor::Medium, None);
        let implicit =
            calculate_line_item_total(&LineItemRequest::new(&item), &NoMaterials).unwrap();
        let explicit = calculate_line_item_total(
            &LineItemRequest::new(&item)
                .with_quantity(1.0)
                .with_tier(Tier::Standard),
            &NoMaterials,
        )
        .unwrap();

        assert_eq!(implicit, explicit);
        assert_eq!(implicit.quantity, 1.0);
        assert_eq!(implicit.tier, Tier::Standard);
    }

    #[test]
    fn test_tier_totals_for_medium_risk_service_call() {
        let item = service(165, RiskFactor::Medium, None);
        let total = |tier| {
            calculate_line_item_total(&LineItemRequest::new(&item).with_tier(tier), &NoMaterials)
                .unwrap()
                .line_total
                .units()
        };

        assert_eq!(total(Tier::Basic), 168);
        assert_eq!(total(Tier::Standard), 187);
        assert_eq!(total(Tier::Premium), 215);
    }

    #[test]
    fn test_explicit_material_cost_overrides_key() {
        let item = service(175, RiskFactor::Medium, Some("kit"));
        let line = calculate_line_item_total(
            &LineItemRequest::new(&item).with_material_cost(0.0),
            &materials(),
        )
        .unwrap();

        assert!(line.materials_portion.is_zero());
        assert_eq!(line.line_total.units(), 198);
    }

    #[test]
    fn test_unknown_material_key_prices_as_zero() {
        let item = service(175, RiskFactor::Medium, Some("missing"));
        let line = calculate_line_item_total(&LineItemRequest::new(&item), &materials()).unwrap();
        assert!(line.materials_portion.is_zero());
    }

    #[test]
    fn test_labor_scales_with_quantity_materials_do_not() {
        let item = service(95, RiskFactor::Medium, Some("device"));
        let one = calculate_line_item_total(&LineItemRequest::new(&item), &materials()).unwrap();
        let four = calculate_line_item_total(
            &LineItemRequest::new(&item).with_quantity(4.0),
            &materials(),
        )
        .unwrap();

        assert_eq!(four.labor_portion, one.labor_portion * 4);
        assert_eq!(four.materials_portion, one.materials_portion);
        assert_eq!(one.materials_portion.units(), 5);
    }

    #[test]
    fn test_fractional_quantity_rounds_labor() {
        let item = service(165, RiskFactor::Medium, None);
        let line = calculate_line_item_total(
            &LineItemRequest::new(&item).with_quantity(1.5),
            &NoMaterials,
        )
        .unwrap();

        assert_eq!(line.labor_portion.units(), 248);
        assert_eq!(line.line_total.units(), 281);
    }

    #[test]
    fn test_high_and_low_risk() {
        let high = service(225, RiskFactor::High, None);
        let line = calculate_line_item_total(
            &LineItemRequest::new(&high).with_material_cost(95.0),
            &NoMaterials,
        )
        .unwrap();
        assert_eq!(line.materials_portion.units(), 112);
        assert_eq!(line.line_total.units(), 417);

        let low = service(145, RiskFactor::Low, None);
        let line = calculate_line_item_total(&LineItemRequest::new(&low), &NoMaterials).unwrap();
        assert_eq!(line.line_total.units(), 149);
    }

    #[test]
    fn test_tier_monotonicity() {
        let item = service(175, RiskFactor::High, Some("kit"));
        let total = |tier| {
            calculate_line_item_total(&LineItemRequest::new(&item).with_tier(tier), &materials())
                .unwrap()
                .line_total
        };

        assert!(total(Tier::Basic) < total(Tier::Standard));
        assert!(total(Tier::Standard) < total(Tier::Premium));
    }

    #[test]
    fn test_line_copies_service_identity() {
        let item = service(100, RiskFactor::Medium, None);
        let line = calculate_line_item_total(&LineItemRequest::new(&item), &NoMaterials).unwrap();

        assert_eq!(line.service_id, 1);
        assert_eq!(line.code, "TEST-1");
        assert_eq!(line.name, "Test service");
    }

    #[test]
    fn test_policy_markup_and_safety_are_applied() {
        let item = service(100, RiskFactor::Low, None);
        let policy = PricingPolicy {
            safety_multiplier: 1.0,
            material_markup: 1.0,
            ..PricingPolicy::default()
        };
        let line = price_line_item(
            &LineItemRequest::new(&item).with_material_cost(10.0),
            &NoMaterials,
            &policy,
        )
        .unwrap();

        assert_eq!(line.materials_portion.units(), 10);
        assert_eq!(line.line_total.units(), 110);
    }

    #[test]
    fn test_large_quantity_prices_up_to_money_range() {
        // 1e18 × 1.0 × 1.0 × 1.03 = 1.03e18, well inside i64
        let item = service(1, RiskFactor::Low, None);
        let line = calculate_line_item_total(
            &LineItemRequest::new(&item).with_quantity(1e18),
            &NoMaterials,
        )
        .unwrap();

        assert_eq!(line.labor_portion.units(), 1_000_000_000_000_000_000);
        assert!(line.line_total.units() > 1_000_000_000_000_000_000);
    }

    #[test]
    fn test_amount_overflow_reports_the_stage() {
        fn overflow(request: LineItemRequest<'_>) -> AmountOverflow {
            calculate_line_item_total(&request, &NoMaterials).unwrap_err()
        }

        let item = service(1, RiskFactor::Low, None);

        // labor itself fits, the 1.03 safety uplift does not
        assert_eq!(
            overflow(LineItemRequest::new(&item).with_quantity(9e18)),
            AmountOverflow::LineTotal
        );
        assert_eq!(
            overflow(LineItemRequest::new(&item).with_quantity(1e19)),
            AmountOverflow::Labor
        );
        assert_eq!(
            overflow(LineItemRequest::new(&item).with_material_cost(1e19)),
            AmountOverflow::Materials
        );

        let call = service(165, RiskFactor::Medium, None);
        assert_eq!(
            overflow(LineItemRequest::new(&call).with_quantity(1e17)),
            AmountOverflow::Labor
        );
    }
}

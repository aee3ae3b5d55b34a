//! # Estimate Aggregation
//!
//! Resolves and prices a whole list of [`LineItemInput`]s, then applies the
//! minimum job total.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  inputs[0..n]                                                           │
//! │     │  for each, in order:                                              │
//! │     ├── catalog.find(id) ── None ──► Err(ServiceItemNotFound { key })   │
//! │     ├── validate modifiers ── bad ─► Err(InvalidLineItem { index })     │
//! │     ├── price_line_item ── too big ► Err(AmountOutOfRange { index })    │
//! │     └── subtotal += line_total ── too big ► Err(AmountOutOfRange)       │
//! │                                                                         │
//! │  subtotal < minimum ? (minimum, true) : (subtotal, false)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All-or-nothing: the first bad line aborts the estimate and nothing
//! priced so far is returned.

use crate::catalog::ServiceCatalog;
use crate::error::{AmountOverflow, PricingError, PricingResult};
use crate::materials::{MaterialCostTable, MaterialsTable};
use crate::money::Money;
use crate::pricing::{price_line_item, LineItemRequest, PricingPolicy};
use crate::types::{CalculatedLineItem, EstimateResult, LineItemInput, LookupKey, ServiceItem};
use crate::validation::validate_line_item_input;

// =============================================================================
// Minimum Job Total
// =============================================================================

/// Applies the minimum job total to a subtotal.
///
/// Returns `(adjusted_total, applied_minimum)`. The comparison is strict:
/// a subtotal equal to the minimum is left alone.
///
/// ```rust
/// use fieldcrew_core::estimate::apply_minimum_job_total;
/// use fieldcrew_core::{Money, MINIMUM_JOB_TOTAL};
///
/// assert_eq!(apply_minimum_job_total(Money::from_units(149), MINIMUM_JOB_TOTAL), (Money::from_units(150), true));
/// assert_eq!(apply_minimum_job_total(Money::from_units(150), MINIMUM_JOB_TOTAL), (Money::from_units(150), false));
/// ```
pub fn apply_minimum_job_total(subtotal: Money, minimum: Money) -> (Money, bool) {
    if subtotal < minimum {
        (minimum, true)
    } else {
        (subtotal, false)
    }
}

// =============================================================================
// Estimator
// =============================================================================

/// The pricing engine: a catalog, a materials table and a policy.
///
/// Borrows its collaborators, so one catalog can back any number of
/// estimators on any number of threads.
#[derive(Debug)]
pub struct Estimator<'a, M: MaterialCostTable + ?Sized = MaterialsTable> {
    catalog: &'a ServiceCatalog,
    materials: &'a M,
    policy: PricingPolicy,
}

impl<'a, M: MaterialCostTable + ?Sized> Estimator<'a, M> {
    /// An estimator running the reference policy.
    pub fn new(catalog: &'a ServiceCatalog, materials: &'a M) -> Self {
        Estimator {
            catalog,
            materials,
            policy: PricingPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: PricingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    pub fn catalog(&self) -> &'a ServiceCatalog {
        self.catalog
    }

    /// Catalog lookup by id or code; `None` when absent.
    pub fn find_service_item(&self, key: &LookupKey) -> Option<&'a ServiceItem> {
        self.catalog.find(key)
    }

    /// The full catalog, in insertion order.
    pub fn list_service_items(&self) -> &'a [ServiceItem] {
        self.catalog.list_all()
    }

    /// Prices one already-resolved line.
    pub fn calculate_line_item_total(
        &self,
        request: &LineItemRequest<'_>,
    ) -> Result<CalculatedLineItem, AmountOverflow> {
        price_line_item(request, self.materials, &self.policy)
    }

    /// Prices a whole estimate.
    ///
    /// ## Errors
    /// - [`PricingError::ServiceItemNotFound`] for the first unresolvable id
    /// - [`PricingError::InvalidLineItem`] for the first malformed modifier
    /// - [`PricingError::AmountOutOfRange`] for the first line whose total,
    ///   or whose addition to the subtotal, does not fit in [`Money`]
    pub fn calculate_estimate(&self, inputs: &[LineItemInput]) -> PricingResult<EstimateResult> {
        let mut line_items = Vec::with_capacity(inputs.len());
        let mut subtotal = Money::zero();

        for (index, input) in inputs.iter().enumerate() {
            let service = self
                .catalog
                .find(&input.id)
                .ok_or_else(|| PricingError::not_found(input.id.clone()))?;

            validate_line_item_input(input)
                .map_err(|source| PricingError::InvalidLineItem { index, source })?;

            let request = LineItemRequest {
                service,
                quantity: input.quantity,
                tier: input.tier,
                material_cost: input.material_cost,
            };
            let line = self
                .calculate_line_item_total(&request)
                .map_err(|source| PricingError::AmountOutOfRange { index, source })?;

            subtotal = subtotal
                .checked_add(line.line_total)
                .ok_or(PricingError::AmountOutOfRange {
                    index,
                    source: AmountOverflow::Subtotal,
                })?;
            line_items.push(line);
        }

        let (adjusted_total, applied_minimum) =
            apply_minimum_job_total(subtotal, self.policy.minimum_job_total);

        Ok(EstimateResult {
            line_items,
            subtotal,
            adjusted_total,
            applied_minimum,
        })
    }
}

/// Prices a whole estimate under the reference policy.
pub fn calculate_estimate<M>(
    catalog: &ServiceCatalog,
    materials: &M,
    inputs: &[LineItemInput],
) -> PricingResult<EstimateResult>
where
    M: MaterialCostTable + ?Sized,
{
    Estimator::new(catalog, materials).calculate_estimate(inputs)
}

// =============================================================================
// Unit Tests
// =============================================================================

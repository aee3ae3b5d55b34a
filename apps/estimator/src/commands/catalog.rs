//! `list` and `show`: catalog inspection.

use std::io::Write;

use fieldcrew_core::{LookupKey, ServiceItem};
use tracing::{debug, warn};

use super::write_json;
use crate::error::{EstimatorError, EstimatorResult};
use crate::state::PricingState;

/// Prints the catalog, optionally narrowed to one category.
///
/// Returns the number of items printed.
pub fn list<W: Write>(
    state: &PricingState,
    category: Option<&str>,
    out: &mut W,
    pretty: bool,
) -> EstimatorResult<usize> {
    let estimator = state.estimator();
    let items: Vec<&ServiceItem> = match category {
        Some(category) => state.catalog.in_category(category).collect(),
        None => estimator.list_service_items().iter().collect(),
    };

    if items.is_empty() {
        warn!(?category, "No service items matched");
    }
    debug!(count = items.len(), "Listing service items");

    write_json(out, &items, pretty)?;
    Ok(items.len())
}

/// Prints one item looked up by id or code.
pub fn show<W: Write>(
    state: &PricingState,
    key: &str,
    out: &mut W,
    pretty: bool,
) -> EstimatorResult<()> {
    let key = LookupKey::from(key);
    let item = state
        .estimator()
        .find_service_item(&key)
        .ok_or_else(|| EstimatorError::NotFound(key.clone()))?;

    debug!(id = item.id, code = %item.code, risk = %item.risk_factor, "Service item resolved");
    write_json(out, item, pretty)
}

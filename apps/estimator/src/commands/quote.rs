//! `quote`: price an estimate request.
//!
//! ## Request Format
//! A JSON array of line items, read from a file or `-` for stdin:
//! ```json
//! [
//!   { "id": 3001 },
//!   { "id": "2003", "quantity": 2 },
//!   { "id": 1001, "tier": "premium", "materialCost": 40 }
//! ]
//! ```

use std::io::{Read, Write};
use std::path::Path;

use fieldcrew_core::{EstimateResult, LineItemInput};
use tracing::{debug, info};

use super::write_json;
use crate::error::{EstimatorError, EstimatorResult};
use crate::state::{read_to_string, PricingState};

/// Path that selects stdin instead of a file.
pub const STDIN_PATH: &str = "-";

/// Reads and parses an estimate request.
pub fn read_request(source: &Path) -> EstimatorResult<Vec<LineItemInput>> {
    let raw = if source == Path::new(STDIN_PATH) {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .map_err(|err| EstimatorError::read(STDIN_PATH, err))?;
        raw
    } else {
        read_to_string(source)?
    };

    parse_request(&raw)
}

pub fn parse_request(raw: &str) -> EstimatorResult<Vec<LineItemInput>> {
    serde_json::from_str(raw).map_err(EstimatorError::Request)
}

/// Prices `inputs` and prints the result.
pub fn quote<W: Write>(
    state: &PricingState,
    inputs: &[LineItemInput],
    out: &mut W,
    pretty: bool,
) -> EstimatorResult<EstimateResult> {
    debug!(lines = inputs.len(), "Pricing estimate");

    let result = state.estimator().calculate_estimate(inputs)?;

    info!(
        lines = result.line_items.len(),
        subtotal = result.subtotal.units(),
        adjusted_total = result.adjusted_total.units(),
        applied_minimum = result.applied_minimum,
        "Estimate priced"
    );

    let adjustment = result.minimum_adjustment();
    if adjustment.is_positive() {
        debug!(%adjustment, "Raised to minimum job total");
    }

    write_json(out, &result, pretty)?;
    Ok(result)
}

//! # Commands
//!
//! One function per subcommand. Each writes JSON to the given writer so the
//! same code serves stdout and tests.

pub mod catalog;
pub mod quote;

use std::io::Write;

use serde::Serialize;

use crate::error::{EstimatorError, EstimatorResult};

/// Writes `value` as JSON followed by a newline.
pub(crate) fn write_json<W, T>(out: &mut W, value: &T, pretty: bool) -> EstimatorResult<()>
where
    W: Write,
    T: Serialize + ?Sized,
{
    let written = if pretty {
        serde_json::to_writer_pretty(&mut *out, value)
    } else {
        serde_json::to_writer(&mut *out, value)
    };
    written.map_err(|err| EstimatorError::Output(err.into()))?;
    writeln!(out).map_err(EstimatorError::Output)
}

//! # Fieldcrew Estimator
//!
//! Command-line front end for the pricing engine.
//!
//! ## Module Organization
//! ```text
//! fieldcrew_estimator/
//! ├── lib.rs          ◄─── You are here (startup sequence)
//! ├── cli.rs          ◄─── clap definitions & flag overrides
//! ├── config.rs       ◄─── EstimatorConfig (file + env)
//! ├── state.rs        ◄─── Catalog, materials and policy loaded once
//! ├── logging.rs      ◄─── tracing subscriber
//! ├── commands/
//! │   ├── catalog.rs  ◄─── list, show
//! │   └── quote.rs    ◄─── quote
//! └── error.rs        ◄─── EstimatorError
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod state;

use std::io::Write;

use tracing::info;

use cli::{Cli, Command};
use config::EstimatorConfig;
use error::EstimatorResult;
use state::PricingState;

/// Runs one CLI invocation against `out`.
///
/// ## Startup Sequence
/// ```text
/// 1. Load configuration ── defaults → file → FIELDCREW_* env
/// 2. Apply flag overrides, re-validate
/// 3. Load catalog + materials, select pricing policy
/// 4. Dispatch the subcommand
/// ```
/// Logging must already be initialized.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> EstimatorResult<()> {
    let mut config = EstimatorConfig::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    config.validate()?;
    info!(?config, "Configuration loaded");

    let state = PricingState::load(&config)?;

    match &cli.command {
        Command::List { category } => {
            commands::catalog::list(&state, category.as_deref(), out, config.pretty)?;
        }
        Command::Show { key } => {
            commands::catalog::show(&state, key, out, config.pretty)?;
        }
        Command::Quote { request, .. } => {
            let inputs = commands::quote::read_request(request)?;
            commands::quote::quote(&state, &inputs, out, config.pretty)?;
        }
    }

    Ok(())
}

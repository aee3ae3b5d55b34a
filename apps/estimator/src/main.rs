//! # fieldcrew-estimator
//!
//! ```bash
//! fieldcrew-estimator list --category hvac
//! fieldcrew-estimator show 3001
//! echo '[{"id": 3001}, {"id": 1001, "tier": "premium"}]' | fieldcrew-estimator quote -
//! ```

use anyhow::Context;
use clap::Parser;

use fieldcrew_estimator::cli::Cli;
use fieldcrew_estimator::logging::init_tracing;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    fieldcrew_estimator::run(&cli, &mut out).context("fieldcrew-estimator failed")
}

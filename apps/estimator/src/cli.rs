//! Command-line surface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::EstimatorConfig;

#[derive(Debug, Parser)]
#[command(
    name = "fieldcrew-estimator",
    version,
    about = "Inspect the service catalog and price job estimates"
)]
pub struct Cli {
    /// Config file (TOML). Defaults to ./fieldcrew.toml when present.
    #[arg(long, global = true, env = "FIELDCREW_CONFIG")]
    pub config: Option<PathBuf>,

    /// Service catalog JSON, overriding the configured one.
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Materials pricebook JSON, overriding the configured one.
    #[arg(long, global = true)]
    pub materials: Option<PathBuf>,

    /// Single-line JSON output.
    #[arg(long, global = true)]
    pub compact: bool,

    /// Debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List catalog entries.
    List {
        /// Only entries in this category (e.g. "plumbing").
        #[arg(long)]
        category: Option<String>,
    },

    /// Show one entry by id or code.
    Show {
        /// Numeric id or service code.
        key: String,
    },

    /// Price an estimate request (JSON array of line items).
    Quote {
        /// Request file, or "-" for stdin.
        request: PathBuf,

        /// Override the minimum job total for this run.
        #[arg(long)]
        minimum_job_total: Option<i64>,
    },
}

impl Cli {
    /// Applies flag overrides on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut EstimatorConfig) {
        if let Some(path) = &self.catalog {
            config.catalog_path = Some(path.clone());
        }
        if let Some(path) = &self.materials {
            config.materials_path = Some(path.clone());
        }
        if self.compact {
            config.pretty = false;
        }
        if let Command::Quote {
            minimum_job_total: Some(minimum),
            ..
        } = self.command
        {
            config.minimum_job_total = minimum;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_quote_overrides() {
        let cli = Cli::try_parse_from([
            "fieldcrew-estimator",
            "--catalog",
            "spring.json",
            "--compact",
            "quote",
            "-",
            "--minimum-job-total",
            "95",
        ])
        .unwrap();

        let mut config = EstimatorConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.catalog_path, Some(PathBuf::from("spring.json")));
        assert_eq!(config.minimum_job_total, 95);
        assert!(!config.pretty);
    }

    #[test]
    fn test_show_takes_raw_key() {
        let cli = Cli::try_parse_from(["fieldcrew-estimator", "show", "PL-TOILET"]).unwrap();
        assert!(matches!(cli.command, Command::Show { ref key } if key == "PL-TOILET"));
    }
}

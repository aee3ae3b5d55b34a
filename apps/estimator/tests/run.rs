//! End-to-end runs of the estimator through its public entry point.

use std::fs;

use clap::Parser;
use fieldcrew_core::{EstimateResult, ServiceItem};
use fieldcrew_estimator::cli::Cli;
use fieldcrew_estimator::config::ConfigError;
use fieldcrew_estimator::error::EstimatorError;

struct Workspace {
    dir: tempfile::TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("fieldcrew.toml"), "pretty = false\n").unwrap();
        Workspace { dir }
    }

    fn write(&self, name: &str, contents: &str) -> String {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn run(&self, args: &[&str]) -> Result<Vec<u8>, EstimatorError> {
        let config = self.dir.path().join("fieldcrew.toml");
        let config = config.to_string_lossy();
        let mut argv = vec!["fieldcrew-estimator", "--config", &*config];
        argv.extend_from_slice(args);

        let cli = Cli::try_parse_from(argv).unwrap();
        let mut out = Vec::new();
        fieldcrew_estimator::run(&cli, &mut out)?;
        Ok(out)
    }
}

#[test]
fn quote_reference_estimate() {
    let ws = Workspace::new();
    let request = ws.write(
        "request.json",
        r#"[{"id": "3001"}, {"id": 2003}, {"id": 1001}]"#,
    );

    let out = ws.run(&["quote", &request]).unwrap();

    let result: EstimateResult = serde_json::from_slice(&out).unwrap();
    assert_eq!(result.subtotal.units(), 703);
    assert_eq!(result.adjusted_total.units(), 703);
    assert!(!result.applied_minimum);
    // compact output is a single line
    assert_eq!(out.iter().filter(|&&b| b == b'\n').count(), 1);
}

#[test]
fn quote_with_custom_catalog_and_minimum() {
    let ws = Workspace::new();
    let catalog = ws.write(
        "catalog.json",
        r#"[{"id": 1, "code": "HM-HANG", "name": "Hang pictures",
             "categoryKey": "handyman", "standardPrice": 60, "riskFactor": "low",
             "materialKey": "hooks"}]"#,
    );
    let materials = ws.write("materials.json", r#"{"hooks": 10}"#);
    let request = ws.write("request.json", r#"[{"id": "HM-HANG", "quantity": 2}]"#);

    let out = ws
        .run(&[
            "--catalog",
            &catalog,
            "--materials",
            &materials,
            "quote",
            &request,
            "--minimum-job-total",
            "175",
        ])
        .unwrap();

    // labor 120 + round(10 × 1.18) = 132 → round(132 × 1.03) = 136
    let result: EstimateResult = serde_json::from_slice(&out).unwrap();
    assert_eq!(result.line_items[0].materials_portion.units(), 12);
    assert_eq!(result.subtotal.units(), 136);
    assert_eq!(result.adjusted_total.units(), 175);
    assert!(result.applied_minimum);
}

#[test]
fn quote_unknown_item_fails() {
    let ws = Workspace::new();
    let request = ws.write("request.json", r#"[{"id": 1001}, {"id": 99999}]"#);

    let err = ws.run(&["quote", &request]).unwrap_err();
    assert_eq!(err.to_string(), "Service item not found: 99999");
}

#[test]
fn negative_minimum_flag_is_rejected() {
    let ws = Workspace::new();
    let request = ws.write("request.json", r#"[{"id": 1002}]"#);

    let err = ws
        .run(&["quote", &request, "--minimum-job-total=-5"])
        .unwrap_err();

    assert!(matches!(
        err,
        EstimatorError::Config(ConfigError::InvalidValue(ref field)) if field == "minimum_job_total"
    ));
}

#[test]
fn list_and_show() {
    let ws = Workspace::new();

    let out = ws.run(&["list", "--category", "hvac"]).unwrap();
    let items: Vec<ServiceItem> = serde_json::from_slice(&out).unwrap();
    let ids: Vec<u64> = items.iter().map(|item| item.id).collect();
    assert_eq!(ids, vec![3001, 3002, 3003]);

    let by_id = ws.run(&["show", "1001"]).unwrap();
    let item: ServiceItem = serde_json::from_slice(&by_id).unwrap();
    assert_eq!(item.name, "Electrical service call and diagnostic");

    assert!(matches!(
        ws.run(&["show", "EL-NOPE"]),
        Err(EstimatorError::NotFound(_))
    ));
}

//! Integration tests for emissions-core with the shared JSON fixtures.

use chrono::NaiveDate;
use emissions_core::{
    CompanyProfile, ComplianceStatus, EmissionsError, ReportForm, ReportLog, ReportStatus,
};

/// Path to a fixture relative to the workspace root
fn fixture(name: &str) -> String {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = std::path::Path::new(&manifest_dir).parent().unwrap().parent().unwrap();
    workspace_root
        .join("testing/fixtures")
        .join(name)
        .to_string_lossy()
        .to_string()
}

#[test]
fn test_load_report_fixture() {
    let log = ReportLog::load(fixture("reports.json")).unwrap();

    assert_eq!(log.len(), 5);
    let first = log.get("1").unwrap();
    assert_eq!(first.period, "Q1 2023");
    assert_eq!(first.emissions_value(), Some(12450.0));
    assert_eq!(log.get("3").unwrap().status, ReportStatus::LateSubmission);
    assert!(log.records().iter().all(|r| r.emissions_value().is_some()));
}

#[test]
fn test_submit_then_insert() {
    let mut log = ReportLog::load(fixture("reports.json")).unwrap();
    let form = ReportForm {
        period: "Q2 2023".to_string(),
        facility: "Main Plant".to_string(),
        total_emissions: "11,980".to_string(),
        notes: "Heat recovery unit online".to_string(),
    };

    let report = form.submit(NaiveDate::from_ymd_opt(2023, 7, 14).unwrap()).unwrap();
    let id = report.id.clone();
    log.insert(report).unwrap();

    assert_eq!(log.len(), 6);
    assert_eq!(log.records()[0].id, id);
    assert_eq!(log.records()[0].submission_date, "July 14, 2023");
    assert_eq!(log.records()[0].status, ReportStatus::Compliant);
}

#[test]
fn test_invalid_form_never_reaches_log() {
    let form = ReportForm {
        period: "Q2 2023".to_string(),
        facility: String::new(),
        total_emissions: "twelve".to_string(),
        notes: String::new(),
    };

    let err: EmissionsError = form.submit_now().unwrap_err().into();
    let message = err.to_string();
    assert!(message.contains("Facility is required"));
    assert!(message.contains("Emissions must be a number"));
}

#[test]
fn test_missing_fixture_is_io_error() {
    let err = ReportLog::load(fixture("does-not-exist.json")).unwrap_err();
    assert!(matches!(err, EmissionsError::Io(_)));
}

#[test]
fn test_company_fixture() {
    let content = std::fs::read_to_string(fixture("companies.json")).unwrap();
    let companies: Vec<CompanyProfile> = serde_json::from_str(&content).unwrap();

    assert_eq!(companies.len(), 3);
    assert_eq!(companies[0].compliance, Some(ComplianceStatus::NonCompliant));
    assert_eq!(companies[1].yoy_change, Some(-6.1));
}

//! Report records as stored in the dashboard's in-memory collection.
use serde::{Deserialize, Serialize};
use std::fmt;

/// One emissions submission.
///
/// Field names serialize in camelCase so the dashboard's JSON fixtures
/// deserialize directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Opaque identifier, unique within a collection
    pub id: String,
    /// Reporting interval label (e.g. "Q1 2023")
    pub period: String,
    /// Display date the report was filed (e.g. "April 15, 2023")
    pub submission_date: String,
    /// Human-formatted total, grouping commas allowed (e.g. "12,450")
    pub total_emissions: String,
    pub facility: String,
    pub status: ReportStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Report {
    /// Numeric value of `total_emissions`, if it parses
    pub fn emissions_value(&self) -> Option<f64> {
        parse_emissions(&self.total_emissions)
    }
}

/// Parse a human-formatted emissions figure ("12,450" -> 12450.0).
///
/// Grouping commas and surrounding whitespace are ignored. Returns `None`
/// for anything that is not a finite number.
pub fn parse_emissions(raw: &str) -> Option<f64> {
    let stripped: String = raw.chars().filter(|c| *c != ',').collect();
    stripped
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Filing status of a report.
///
/// The known values are `Compliant` and `Late Submission`; any other label
/// is carried through as `Other` rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReportStatus {
    Compliant,
    LateSubmission,
    Other(String),
}

impl ReportStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ReportStatus::Compliant => "Compliant",
            ReportStatus::LateSubmission => "Late Submission",
            ReportStatus::Other(label) => label,
        }
    }
}

impl Default for ReportStatus {
    fn default() -> Self {
        ReportStatus::Compliant
    }
}

impl From<String> for ReportStatus {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Compliant" => ReportStatus::Compliant,
            "Late Submission" => ReportStatus::LateSubmission,
            _ => ReportStatus::Other(label),
        }
    }
}

impl From<&str> for ReportStatus {
    fn from(label: &str) -> Self {
        ReportStatus::from(label.to_string())
    }
}

impl From<ReportStatus> for String {
    fn from(status: ReportStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

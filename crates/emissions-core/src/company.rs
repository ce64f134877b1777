//! Company profile used as assistant context
use serde::{Deserialize, Serialize};

/// Compliance standing of a company on the compliance map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplianceStatus {
    Compliant,
    #[serde(rename = "Under Review")]
    UnderReview,
    #[serde(rename = "Non-Compliant")]
    NonCompliant,
}

impl ComplianceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "Compliant",
            ComplianceStatus::UnderReview => "Under Review",
            ComplianceStatus::NonCompliant => "Non-Compliant",
        }
    }
}

/// Figures for the company the assistant is talking to.
///
/// Every field is optional; the assistant substitutes placeholder text for
/// whatever is missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    /// Annual emissions in tons
    #[serde(default)]
    pub emissions: Option<f64>,
    /// Year-over-year change in percent (negative is a reduction)
    #[serde(default)]
    pub yoy_change: Option<f64>,
    #[serde(default)]
    pub compliance: Option<ComplianceStatus>,
}

impl CompanyProfile {
    pub fn with_emissions(mut self, tons: f64) -> Self {
        self.emissions = Some(tons);
        self
    }

    pub fn with_yoy_change(mut self, percent: f64) -> Self {
        self.yoy_change = Some(percent);
        self
    }

    pub fn with_compliance(mut self, status: ComplianceStatus) -> Self {
        self.compliance = Some(status);
        self
    }
}

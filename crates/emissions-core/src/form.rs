//! New-report form validation and record creation.
//!
//! A form is checked field by field; every failing field is reported at
//! once so the dashboard can mark them all. A valid form becomes a
//! `Report` with a fresh id, today's date, and the default status.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;
use uuid::Uuid;

use crate::report::{parse_emissions, Report, ReportStatus};

/// Display format for submission dates ("July 14, 2023")
pub const SUBMISSION_DATE_FORMAT: &str = "%B %-d, %Y";

/// Raw field values as typed into the new-report form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportForm {
    pub period: String,
    pub facility: String,
    pub total_emissions: String,
    #[serde(default)]
    pub notes: String,
}

/// Per-field validation messages, keyed by camelCase field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormErrors {
    pub fields: BTreeMap<String, String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    fn add(&mut self, field: &str, message: &str) {
        self.fields.insert(field.to_string(), message.to_string());
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl ReportForm {
    /// Check every field, collecting all failures
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();

        if self.period.trim().is_empty() {
            errors.add("period", "Reporting period is required");
        }
        if self.facility.trim().is_empty() {
            errors.add("facility", "Facility is required");
        }
        if self.total_emissions.trim().is_empty() {
            errors.add("totalEmissions", "Total emissions value is required");
        } else {
            match parse_emissions(&self.total_emissions) {
                None => errors.add("totalEmissions", "Emissions must be a number"),
                Some(v) if v < 0.0 => errors.add("totalEmissions", "Emissions cannot be negative"),
                Some(_) => {}
            }
        }

        errors
    }

    /// Validate and build a report filed on `today`
    pub fn submit(&self, today: NaiveDate) -> Result<Report, FormErrors> {
        let errors = self.validate();
        if !errors.is_empty() {
            debug!(fields = ?errors.fields.keys().collect::<Vec<_>>(), "report form rejected");
            return Err(errors);
        }

        let notes = self.notes.trim();
        Ok(Report {
            id: Uuid::new_v4().to_string(),
            period: self.period.trim().to_string(),
            submission_date: today.format(SUBMISSION_DATE_FORMAT).to_string(),
            total_emissions: self.total_emissions.trim().to_string(),
            facility: self.facility.trim().to_string(),
            status: ReportStatus::Compliant,
            notes: if notes.is_empty() { None } else { Some(notes.to_string()) },
        })
    }

    /// Validate and build a report filed today (local time)
    pub fn submit_now(&self) -> Result<Report, FormErrors> {
        self.submit(chrono::Local::now().date_naive())
    }
}

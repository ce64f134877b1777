//! Session-owned report collection.
//!
//! Holds the reports a dashboard session works with. New submissions go to
//! the head of the list; existing records are never modified. Nothing here
//! is persisted.

use std::path::Path;
use tracing::{debug, info};

use crate::error::EmissionsError;
use crate::report::Report;

#[derive(Debug, Clone, Default)]
pub struct ReportLog {
    records: Vec<Report>,
}

impl ReportLog {
    /// Build from existing records, rejecting duplicate ids
    pub fn new(records: Vec<Report>) -> Result<Self, EmissionsError> {
        let mut seen = std::collections::HashSet::new();
        for record in &records {
            if !seen.insert(record.id.as_str()) {
                return Err(EmissionsError::DuplicateId(record.id.clone()));
            }
        }
        Ok(Self { records })
    }

    /// Parse a JSON array of reports
    pub fn from_json(json: &str) -> Result<Self, EmissionsError> {
        let records: Vec<Report> = serde_json::from_str(json)
            .map_err(|e| EmissionsError::Fixture(format!("Failed to parse reports JSON: {}", e)))?;
        Self::new(records)
    }

    /// Load a JSON fixture file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EmissionsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let log = Self::from_json(&content)?;
        info!(path = %path.display(), count = log.len(), "loaded report fixture");
        Ok(log)
    }

    /// Insert a new report at the head of the collection
    pub fn insert(&mut self, report: Report) -> Result<(), EmissionsError> {
        if self.get(&report.id).is_some() {
            return Err(EmissionsError::DuplicateId(report.id));
        }
        debug!(id = %report.id, period = %report.period, "report added");
        self.records.insert(0, report);
        Ok(())
    }

    pub fn records(&self) -> &[Report] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&Report> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportStatus;

    fn report(id: &str, period: &str) -> Report {
        Report {
            id: id.to_string(),
            period: period.to_string(),
            submission_date: "April 15, 2023".to_string(),
            total_emissions: "1,000".to_string(),
            facility: "Main Plant".to_string(),
            status: ReportStatus::Compliant,
            notes: None,
        }
    }

    #[test]
    fn test_insert_at_head() {
        let mut log = ReportLog::new(vec![report("1", "Q1 2023")]).unwrap();
        log.insert(report("2", "Q2 2023")).unwrap();

        let periods: Vec<&str> = log.records().iter().map(|r| r.period.as_str()).collect();
        assert_eq!(periods, vec!["Q2 2023", "Q1 2023"]);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut log = ReportLog::default();
        log.insert(report("1", "Q1 2023")).unwrap();
        let err = log.insert(report("1", "Q2 2023")).unwrap_err();
        assert!(matches!(err, EmissionsError::DuplicateId(id) if id == "1"));
        assert_eq!(log.len(), 1);

        assert!(ReportLog::new(vec![report("a", "Q1"), report("a", "Q2")]).is_err());
    }

    #[test]
    fn test_bad_json() {
        let err = ReportLog::from_json("{ not json").unwrap_err();
        assert!(err.to_string().starts_with("FIXTURE/"));
    }
}

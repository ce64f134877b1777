//! Emissions Query: search, filter, and sort for the past-reports list
//!
//! A pure function of (records, query). The backing collection is only
//! borrowed, so the dashboard can re-run a query on every keystroke against
//! the same session-owned list.
//!
//! # Example
//!
//! ```
//! use emissions_core::{Report, ReportStatus};
//! use emissions_query::{query, Query, SortKey};
//!
//! let reports = vec![
//!     Report {
//!         id: "1".into(),
//!         period: "Q1 2023".into(),
//!         submission_date: "April 15, 2023".into(),
//!         total_emissions: "12,450".into(),
//!         facility: "Main Plant".into(),
//!         status: ReportStatus::Compliant,
//!         notes: None,
//!     },
//!     Report {
//!         id: "2".into(),
//!         period: "Q3 2022".into(),
//!         submission_date: "October 20, 2022".into(),
//!         total_emissions: "15,670".into(),
//!         facility: "Main Plant".into(),
//!         status: ReportStatus::LateSubmission,
//!         notes: None,
//!     },
//! ];
//!
//! let late = query(&reports, &Query::new().status("Late Submission").sort_by(SortKey::Emissions));
//! assert_eq!(late.len(), 1);
//! assert_eq!(late[0].period, "Q3 2022");
//! ```

pub mod engine;
pub mod query;

pub use engine::{matches, parse_submission_date, query, query_refs};
pub use query::{Query, QueryError, SortKey, SortOrder, StatusFilter};

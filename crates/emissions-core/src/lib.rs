//! Emissions Core: report records, personas, and session data
//!
//! Shared data model for the CO₂ emissions tracker. The query engine
//! (`emissions-query`) and the assistant (`emissions-assist`) both build on
//! the types defined here.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use emissions_core::{ReportForm, ReportLog, ReportStatus};
//!
//! let mut log = ReportLog::default();
//! let form = ReportForm {
//!     period: "Q2 2023".to_string(),
//!     facility: "Main Plant".to_string(),
//!     total_emissions: "11,980".to_string(),
//!     notes: String::new(),
//! };
//!
//! let today = NaiveDate::from_ymd_opt(2023, 7, 14).unwrap();
//! let report = form.submit(today).unwrap();
//! assert_eq!(report.submission_date, "July 14, 2023");
//! assert_eq!(report.status, ReportStatus::Compliant);
//!
//! log.insert(report).unwrap();
//! assert_eq!(log.len(), 1);
//! ```

pub mod company;
pub mod error;
pub mod form;
pub mod log;
pub mod persona;
pub mod report;

pub use company::{CompanyProfile, ComplianceStatus};
pub use error::EmissionsError;
pub use form::{FormErrors, ReportForm};
pub use log::ReportLog;
pub use persona::{Persona, Role, Turn};
pub use report::{parse_emissions, Report, ReportStatus};

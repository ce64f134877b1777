//! Query parameters for the report list.
//!
//! Mirrors the controls above the past-reports table: a search box, a
//! status dropdown, a sort-field dropdown, and a direction toggle.

use emissions_core::ReportStatus;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Unknown sort key: {0}")]
    SortKey(String),
    #[error("Unknown sort order: {0}")]
    SortOrder(String),
}

/// Field the report list is ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Submission date, read as a calendar date
    #[default]
    Date,
    /// Total emissions, read as a number
    Emissions,
    /// Period label, compared as text
    Period,
}

impl FromStr for SortKey {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(SortKey::Date),
            "emissions" => Ok(SortKey::Emissions),
            "period" => Ok(SortKey::Period),
            _ => Err(QueryError::SortKey(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "asc")]
    Ascending,
    #[default]
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

impl FromStr for SortOrder {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(QueryError::SortOrder(s.to_string())),
        }
    }
}

/// Status dropdown: everything, or one exact status
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatusFilter {
    #[default]
    All,
    Only(ReportStatus),
}

impl StatusFilter {
    pub fn admits(&self, status: &ReportStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

impl From<String> for StatusFilter {
    fn from(label: String) -> Self {
        if label == "all" {
            StatusFilter::All
        } else {
            StatusFilter::Only(ReportStatus::from(label))
        }
    }
}

impl From<StatusFilter> for String {
    fn from(filter: StatusFilter) -> Self {
        filter.to_string()
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => f.write_str(status.as_str()),
        }
    }
}

/// Everything needed to turn the backing collection into the visible list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub status_filter: StatusFilter,
    #[serde(default, rename = "sortBy")]
    pub sort_key: SortKey,
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn status(mut self, status: impl Into<ReportStatus>) -> Self {
        self.status_filter = StatusFilter::Only(status.into());
        self
    }

    pub fn any_status(mut self) -> Self {
        self.status_filter = StatusFilter::All;
        self
    }

    pub fn sort_by(mut self, key: SortKey) -> Self {
        self.sort_key = key;
        self
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.sort_order = order;
        self
    }

    pub fn ascending(self) -> Self {
        self.order(SortOrder::Ascending)
    }

    pub fn descending(self) -> Self {
        self.order(SortOrder::Descending)
    }
}

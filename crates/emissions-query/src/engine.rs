//! Filter and sort over report records.
//!
//! Sorting decorates each surviving record with its parsed sort value once,
//! then runs a stable sort. Values that fail to parse (an emissions figure
//! that is not a number, a date in no known format) are placed after every
//! parsed value regardless of direction, in their original relative order.

use chrono::NaiveDate;
use emissions_core::Report;
use std::cmp::Ordering;
use tracing::trace;

use crate::query::{Query, SortKey, SortOrder};

/// Submission date formats accepted for date sorting
const DATE_FORMATS: &[&str] = &["%B %d, %Y", "%b %d, %Y", "%Y-%m-%d", "%m/%d/%Y"];

/// Parsed value a record is ordered by
#[derive(Debug, Clone, Copy, PartialEq)]
enum SortValue<'a> {
    Date(NaiveDate),
    Number(f64),
    Text(&'a str),
}

impl SortValue<'_> {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Date(a), SortValue::Date(b)) => a.cmp(b),
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            // A single query only ever produces one variant
            _ => Ordering::Equal,
        }
    }
}

/// Read `submission_date` as a calendar date
pub fn parse_submission_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Does the record pass both the search term and the status filter?
pub fn matches(report: &Report, q: &Query) -> bool {
    matches_term(report, &q.search_term.to_lowercase()) && q.status_filter.admits(&report.status)
}

fn matches_term(report: &Report, needle: &str) -> bool {
    needle.is_empty()
        || report.period.to_lowercase().contains(needle)
        || report.facility.to_lowercase().contains(needle)
}

fn sort_value(report: &Report, key: SortKey) -> Option<SortValue<'_>> {
    match key {
        SortKey::Date => parse_submission_date(&report.submission_date).map(SortValue::Date),
        SortKey::Emissions => report.emissions_value().map(SortValue::Number),
        SortKey::Period => Some(SortValue::Text(report.period.as_str())),
    }
}

/// Order two optional sort values; missing values always go last
fn compare_values(a: Option<&SortValue>, b: Option<&SortValue>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let ord = a.compare(b);
            match order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Filter and sort, borrowing from the backing collection
pub fn query_refs<'a>(records: &'a [Report], q: &Query) -> Vec<&'a Report> {
    let needle = q.search_term.to_lowercase();

    let mut keyed: Vec<(Option<SortValue<'a>>, &'a Report)> = records
        .iter()
        .filter(|r| matches_term(r, &needle) && q.status_filter.admits(&r.status))
        .map(|r| (sort_value(r, q.sort_key), r))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| compare_values(a.as_ref(), b.as_ref(), q.sort_order));

    trace!(
        total = records.len(),
        matched = keyed.len(),
        key = ?q.sort_key,
        order = ?q.sort_order,
        "report query"
    );

    keyed.into_iter().map(|(_, r)| r).collect()
}

/// Filter and sort, returning owned copies of the matching records
pub fn query(records: &[Report], q: &Query) -> Vec<Report> {
    query_refs(records, q).into_iter().cloned().collect()
}

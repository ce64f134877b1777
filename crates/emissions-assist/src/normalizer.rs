//! Message normalization before keyword matching.
//!
//! Lowercases and collapses whitespace runs to a single space. The message
//! is deliberately not trimmed: keywords are raw substrings and some carry
//! meaningful spaces.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Runs of whitespace (spaces, tabs, newlines)
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Normalize text for keyword matching
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    WHITESPACE.replace_all(&lowered, " ").into_owned()
}

/// A message with nothing but whitespace is never sent
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

//! Date range domain model
//!
//! A range is two optional calendar dates, as entered in the summary form.
//! Either side may be missing; the validator decides what that means.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input format for dates (matches an HTML date input)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateInputError {
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    Malformed(String),
}

/// Parses raw date input, treating empty input as absent
pub fn parse_date_input(raw: &str) -> Result<Option<NaiveDate>, DateInputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map(Some)
        .map_err(|_| DateInputError::Malformed(trimmed.to_string()))
}

/// A candidate date range, compared by calendar date only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Creates a range from optional bounds
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Creates a range with both bounds present
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(Some(start), Some(end))
    }

    /// Builds a range from raw form input
    pub fn parse(start: &str, end: &str) -> Result<Self, DateInputError> {
        Ok(Self::new(parse_date_input(start)?, parse_date_input(end)?))
    }

    /// Returns both bounds when present
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.start.zip(self.end)
    }

    /// Returns true if both bounds are set
    pub fn is_complete(&self) -> bool {
        self.bounds().is_some()
    }

    /// Inclusive number of days covered, if both bounds are set
    ///
    /// A reversed range yields a non-positive count.
    pub fn inclusive_days(&self) -> Option<i64> {
        self.bounds()
            .map(|(start, end)| (end - start).num_days() + 1)
    }
}

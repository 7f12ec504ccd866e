//! Summary requests
//!
//! The dashboard offers three kinds of summary. Each becomes a request
//! carrying the dates it covers and the analysis window in days.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::range::DateRange;

/// Kind of summary being requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryKind {
    /// User-selected date range
    Custom,
    /// Last 24 hours
    Daily,
    /// Flash News mode
    Flash,
}

impl SummaryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryKind::Custom => "custom",
            SummaryKind::Daily => "daily",
            SummaryKind::Flash => "flash",
        }
    }

    /// Returns true if requests of this kind go through date validation
    pub fn requires_validation(&self) -> bool {
        matches!(self, SummaryKind::Custom)
    }
}

/// A request ready to be handed to the summary backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub kind: SummaryKind,

    /// Dates covered (absent for flash summaries)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<DateRange>,

    /// Days the backend should analyse
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_days: Option<u32>,
}

impl SummaryRequest {
    /// Custom range request; the window is the inclusive day count
    pub fn custom(start: NaiveDate, end: NaiveDate) -> Self {
        let range = DateRange::between(start, end);
        let window_days = range
            .inclusive_days()
            .and_then(|days| u32::try_from(days.max(1)).ok());

        Self {
            kind: SummaryKind::Custom,
            range: Some(range),
            window_days,
        }
    }

    /// Last-24h request anchored on today
    ///
    /// On the first representable date the range collapses to that day.
    pub fn daily(today: NaiveDate) -> Self {
        let yesterday = today.pred_opt().unwrap_or(today);
        Self {
            kind: SummaryKind::Daily,
            range: Some(DateRange::between(yesterday, today)),
            window_days: Some(1),
        }
    }

    /// Flash News request
    pub fn flash() -> Self {
        Self {
            kind: SummaryKind::Flash,
            range: None,
            window_days: None,
        }
    }

    /// Short description for diagnostics
    pub fn describe(&self) -> String {
        match self.range.and_then(|r| r.bounds()) {
            Some((start, end)) => format!("{} summary {}..{}", self.kind.as_str(), start, end),
            None => format!("{} summary", self.kind.as_str()),
        }
    }
}

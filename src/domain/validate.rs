//! Summary request validation
//!
//! Validation is an ordered list of rules. Each rule either passes or
//! produces a rejection; the first rejection wins, so exactly one outcome
//! is reported per call.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::range::DateRange;

/// Result of checking a date range against the rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ValidationOutcome {
    Accepted,
    MissingDate,
    StartAfterEnd,
    StartInFuture,
    RangeTooLong { max_days: u32 },
}

impl ValidationOutcome {
    /// Returns true if the range may be submitted
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationOutcome::Accepted)
    }

    /// Human-readable rejection message (None when accepted)
    pub fn message(&self) -> Option<String> {
        match self {
            ValidationOutcome::Accepted => None,
            ValidationOutcome::MissingDate => Some("Select both dates.".to_string()),
            ValidationOutcome::StartAfterEnd => {
                Some("Start date must be before end date.".to_string())
            }
            ValidationOutcome::StartInFuture => {
                Some("Start date cannot be in the future.".to_string())
            }
            ValidationOutcome::RangeTooLong { max_days } => {
                Some(format!("Date range cannot exceed {} days.", max_days))
            }
        }
    }

    /// Stable snake_case label
    pub fn label(&self) -> &'static str {
        match self {
            ValidationOutcome::Accepted => "accepted",
            ValidationOutcome::MissingDate => "missing_date",
            ValidationOutcome::StartAfterEnd => "start_after_end",
            ValidationOutcome::StartInFuture => "start_in_future",
            ValidationOutcome::RangeTooLong { .. } => "range_too_long",
        }
    }
}

/// A single validation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Both dates must be present
    RequireBoth,
    /// Start must not be later than end
    StartNotAfterEnd,
    /// Start must not be later than today
    StartNotInFuture,
    /// Inclusive range length must not exceed the limit
    MaxRangeDays(u32),
}

impl Rule {
    /// Returns the rejection this rule produces for the range, if any
    ///
    /// Rules other than `RequireBoth` pass on incomplete ranges.
    pub fn check(&self, range: &DateRange, today: NaiveDate) -> Option<ValidationOutcome> {
        match *self {
            Rule::RequireBoth => (!range.is_complete()).then_some(ValidationOutcome::MissingDate),
            Rule::StartNotAfterEnd => range
                .bounds()
                .filter(|(start, end)| start > end)
                .map(|_| ValidationOutcome::StartAfterEnd),
            Rule::StartNotInFuture => range
                .start
                .filter(|start| *start > today)
                .map(|_| ValidationOutcome::StartInFuture),
            Rule::MaxRangeDays(max_days) => range
                .inclusive_days()
                .filter(|days| *days > i64::from(max_days))
                .map(|_| ValidationOutcome::RangeTooLong { max_days }),
        }
    }
}

/// Ordered rule list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validator {
    rules: Vec<Rule>,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            rules: vec![
                Rule::RequireBoth,
                Rule::StartNotAfterEnd,
                Rule::StartNotInFuture,
            ],
        }
    }
}

impl Validator {
    /// Creates a validator from an explicit rule order
    ///
    /// `RequireBoth` is placed first when missing, so an incomplete range is
    /// never accepted.
    pub fn new(mut rules: Vec<Rule>) -> Self {
        if !rules.contains(&Rule::RequireBoth) {
            rules.insert(0, Rule::RequireBoth);
        }
        Self { rules }
    }

    /// Default rules plus a maximum range length
    pub fn with_max_range_days(max_days: u32) -> Self {
        let mut validator = Self::default();
        validator.push(Rule::MaxRangeDays(max_days));
        validator
    }

    /// Appends a rule, evaluated after the existing ones
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Returns the rules in evaluation order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Checks the range against every rule in order
    pub fn validate(&self, range: &DateRange, today: NaiveDate) -> ValidationOutcome {
        self.rules
            .iter()
            .find_map(|rule| rule.check(range, today))
            .unwrap_or(ValidationOutcome::Accepted)
    }
}

/// Validates a range with the default rules
pub fn validate(range: &DateRange, today: NaiveDate) -> ValidationOutcome {
    Validator::default().validate(range, today)
}

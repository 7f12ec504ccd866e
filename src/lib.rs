//! Veille - summary requests for a media monitoring dashboard
//!
//! Validates the date range of a custom summary, then submits it to a
//! simulated backend and tracks the submission until it completes. Daily
//! (last 24h) and Flash News summaries share the same submission cycle.

pub mod domain;
pub mod workflow;
pub mod storage;
pub mod cli;

pub use domain::{validate, DateRange, SubmissionState, ValidationOutcome};
pub use workflow::{Submitter, SummaryForm};

//! Domain models for summary requests
//!
//! Pure types and rules, without any I/O or timing concerns.

mod range;
mod validate;
mod request;
mod submission;

pub use range::{parse_date_input, DateInputError, DateRange, DATE_FORMAT};
pub use validate::{validate, Rule, ValidationOutcome, Validator};
pub use request::{SummaryKind, SummaryRequest};
pub use submission::{SubmissionState, TransitionError, SUCCESS_MESSAGE};

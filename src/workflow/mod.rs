//! # Submission Workflow
//!
//! Runs validated summary requests against the (simulated) backend.
//!
//! ## Components
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Clock`] | Supplies today's date at validation time |
//! | [`Scheduler`] | Runs the backend job after a delay |
//! | [`Submitter`] | Validates a [`SummaryForm`] and dispatches accepted requests |
//! | [`PendingSubmission`] | Handle that receives the [`Completion`] |
//!
//! ## Testing
//!
//! [`ManualScheduler`] and [`FixedClock`] make the whole cycle synchronous:
//!
//! ```
//! use std::time::Duration;
//! use veille_cli::domain::DateRange;
//! use veille_cli::workflow::{Attempt, FixedClock, ManualScheduler, Submitter, SummaryForm};
//!
//! let today = "2024-06-01".parse().unwrap();
//! let clock = FixedClock(today);
//! let scheduler = ManualScheduler::new();
//! let submitter = Submitter::new(&clock, &scheduler);
//!
//! let range = DateRange::parse("2024-01-01", "2024-01-31").unwrap();
//! let mut form = SummaryForm::new(range);
//! let Attempt::Pending(pending) = submitter.submit(&mut form).unwrap() else {
//!     panic!("range should be accepted");
//! };
//!
//! scheduler.advance(Duration::from_secs(2));
//! let completion = pending.wait().unwrap();
//! form.finish(&completion).unwrap();
//! assert_eq!(form.message(), Some("Summary generated successfully."));
//! ```

mod clock;
mod scheduler;
mod submit;

pub use clock::{Clock, FixedClock, SystemClock};
pub use scheduler::{Job, ManualScheduler, Scheduler, ThreadScheduler};
pub use submit::{
    Attempt, Completion, PendingSubmission, SubmitError, Submitter, SummaryForm,
    DEFAULT_SUBMISSION_DELAY,
};

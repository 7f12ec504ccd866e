//! Submission state machine
//!
//! `Idle -> Pending -> Completed -> Idle`. Pending is only entered after an
//! accepted validation, and Completed only from Pending. Illegal
//! transitions return an error and leave the state untouched.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::validate::ValidationOutcome;

/// Message reported when the simulated backend finishes
pub const SUCCESS_MESSAGE: &str = "Summary generated successfully.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Cannot submit: validation outcome was {}", .0.label())]
    NotAccepted(ValidationOutcome),

    #[error("A submission is already pending")]
    AlreadyPending,

    #[error("Submission already completed; reset before submitting again")]
    AlreadyCompleted,

    #[error("No submission is pending")]
    NotPending,
}

/// State of the current submission
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    Pending,
    Completed(String),
}

impl SubmissionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, SubmissionState::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionState::Pending)
    }

    /// Returns the completion message, if completed
    pub fn completion_message(&self) -> Option<&str> {
        match self {
            SubmissionState::Completed(message) => Some(message),
            _ => None,
        }
    }

    /// Idle -> Pending, given the latest validation outcome
    pub fn begin(&mut self, outcome: ValidationOutcome) -> Result<(), TransitionError> {
        match self {
            SubmissionState::Pending => Err(TransitionError::AlreadyPending),
            SubmissionState::Completed(_) => Err(TransitionError::AlreadyCompleted),
            SubmissionState::Idle if !outcome.is_accepted() => {
                Err(TransitionError::NotAccepted(outcome))
            }
            SubmissionState::Idle => {
                *self = SubmissionState::Pending;
                Ok(())
            }
        }
    }

    /// Pending -> Completed
    pub fn complete(&mut self, message: impl Into<String>) -> Result<(), TransitionError> {
        if !self.is_pending() {
            return Err(TransitionError::NotPending);
        }
        *self = SubmissionState::Completed(message.into());
        Ok(())
    }

    /// Pending -> Idle, for a submission that will never complete
    pub fn abandon(&mut self) -> Result<(), TransitionError> {
        if !self.is_pending() {
            return Err(TransitionError::NotPending);
        }
        *self = SubmissionState::Idle;
        Ok(())
    }

    /// Back to Idle at the start of a new validation cycle
    ///
    /// A pending submission is left alone.
    pub fn reset(&mut self) -> Result<(), TransitionError> {
        if self.is_pending() {
            return Err(TransitionError::AlreadyPending);
        }
        *self = SubmissionState::Idle;
        Ok(())
    }
}

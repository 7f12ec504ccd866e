//! Summary submission
//!
//! A [`SummaryForm`] is the caller-owned state of one summary card: the
//! dates, the submission state and the last message shown. A
//! [`Submitter`] validates the form against today's date and hands
//! accepted requests to the scheduler, which simulates the backend.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use super::clock::Clock;
use super::scheduler::Scheduler;
use crate::domain::{
    DateRange, SubmissionState, SummaryRequest, TransitionError, ValidationOutcome, Validator,
    SUCCESS_MESSAGE,
};

/// Default simulated backend latency
pub const DEFAULT_SUBMISSION_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("A summary is already being generated")]
    AlreadyPending,

    #[error("Submission was dropped before completing")]
    Abandoned,

    #[error("Submission did not complete within {0:?}")]
    TimedOut(Duration),

    #[error(transparent)]
    Transition(TransitionError),
}

impl From<TransitionError> for SubmitError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::AlreadyPending => SubmitError::AlreadyPending,
            other => SubmitError::Transition(other),
        }
    }
}

/// Completion signal sent by the backend job
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub request: SummaryRequest,
    pub message: String,
}

/// Handle to an in-flight submission
#[derive(Debug)]
pub struct PendingSubmission {
    request: SummaryRequest,
    receiver: Receiver<Completion>,
}

impl PendingSubmission {
    pub fn request(&self) -> &SummaryRequest {
        &self.request
    }

    /// Returns the completion if the job has already run
    pub fn try_complete(&self) -> Result<Option<Completion>, SubmitError> {
        match self.receiver.try_recv() {
            Ok(completion) => Ok(Some(completion)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(SubmitError::Abandoned),
        }
    }

    /// Blocks until the job reports completion
    pub fn wait(self) -> Result<Completion, SubmitError> {
        self.receiver.recv().map_err(|_| SubmitError::Abandoned)
    }

    /// Blocks for at most `timeout`
    pub fn wait_timeout(&self, timeout: Duration) -> Result<Completion, SubmitError> {
        self.receiver.recv_timeout(timeout).map_err(|err| match err {
            RecvTimeoutError::Timeout => SubmitError::TimedOut(timeout),
            RecvTimeoutError::Disconnected => SubmitError::Abandoned,
        })
    }
}

/// Result of a submit attempt
#[derive(Debug)]
pub enum Attempt {
    /// Validation failed; nothing was scheduled
    Rejected(ValidationOutcome),
    /// Request accepted and scheduled
    Pending(PendingSubmission),
}

/// Caller-owned state of one summary card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SummaryForm {
    pub range: DateRange,
    state: SubmissionState,
    message: Option<String>,
}

impl SummaryForm {
    pub fn new(range: DateRange) -> Self {
        Self {
            range,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Last message to show (rejection or success)
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Starts a new validation cycle, clearing the previous result
    fn reset(&mut self) -> Result<(), SubmitError> {
        self.state.reset()?;
        self.message = None;
        Ok(())
    }

    /// Gives up on a pending submission whose handle failed
    ///
    /// Use after [`SubmitError::Abandoned`] or [`SubmitError::TimedOut`] so the
    /// form accepts new submissions. A late completion from the dropped
    /// handle is never applied.
    pub fn abandon(&mut self) -> Result<(), SubmitError> {
        self.state.abandon()?;
        self.message = None;
        Ok(())
    }

    /// Applies a completion, moving Pending to Completed
    pub fn finish(&mut self, completion: &Completion) -> Result<(), SubmitError> {
        self.state.complete(completion.message.clone())?;
        self.message = Some(completion.message.clone());
        Ok(())
    }
}

/// Validates forms and schedules accepted requests
pub struct Submitter<'a> {
    clock: &'a dyn Clock,
    scheduler: &'a dyn Scheduler,
    validator: Validator,
    delay: Duration,
}

impl<'a> Submitter<'a> {
    pub fn new(clock: &'a dyn Clock, scheduler: &'a dyn Scheduler) -> Self {
        Self {
            clock,
            scheduler,
            validator: Validator::default(),
            delay: DEFAULT_SUBMISSION_DELAY,
        }
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Validates the form against today's date, without submitting
    pub fn check(&self, form: &SummaryForm) -> ValidationOutcome {
        self.validator.validate(&form.range, self.clock.today())
    }

    /// Validates the form's range and schedules a custom summary if accepted
    ///
    /// Fails only when a submission is already pending; rejections are
    /// returned as [`Attempt::Rejected`] with the message set on the form.
    pub fn submit(&self, form: &mut SummaryForm) -> Result<Attempt, SubmitError> {
        form.reset()?;

        let outcome = self.check(form);
        let Some((start, end)) = form.range.bounds().filter(|_| outcome.is_accepted()) else {
            form.message = outcome.message();
            return Ok(Attempt::Rejected(outcome));
        };

        form.state.begin(outcome)?;
        Ok(Attempt::Pending(self.dispatch(SummaryRequest::custom(start, end))))
    }

    /// Schedules a request that needs no date validation (daily, flash)
    pub fn submit_request(
        &self,
        form: &mut SummaryForm,
        request: SummaryRequest,
    ) -> Result<PendingSubmission, SubmitError> {
        form.reset()?;
        form.state.begin(ValidationOutcome::Accepted)?;
        Ok(self.dispatch(request))
    }

    /// Last-24h summary anchored on today
    pub fn submit_daily(&self, form: &mut SummaryForm) -> Result<PendingSubmission, SubmitError> {
        let request = SummaryRequest::daily(self.clock.today());
        self.submit_request(form, request)
    }

    /// Flash News summary
    pub fn submit_flash(&self, form: &mut SummaryForm) -> Result<PendingSubmission, SubmitError> {
        self.submit_request(form, SummaryRequest::flash())
    }

    fn dispatch(&self, request: SummaryRequest) -> PendingSubmission {
        let (sender, receiver) = mpsc::channel();
        let job_request = request.clone();

        self.scheduler.schedule(
            self.delay,
            Box::new(move || {
                // Receiver may be gone if the caller stopped waiting
                let _ = sender.send(Completion {
                    request: job_request,
                    message: SUCCESS_MESSAGE.to_string(),
                });
            }),
        );

        PendingSubmission { request, receiver }
    }
}

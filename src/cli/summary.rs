//! Summary commands (check, summary, daily, flash)
//!
//! Each command drives one submission cycle on a fresh form and waits for
//! the backend to report completion before exiting.

use anyhow::{Context, Result};

use super::output::Output;
use crate::domain::{DateRange, ValidationOutcome};
use crate::storage::Config;
use crate::workflow::{Attempt, Clock, PendingSubmission, Submitter, SummaryForm, ThreadScheduler};

/// Validate a range without submitting it
pub fn check(output: &Output, config: &Config, clock: &dyn Clock, range: DateRange) -> Result<()> {
    let today = clock.today();
    if output.is_verbose() {
        output.verbose_ctx("check", &format!("Validating {:?} against {}", range, today));
    }

    let outcome = config.validator().validate(&range, today);
    output.verbose_ctx("check", &format!("Outcome: {}", outcome.label()));

    if !output.is_json() && outcome.is_accepted() {
        match range.inclusive_days() {
            Some(days) => println!("Date range accepted ({} days).", days),
            None => println!("Date range accepted."),
        }
    }

    report_outcome(output, &range, outcome)
}

/// Validate and submit a custom range summary
pub fn custom(output: &Output, config: &Config, clock: &dyn Clock, range: DateRange) -> Result<()> {
    let scheduler = ThreadScheduler;
    let submitter = Submitter::new(clock, &scheduler)
        .with_validator(config.validator())
        .with_delay(config.submission_delay());
    let mut form = SummaryForm::new(range);

    if output.is_verbose() {
        output.verbose_ctx("summary", &format!("Submitting {:?}", range));
    }
    match submitter.submit(&mut form)? {
        Attempt::Rejected(outcome) => {
            output.verbose_ctx("summary", &format!("Rejected: {}", outcome.label()));
            report_outcome(output, &range, outcome)
        }
        Attempt::Pending(pending) => complete(output, &submitter, &mut form, pending),
    }
}

/// Submit the last-24h summary
pub fn daily(output: &Output, config: &Config, clock: &dyn Clock) -> Result<()> {
    let scheduler = ThreadScheduler;
    let submitter = Submitter::new(clock, &scheduler).with_delay(config.submission_delay());
    let mut form = SummaryForm::default();

    let pending = submitter.submit_daily(&mut form)?;
    complete(output, &submitter, &mut form, pending)
}

/// Submit a Flash News summary
pub fn flash(output: &Output, config: &Config, clock: &dyn Clock) -> Result<()> {
    let scheduler = ThreadScheduler;
    let submitter = Submitter::new(clock, &scheduler).with_delay(config.submission_delay());
    let mut form = SummaryForm::default();

    let pending = submitter.submit_flash(&mut form)?;
    complete(output, &submitter, &mut form, pending)
}

/// Waits for a pending submission and reports the result
fn complete(
    output: &Output,
    submitter: &Submitter<'_>,
    form: &mut SummaryForm,
    pending: PendingSubmission,
) -> Result<()> {
    if output.is_verbose() {
        output.verbose_ctx(
            "submit",
            &format!(
                "Generating {} (backend delay {:?})",
                pending.request().describe(),
                submitter.delay()
            ),
        );
    }

    let completion = match pending.wait() {
        Ok(completion) => completion,
        Err(err) => {
            form.abandon()?;
            return Err(err).context("Summary generation failed");
        }
    };
    form.finish(&completion)?;
    if output.is_verbose() {
        output.verbose_ctx("submit", &format!("Completed: {}", completion.request.describe()));
    }

    if output.is_json() {
        output.data(&serde_json::json!({
            "success": true,
            "message": completion.message,
            "request": completion.request,
            "state": form.state(),
        }));
    } else {
        output.success(&completion.message);
    }

    Ok(())
}

/// Prints the outcome object in JSON mode, then fails on rejection
fn report_outcome(output: &Output, range: &DateRange, outcome: ValidationOutcome) -> Result<()> {
    if output.is_json() {
        output.data(&serde_json::json!({
            "range": range,
            "outcome": outcome.label(),
            "message": outcome.message(),
            "days": range.inclusive_days(),
        }));
    }

    match outcome.message() {
        Some(message) => anyhow::bail!("{}", message),
        None => Ok(()),
    }
}

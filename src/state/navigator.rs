//! Step navigator and response collector
//!
//! Walks a form session through the steps of a [`QuestionCatalog`],
//! validates the required answers of the visible step and accumulates every
//! answer until the last step hands the full [`ResponseSet`] to submission.
//! The network side of submission lives in the app; this type only tracks
//! whether a submission is in flight.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::catalog::QuestionCatalog;
use super::{ErrorSet, Portfolio, Question, ResponseSet};

/// Message recorded against a required question left blank
pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// Which form a session fills out
#[derive(Debug, Clone, PartialEq)]
pub enum FormScope {
    /// The default form not tied to any portfolio
    Global,
    Portfolio(Portfolio),
}

impl FormScope {
    pub fn portfolio_id(&self) -> Option<&str> {
        match self {
            FormScope::Global => None,
            FormScope::Portfolio(p) => Some(&p.id),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            FormScope::Global => "General application",
            FormScope::Portfolio(p) => &p.title,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            FormScope::Global => None,
            FormScope::Portfolio(p) if p.description.is_empty() => None,
            FormScope::Portfolio(p) => Some(&p.description),
        }
    }
}

/// Payload posted to the submission endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_id: Option<String>,
    pub responses: ResponseSet,
}

/// Why a submission was not started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("Please fill in the required fields.")]
    Invalid,
    #[error("A submission is already in progress.")]
    InFlight,
    #[error("This form has already been submitted.")]
    Completed,
}

/// Result of moving forward
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// Moved to the given step
    Moved(u32),
    /// The current step has blank required answers
    Invalid,
    /// Last step passed validation; post this payload
    Submit(SubmissionRequest),
    Rejected(SubmitRejected),
}

#[derive(Debug, Clone)]
pub struct StepNavigator {
    scope: FormScope,
    catalog: QuestionCatalog,
    current_step: u32,
    responses: ResponseSet,
    errors: ErrorSet,
    submitting: bool,
    completed: bool,
}

impl StepNavigator {
    pub fn new(scope: FormScope, catalog: QuestionCatalog) -> Self {
        Self {
            scope,
            catalog,
            current_step: 1,
            responses: ResponseSet::new(),
            errors: ErrorSet::new(),
            submitting: false,
            completed: false,
        }
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub fn current_step(&self) -> u32 {
        self.current_step
    }

    pub fn max_step(&self) -> u32 {
        self.catalog.max_step()
    }

    pub fn is_first_step(&self) -> bool {
        self.current_step == 1
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step >= self.max_step()
    }

    /// Completion percentage shown by the progress bar
    pub fn progress_percent(&self) -> u16 {
        let ratio = f64::from(self.current_step) / f64::from(self.max_step());
        (ratio * 100.0).round() as u16
    }

    pub fn current_questions(&self) -> Vec<&Question> {
        self.catalog.questions_for_step(self.current_step)
    }

    pub fn errors(&self) -> &ErrorSet {
        &self.errors
    }

    pub fn error(&self, question_id: &str) -> Option<&str> {
        self.errors.get(question_id).map(String::as_str)
    }

    pub fn answer(&self, question_id: &str) -> &str {
        self.responses
            .get(question_id)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Store the latest answer and drop that question's error once it has input
    pub fn record_answer(&mut self, question_id: &str, text: String) {
        if !text.is_empty() {
            self.errors.remove(question_id);
        }
        self.responses.insert(question_id.to_string(), text);
    }

    /// Recompute the errors of the current step; true if it has none
    pub fn validate_current_step(&mut self) -> bool {
        let failed: Vec<String> = self
            .current_questions()
            .into_iter()
            .filter(|q| q.is_required && self.answer(&q.id).trim().is_empty())
            .map(|q| q.id.clone())
            .collect();

        for question in self.catalog.questions_for_step(self.current_step) {
            self.errors.remove(&question.id);
        }
        for id in &failed {
            self.errors.insert(id.clone(), REQUIRED_MESSAGE.to_string());
        }

        if !failed.is_empty() {
            debug!(step = self.current_step, failed = failed.len(), "Step validation failed");
        }
        failed.is_empty()
    }

    /// Validate and move to the next step, or submit from the last one
    pub fn advance(&mut self) -> Advance {
        if !self.validate_current_step() {
            return Advance::Invalid;
        }

        if self.current_step < self.max_step() {
            self.current_step += 1;
            debug!(step = self.current_step, "Advanced");
            return Advance::Moved(self.current_step);
        }

        match self.submit() {
            Ok(request) => Advance::Submit(request),
            Err(reason) => Advance::Rejected(reason),
        }
    }

    /// Go back one step without validating; false at the first step
    pub fn retreat(&mut self) -> bool {
        if self.current_step > 1 {
            self.current_step -= 1;
            debug!(step = self.current_step, "Retreated");
            true
        } else {
            false
        }
    }

    /// Validate the current step and mark a submission as in flight
    pub fn submit(&mut self) -> Result<SubmissionRequest, SubmitRejected> {
        if self.completed {
            return Err(SubmitRejected::Completed);
        }
        if self.submitting {
            return Err(SubmitRejected::InFlight);
        }
        if !self.validate_current_step() {
            return Err(SubmitRejected::Invalid);
        }
        Ok(self.start_submission())
    }

    fn start_submission(&mut self) -> SubmissionRequest {
        self.submitting = true;
        info!(
            portfolio = self.scope.portfolio_id().unwrap_or("-"),
            answers = self.responses.len(),
            "Submitting responses"
        );
        SubmissionRequest {
            portfolio_id: self.scope.portfolio_id().map(str::to_string),
            responses: self.responses.clone(),
        }
    }

    /// Apply the outcome of the in-flight submission.
    ///
    /// Success completes the session and discards the answers. Failure keeps
    /// every answer and the current step so the user can trigger it again.
    pub fn finish_submit(&mut self, outcome: Result<(), String>) -> Result<(), String> {
        self.submitting = false;
        match outcome {
            Ok(()) => {
                self.completed = true;
                self.responses.clear();
                self.errors.clear();
                info!("Submission accepted");
                Ok(())
            }
            Err(message) => {
                warn!("Submission failed: {message}");
                Err(message)
            }
        }
    }
}

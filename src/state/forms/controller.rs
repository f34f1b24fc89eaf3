//! Form controller: registry + engine + submit state machine
//!
//! The controller is driven by discrete UI events (`change`, `blur`,
//! submit). After every event it produces a fresh [`FormState`] snapshot and
//! hands it to subscribed listeners.
//!
//! Submission is split in two so the UI loop never waits on the handler:
//! [`FormController::begin_submit`] validates and hands back a
//! [`PendingSubmission`] that can run on another task, and
//! [`FormController::settle`] applies its outcome later. Outcomes carry a
//! ticket; anything not matching the pending ticket is dropped.

use super::error::{ConfigurationError, SubmissionError};
use super::field::FieldSpec;
use super::form_state::{FormState, FormStatus, ValidationMode};
use super::registry::{FieldRegistry, FieldValues};
use super::validation::{evaluate_all, ValidationResult};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Receives validated values once the whole form is valid
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmitHandler: Send + Sync {
    async fn submit(&self, values: FieldValues) -> Result<(), SubmissionError>;
}

/// Observer notified with a new snapshot after each event
pub type FormListener = Box<dyn Fn(&FormState) + Send + Sync>;

/// Field set and trigger mode for one form
#[derive(Debug, Clone, Default)]
pub struct FormConfig {
    pub fields: Vec<FieldSpec>,
    pub mode: ValidationMode,
}

/// Identifies one submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionTicket(Uuid);

impl SubmissionTicket {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Validated submission waiting to be handed to the handler
pub struct PendingSubmission {
    pub ticket: SubmissionTicket,
    pub values: FieldValues,
    handler: Arc<dyn SubmitHandler>,
}

impl fmt::Debug for PendingSubmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingSubmission")
            .field("ticket", &self.ticket)
            .finish_non_exhaustive()
    }
}

impl PendingSubmission {
    /// Invoke the handler once
    pub async fn run(self) -> SubmissionOutcome {
        let result = self.handler.submit(self.values).await;
        SubmissionOutcome {
            ticket: self.ticket,
            result,
        }
    }
}

/// Result of a handler run, to be passed back to [`FormController::settle`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub ticket: SubmissionTicket,
    pub result: Result<(), SubmissionError>,
}

/// What a submit attempt led to
#[derive(Debug)]
pub enum SubmitAttempt {
    /// Form invalid; handler not invoked
    Blocked(ValidationResult),
    /// A submission is already pending; ignored
    InFlight,
    /// Valid; run the pending submission and settle it
    Ready(PendingSubmission),
}

pub struct FormController {
    specs: Vec<FieldSpec>,
    registry: FieldRegistry,
    errors: ValidationResult,
    mode: ValidationMode,
    status: FormStatus,
    submit_count: u32,
    pending: Option<SubmissionTicket>,
    handler: Arc<dyn SubmitHandler>,
    listeners: Vec<FormListener>,
}

impl fmt::Debug for FormController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormController")
            .field("registry", &self.registry)
            .field("errors", &self.errors)
            .field("mode", &self.mode)
            .field("status", &self.status)
            .field("submit_count", &self.submit_count)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl FormController {
    /// Register every configured field
    ///
    /// Fails on duplicate names and on `match` rules pointing at a field
    /// that is not part of the form.
    pub fn new(
        config: FormConfig,
        handler: Arc<dyn SubmitHandler>,
    ) -> Result<Self, ConfigurationError> {
        let mut registry = FieldRegistry::new();
        for spec in &config.fields {
            registry.register(&spec.name, spec.rules.clone())?;
        }
        let dependencies = config
            .fields
            .iter()
            .flat_map(|spec| spec.rules.iter().filter_map(|r| r.dependency()));
        for other in dependencies {
            if !registry.contains(other) {
                return Err(ConfigurationError::UnknownField(other.to_string()));
            }
        }

        Ok(Self {
            specs: config.fields,
            registry,
            errors: ValidationResult::default(),
            mode: config.mode,
            status: FormStatus::Pristine,
            submit_count: 0,
            pending: None,
            handler,
            listeners: Vec::new(),
        })
    }

    pub fn specs(&self) -> &[FieldSpec] {
        &self.specs
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.registry.field(name).map(|f| f.value.as_str())
    }

    /// Build the current snapshot
    pub fn snapshot(&self) -> FormState {
        FormState {
            fields: self.registry.snapshot(),
            errors: self.errors.clone(),
            mode: self.mode,
            status: self.status.clone(),
            submit_count: self.submit_count,
        }
    }

    pub fn subscribe(&mut self, listener: FormListener) {
        self.listeners.push(listener);
    }

    fn notify(&self) {
        if self.listeners.is_empty() {
            return;
        }
        let state = self.snapshot();
        for listener in &self.listeners {
            listener(&state);
        }
    }

    fn mark_editing(&mut self) {
        if !self.status.is_submitting() {
            self.status = FormStatus::Editing;
        }
    }

    fn revalidate(&mut self) {
        self.errors = evaluate_all(&self.registry);
    }

    /// User changed a field's value
    pub fn change(&mut self, name: &str, value: &str) -> Result<(), ConfigurationError> {
        self.registry.set_value(name, value)?;
        self.mark_editing();
        if self.mode == ValidationMode::OnChange || self.submit_count > 0 {
            self.revalidate();
        }
        self.notify();
        Ok(())
    }

    /// User left a field
    pub fn blur(&mut self, name: &str) -> Result<(), ConfigurationError> {
        self.registry.set_touched(name)?;
        self.mark_editing();
        if self.mode != ValidationMode::OnSubmit || self.submit_count > 0 {
            self.revalidate();
        }
        self.notify();
        Ok(())
    }

    /// Validate everything and, if valid, move to `Submitting`
    pub fn begin_submit(&mut self) -> SubmitAttempt {
        if self.status.is_submitting() {
            tracing::debug!("submit ignored while a submission is pending");
            return SubmitAttempt::InFlight;
        }

        self.submit_count += 1;
        self.registry.touch_all();
        self.revalidate();

        if !self.errors.is_valid() {
            tracing::debug!(errors = self.errors.error_count(), "submit blocked");
            self.status = FormStatus::Editing;
            self.notify();
            return SubmitAttempt::Blocked(self.errors.clone());
        }

        let ticket = SubmissionTicket::new();
        self.pending = Some(ticket);
        self.status = FormStatus::Submitting;
        self.notify();

        SubmitAttempt::Ready(PendingSubmission {
            ticket,
            values: self.registry.values(),
            handler: Arc::clone(&self.handler),
        })
    }

    /// Apply a handler outcome; returns false when it is stale
    pub fn settle(&mut self, outcome: SubmissionOutcome) -> bool {
        if self.pending != Some(outcome.ticket) {
            tracing::warn!(ticket = ?outcome.ticket, "discarding stale submission outcome");
            return false;
        }
        self.pending = None;
        self.status = match outcome.result {
            Ok(()) => FormStatus::Accepted,
            Err(err) => FormStatus::Rejected(Some(err.message().to_string())),
        };
        self.notify();
        true
    }

    /// Forget the pending submission so its outcome is ignored
    pub fn cancel_pending(&mut self) {
        if self.pending.take().is_some() {
            self.status = FormStatus::Editing;
            self.notify();
        }
    }

    /// Back to the freshly mounted state
    pub fn reset(&mut self) {
        self.registry.reset();
        self.errors = ValidationResult::default();
        self.status = FormStatus::Pristine;
        self.submit_count = 0;
        self.pending = None;
        self.notify();
    }
}

//! Form domain layer
//!
//! Field registry, validation rules and engine, and the controller that
//! gates submission. Nothing here knows about the terminal.

mod controller;
mod error;
mod field;
mod form_state;
mod registry;
mod rule;
mod screens;
mod validation;

pub use controller::{FormController, SubmissionOutcome, SubmitAttempt, SubmitHandler};
pub use error::SubmissionError;
pub use field::{Field, FieldSpec};
pub use form_state::{FormState, FormStatus, ValidationMode};
pub use registry::FieldValues;
pub use screens::{sign_in_form, sign_up_form, DEFAULT_PASSWORD_MIN_LENGTH, EMAIL, PASSWORD};

#[cfg(test)]
pub use screens::CONFIRM_PASSWORD;

//! Form state snapshots handed to the rendering layer

use super::field::Field;
use super::validation::ValidationResult;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// When the controller re-runs validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationMode {
    /// On every value change (and on blur)
    #[default]
    OnChange,
    /// When a field loses focus
    OnBlur,
    /// Only on submit attempts
    OnSubmit,
}

impl ValidationMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::OnChange => "onChange",
            Self::OnBlur => "onBlur",
            Self::OnSubmit => "onSubmit",
        }
    }
}

impl FromStr for ValidationMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "onchange" | "change" => Ok(Self::OnChange),
            "onblur" | "blur" => Ok(Self::OnBlur),
            "onsubmit" | "submit" => Ok(Self::OnSubmit),
            other => Err(anyhow::anyhow!("Unknown validation mode: {other}")),
        }
    }
}

/// Lifecycle of a form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormStatus {
    /// Nothing changed or touched yet
    #[default]
    Pristine,
    Editing,
    /// Waiting for the submit handler
    Submitting,
    /// Handler completed
    Accepted,
    /// Handler failed, with its message if any
    Rejected(Option<String>),
}

impl FormStatus {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pristine => "Pristine",
            Self::Editing => "Editing",
            Self::Submitting => "Submitting",
            Self::Accepted => "Accepted",
            Self::Rejected(_) => "Rejected",
        }
    }
}

/// Immutable view of a form after an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    /// Fields in registration order
    pub fields: Vec<Field>,
    /// Result of the last evaluation pass (all fields, touched or not)
    pub errors: ValidationResult,
    pub mode: ValidationMode,
    pub status: FormStatus,
    pub submit_count: u32,
}

impl FormState {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Error to display for a field: hidden until the field is touched
    pub fn visible_error(&self, name: &str) -> Option<&str> {
        self.field(name)
            .filter(|f| f.is_touched)
            .and_then(|_| self.errors.error(name))
    }

    /// Errors of touched fields only
    pub fn visible_errors(&self) -> ValidationResult {
        self.errors.filtered(|name| {
            self.fields
                .iter()
                .any(|f| f.name == name && f.is_touched)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!("onChange".parse::<ValidationMode>().unwrap(), ValidationMode::OnChange);
        assert_eq!("blur".parse::<ValidationMode>().unwrap(), ValidationMode::OnBlur);
        assert_eq!(" ONSUBMIT ".parse::<ValidationMode>().unwrap(), ValidationMode::OnSubmit);
        assert!("sometimes".parse::<ValidationMode>().is_err());
    }

    #[test]
    fn test_mode_serde_uses_camel_case() {
        let json = serde_json::to_string(&ValidationMode::OnBlur).unwrap();
        assert_eq!(json, "\"onBlur\"");
        let parsed: ValidationMode = serde_json::from_str("\"onSubmit\"").unwrap();
        assert_eq!(parsed, ValidationMode::OnSubmit);
    }

    #[test]
    fn test_status_default_and_labels() {
        assert_eq!(FormStatus::default(), FormStatus::Pristine);
        assert!(FormStatus::Submitting.is_submitting());
        assert_eq!(FormStatus::Rejected(None).label(), "Rejected");
    }

    #[test]
    fn test_visible_error_requires_touch() {
        let mut email = Field::new("email");
        let errors: ValidationResult =
            [("email".to_string(), Some("Email is required".to_string()))]
                .into_iter()
                .collect();
        let untouched = FormState {
            fields: vec![email.clone()],
            errors: errors.clone(),
            mode: ValidationMode::OnChange,
            status: FormStatus::Editing,
            submit_count: 0,
        };
        assert_eq!(untouched.visible_error("email"), None);
        assert!(untouched.visible_errors().is_valid());

        email.is_touched = true;
        let touched = FormState {
            fields: vec![email],
            ..untouched
        };
        assert_eq!(touched.visible_error("email"), Some("Email is required"));
        assert_eq!(touched.visible_errors().error_count(), 1);
    }
}

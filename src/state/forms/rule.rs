//! Validation rules attached to form fields

use regex::Regex;
use std::sync::LazyLock;

/// Shape accepted by the email rule
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("EMAIL_PATTERN is a valid regex"));

/// What a rule checks
#[derive(Debug, Clone)]
pub enum RuleKind {
    /// Value must be non-empty after trimming
    Required,
    /// Value must match the regex
    Pattern(Regex),
    /// Trimmed value must have at least this many characters
    MinLength(usize),
    /// Value must equal the current value of another field
    Match(String),
}

impl RuleKind {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Pattern(_) => "pattern",
            Self::MinLength(_) => "minLength",
            Self::Match(_) => "match",
        }
    }
}

/// A validation predicate and the message shown when it fails
#[derive(Debug, Clone)]
pub struct Rule {
    pub kind: RuleKind,
    pub message: String,
}

impl Rule {
    pub fn required(message: impl Into<String>) -> Self {
        Self {
            kind: RuleKind::Required,
            message: message.into(),
        }
    }

    pub fn pattern(regex: Regex, message: impl Into<String>) -> Self {
        Self {
            kind: RuleKind::Pattern(regex),
            message: message.into(),
        }
    }

    /// Pattern rule using [`EMAIL_PATTERN`]
    pub fn email(message: impl Into<String>) -> Self {
        Self::pattern(EMAIL_REGEX.clone(), message)
    }

    pub fn min_length(min: usize, message: impl Into<String>) -> Self {
        Self {
            kind: RuleKind::MinLength(min),
            message: message.into(),
        }
    }

    /// Value must equal `other`'s value (e.g. confirm password)
    pub fn matches(other: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: RuleKind::Match(other.into()),
            message: message.into(),
        }
    }

    /// Field this rule depends on, if any
    pub fn dependency(&self) -> Option<&str> {
        match &self.kind {
            RuleKind::Match(other) => Some(other),
            _ => None,
        }
    }
}

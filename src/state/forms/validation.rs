//! Validation engine
//!
//! Rules run in registration order and the first failure wins. The engine is
//! pure: the same registry contents always produce the same
//! [`ValidationResult`], whatever mode triggered the pass.

use super::registry::{FieldRegistry, FieldValues};
use super::rule::{Rule, RuleKind};
use std::collections::BTreeMap;

/// Field name to error message (`None` = valid)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    entries: BTreeMap<String, Option<String>>,
}

impl ValidationResult {
    /// Error for a field; absent fields are valid
    pub fn error(&self, name: &str) -> Option<&str> {
        self.entries.get(name).and_then(|e| e.as_deref())
    }

    pub fn is_valid(&self) -> bool {
        self.entries.values().all(Option::is_none)
    }

    /// Number of failing fields
    pub fn error_count(&self) -> usize {
        self.entries.values().filter(|e| e.is_some()).count()
    }

    /// Failing fields and their messages
    pub fn errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(name, e)| e.as_deref().map(|msg| (name.as_str(), msg)))
    }

    /// Copy keeping only the fields accepted by `keep`
    pub fn filtered(&self, mut keep: impl FnMut(&str) -> bool) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(name, _)| keep(name.as_str()))
                .map(|(name, e)| (name.clone(), e.clone()))
                .collect(),
        }
    }
}

impl FromIterator<(String, Option<String>)> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = (String, Option<String>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

fn check(rule: &Rule, value: &str, all_values: &FieldValues) -> bool {
    let trimmed = value.trim();
    match &rule.kind {
        RuleKind::Required => !trimmed.is_empty(),
        // Empty values are left to `Required`
        RuleKind::Pattern(regex) => value.is_empty() || regex.is_match(value),
        RuleKind::MinLength(min) => value.is_empty() || trimmed.chars().count() >= *min,
        RuleKind::Match(other) => {
            let other_value = all_values.get(other).map(String::as_str).unwrap_or("");
            value == other_value
        }
    }
}

/// Evaluate one field's rules, returning the first failing message
pub fn evaluate(rules: &[Rule], value: &str, all_values: &FieldValues) -> Option<String> {
    let failed = rules.iter().find(|rule| !check(rule, value, all_values))?;
    tracing::trace!(rule = failed.kind.name(), "rule failed");
    Some(failed.message.clone())
}

/// Evaluate every registered field
pub fn evaluate_all(registry: &FieldRegistry) -> ValidationResult {
    let values = registry.values();
    let result: ValidationResult = registry
        .iter()
        .map(|(field, rules)| {
            (
                field.name.clone(),
                evaluate(rules, &field.value, &values),
            )
        })
        .collect();
    tracing::debug!(errors = result.error_count(), "evaluated form");
    result
}

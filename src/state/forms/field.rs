//! Form field value objects

use super::rule::Rule;

/// A single named input and its interaction flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: String,
    /// Set once the user has left the field (or on submit)
    pub is_touched: bool,
    /// Set once the value has been changed
    pub is_dirty: bool,
}

impl Field {
    /// Create an empty, untouched field
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: String::new(),
            is_touched: false,
            is_dirty: false,
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self, secret: bool) -> String {
        if secret {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

/// Static description of a field: how to register it and how to show it
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    /// Mask the value when rendering (passwords)
    pub secret: bool,
    pub rules: Vec<Rule>,
}

impl FieldSpec {
    /// Create a new plain text field
    pub fn text(name: &str, label: &str, rules: Vec<Rule>) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            secret: false,
            rules,
        }
    }

    /// Create a new masked field
    pub fn secret(name: &str, label: &str, rules: Vec<Rule>) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            secret: true,
            rules,
        }
    }
}

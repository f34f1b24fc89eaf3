//! Field registry: the single owner of field values and flags

use super::error::ConfigurationError;
use super::field::Field;
use super::rule::Rule;
use std::collections::BTreeMap;

/// Field name to current value
pub type FieldValues = BTreeMap<String, String>;

#[derive(Debug, Clone)]
struct Entry {
    field: Field,
    rules: Vec<Rule>,
}

/// Registered fields in registration order
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    entries: Vec<Entry>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty field with its rules
    pub fn register(&mut self, name: &str, rules: Vec<Rule>) -> Result<(), ConfigurationError> {
        if self.contains(name) {
            return Err(ConfigurationError::DuplicateField(name.to_string()));
        }
        self.entries.push(Entry {
            field: Field::new(name),
            rules,
        });
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.field.name == name)
    }

    fn entry_mut(&mut self, name: &str) -> Result<&mut Entry, ConfigurationError> {
        self.entries
            .iter_mut()
            .find(|e| e.field.name == name)
            .ok_or_else(|| ConfigurationError::UnknownField(name.to_string()))
    }

    /// Update a value and mark the field dirty
    pub fn set_value(&mut self, name: &str, value: &str) -> Result<(), ConfigurationError> {
        let entry = self.entry_mut(name)?;
        entry.field.value = value.to_string();
        entry.field.is_dirty = true;
        Ok(())
    }

    /// Mark a field as touched
    pub fn set_touched(&mut self, name: &str) -> Result<(), ConfigurationError> {
        self.entry_mut(name)?.field.is_touched = true;
        Ok(())
    }

    /// Mark every field as touched
    pub fn touch_all(&mut self) {
        for entry in &mut self.entries {
            entry.field.is_touched = true;
        }
    }

    /// Clear values and flags, keeping registrations
    pub fn reset(&mut self) {
        for entry in &mut self.entries {
            entry.field = Field::new(&entry.field.name);
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.entries
            .iter()
            .map(|e| &e.field)
            .find(|f| f.name == name)
    }

    /// Fields paired with their rules, in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&Field, &[Rule])> {
        self.entries.iter().map(|e| (&e.field, e.rules.as_slice()))
    }

    /// Copy of all fields in registration order
    pub fn snapshot(&self) -> Vec<Field> {
        self.entries.iter().map(|e| e.field.clone()).collect()
    }

    pub fn values(&self) -> FieldValues {
        self.entries
            .iter()
            .map(|e| (e.field.name.clone(), e.field.value.clone()))
            .collect()
    }
}

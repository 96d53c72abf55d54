//! Group of validated fields

use std::collections::BTreeMap;

use super::ValidatedField;

/// Named fields validated together
#[derive(Debug, Default)]
pub struct FormGroup {
    fields: BTreeMap<String, ValidatedField>,
}

impl FormGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_field(&mut self, name: impl Into<String>, field: ValidatedField) {
        self.fields.insert(name.into(), field);
    }

    pub fn field(&self, name: &str) -> Option<&ValidatedField> {
        self.fields.get(name)
    }

    /// Set a field's value; returns false if the form has no such field
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.fields.get_mut(name) {
            Some(field) => {
                field.set_value(value);
                true
            }
            None => false,
        }
    }

    /// Wait for every field's pending validation
    pub async fn settled(&mut self) {
        for field in self.fields.values_mut() {
            field.settled().await;
        }
    }

    pub fn is_valid(&self) -> bool {
        self.fields.values().all(ValidatedField::is_valid)
    }

    /// Whether `field` currently fails the validator named `key`
    pub fn has_error(&self, key: &str, field: &str) -> bool {
        self.fields.get(field).map(|f| f.has_error(key)).unwrap_or(false)
    }
}

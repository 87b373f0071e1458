//! Credential entries: an ordered set of named fields.

use crate::constants;
use crate::error::{ShellError, ShellResult};
use crate::models::value::Value;

/// An entry's fields in insertion order. Field keys are unique and matched
/// case-insensitively (stored lowercase).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    fields: Vec<(String, Value)>,
}

impl Entry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an entry carrying only a title.
    pub fn titled(title: &str) -> Self {
        let mut entry = Self::new();
        entry.set(constants::TITLE_FIELD, Value::text("Title", title));
        entry
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        let key = field.to_ascii_lowercase();
        self.fields.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Set `field`, replacing any previous value in place. Returns true when
    /// an existing value was overwritten.
    pub fn set(&mut self, field: &str, value: Value) -> bool {
        let key = field.to_ascii_lowercase();
        if let Some(slot) = self.fields.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
            return true;
        }
        self.fields.push((key, value));
        false
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Display identity; empty when the entry has no text title.
    pub fn title(&self) -> &str {
        self.text(constants::TITLE_FIELD).unwrap_or("")
    }

    /// Text payload of `field`, if present and textual.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_text)
    }

    /// The attachment value. Absence is an error, never an empty value.
    pub fn attachment(&self) -> ShellResult<&Value> {
        let value = self
            .get(constants::ATTACHMENT_FIELD)
            .ok_or(ShellError::NoAttachment)?;
        if value.as_bytes().is_none() {
            return Err(ShellError::WrongFieldType(
                constants::ATTACHMENT_FIELD.to_string(),
            ));
        }
        Ok(value)
    }
}

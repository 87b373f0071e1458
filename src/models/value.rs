//! Typed field values stored in an entry.

use zeroize::Zeroize;

/// Payload of a field. Attachments are always `Binary`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldData {
    Text(String),
    Binary(Vec<u8>),
}

/// A named unit of data held by an entry field. Payloads are wiped on drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    pub name: String,
    pub data: FieldData,
}

impl Value {
    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: FieldData::Text(text.into()),
        }
    }

    pub fn binary(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data: FieldData::Binary(bytes),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            FieldData::Text(s) => Some(s),
            FieldData::Binary(_) => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match &self.data {
            FieldData::Binary(b) => Some(b),
            FieldData::Text(_) => None,
        }
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        match &self.data {
            FieldData::Text(s) => s.len(),
            FieldData::Binary(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for Value {
    fn drop(&mut self) {
        match &mut self.data {
            FieldData::Text(s) => s.zeroize(),
            FieldData::Binary(b) => b.zeroize(),
        }
    }
}

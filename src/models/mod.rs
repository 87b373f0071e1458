//! Data model: field values, entries, and shell configuration.

pub mod config;
pub mod entry;
pub mod value;

//! Filesystem and command-line helpers.

pub mod args;
pub mod fs;

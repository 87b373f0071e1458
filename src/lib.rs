//! Interactive shell for a hierarchical credential store.
//!
//! Groups and entries are addressed with UNIX-style paths (`/email/gmail`,
//! `../bank`, `email/0`), and binary attachments on entries can be created,
//! inspected, and extracted.
//!
//! ## Modules
//! - `cli` — Session state, command parsing/dispatch, the shell loop
//! - `core` — Credential tree, path resolver, persistence, attachment ops
//! - `models` — Field values, entries, configuration
//! - `util` — Filesystem and argument helpers

pub mod cli;
pub mod constants;
pub mod core;
pub mod error;
pub mod models;
pub mod util;

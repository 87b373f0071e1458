//! Errors raised by shell commands.
//!
//! Every variant is recoverable: the shell reports it and reads the next
//! command. Startup failures use `anyhow` instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("syntax: {usage}")]
    Syntax { usage: String },

    #[error("could not find a group or entry named [{0}]")]
    NotFound(String),

    #[error("could not find entry at path {0}")]
    EntryNotFound(String),

    #[error("root group has no parent")]
    RootHasNoParent,

    #[error("entry has no attachment")]
    NoAttachment,

    #[error("field '{0}' does not hold the expected type")]
    WrongFieldType(String),

    #[error("could not {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot create duplicate entity '{0}'")]
    AlreadyExists(String),

    #[error("invalid name '{0}'")]
    InvalidName(String),

    #[error("attachment too large ({size} bytes, max {max} bytes)")]
    TooLarge { size: u64, max: usize },

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("could not save database: {0:#}")]
    Save(anyhow::Error),
}

impl ShellError {
    pub fn syntax(usage: &str) -> Self {
        ShellError::Syntax {
            usage: usage.to_string(),
        }
    }

    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ShellError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

pub type ShellResult<T> = std::result::Result<T, ShellError>;

//! Shell configuration file model.

use crate::constants;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Ask before `attach get` overwrites an existing file.
    #[serde(default = "default_true")]
    pub confirm_overwrite: bool,

    /// Largest file `attach create` accepts, in bytes.
    #[serde(default = "default_max_attachment_size")]
    pub max_attachment_size: usize,

    /// Appended to the current group name to form the prompt.
    #[serde(default = "default_prompt_suffix")]
    pub prompt_suffix: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            confirm_overwrite: default_true(),
            max_attachment_size: default_max_attachment_size(),
            prompt_suffix: default_prompt_suffix(),
        }
    }
}

impl ShellConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parse config {}", path.display()))
    }
}

fn default_true() -> bool {
    true
}

fn default_max_attachment_size() -> usize {
    constants::DEFAULT_MAX_ATTACHMENT_SIZE
}

fn default_prompt_suffix() -> String {
    constants::DEFAULT_PROMPT_SUFFIX.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("kp.toml");
        fs::write(&path, "confirm_overwrite = false\n").unwrap();
        let cfg = ShellConfig::load(&path).unwrap();
        assert!(!cfg.confirm_overwrite);
        assert_eq!(cfg.max_attachment_size, constants::DEFAULT_MAX_ATTACHMENT_SIZE);
        assert_eq!(cfg.prompt_suffix, " > ");
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("kp.toml");
        fs::write(&path, "max_attachment_size = \"big\"\n").unwrap();
        assert!(ShellConfig::load(&path).is_err());
    }
}

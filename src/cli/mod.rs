//! Process entry: flag parsing, database opening, and the session state
//! threaded through every shell command.

use crate::core::file_lock::{self, FileLock};
use crate::core::store;
use crate::core::tree::{Database, GroupId};
use crate::models::config::ShellConfig;
use anyhow::{anyhow, bail, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

pub mod attach;
pub mod browse;
pub mod command;
pub mod host;
pub mod shell;
pub mod show;

/// State owned by one shell session: the open database, the current group,
/// and the loaded configuration.
pub struct Session {
    pub db: Database,
    pub db_path: PathBuf,
    pub cursor: GroupId,
    pub config: ShellConfig,
}

impl Session {
    pub fn new(db: Database, db_path: PathBuf, config: ShellConfig) -> Self {
        let cursor = db.root();
        Self {
            db,
            db_path,
            cursor,
            config,
        }
    }

    /// `<current group name><suffix>`, e.g. `root > `.
    pub fn prompt(&self) -> String {
        format!(
            "{}{}",
            self.db.group(self.cursor).name(),
            self.config.prompt_suffix
        )
    }
}

#[derive(Parser, Debug)]
#[command(name = "kp", version, about = "Interactive shell for a hierarchical credential store")]
pub struct Cli {
    /// Database file to open
    #[arg(long, env = "KP_DB", value_name = "PATH")]
    pub db: PathBuf,

    /// Shell configuration file (TOML)
    #[arg(long, env = "KP_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Run in non-interactive mode (every confirmation is answered no)
    #[arg(long, env = "KP_NON_INTERACTIVE")]
    pub non_interactive: bool,

    /// Start an empty database if the file does not exist
    #[arg(long)]
    pub create: bool,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let config = self.load_config();
        let (mut session, _lock) = self.open(config)?;

        println!("opened database");
        let mut host = host::ConsoleHost::new(self.non_interactive);
        shell::run(&mut session, &mut host);
        Ok(())
    }

    /// Config is best-effort; fall back to defaults.
    fn load_config(&self) -> ShellConfig {
        let Some(path) = &self.config else {
            return ShellConfig::default();
        };
        ShellConfig::load(path).unwrap_or_else(|e| {
            warn!("cannot load config, using defaults: {:#}", e);
            ShellConfig::default()
        })
    }

    /// Open the database named by `--db` and take the session lock. The lock
    /// is held until the returned guard drops.
    fn open(&self, config: ShellConfig) -> Result<(Session, FileLock)> {
        let exists = self.db.exists();
        if !exists && !self.create {
            bail!("could not open database [{}]: file not found", self.db.display());
        }

        let lock = FileLock::try_exclusive(&file_lock::lock_path(&self.db))?.ok_or_else(|| {
            anyhow!(
                "database is locked by another session: {}",
                self.db.display()
            )
        })?;

        let db = if exists {
            store::load(&self.db)?
        } else {
            info!(path = %self.db.display(), "starting empty database");
            store::create_empty(&self.db)
        };
        Ok((Session::new(db, self.db.clone(), config), lock))
    }
}

#[cfg(test)]
pub(crate) fn test_session() -> Session {
    Session::new(
        crate::core::tree::sample_database(),
        PathBuf::from("test.toml"),
        ShellConfig::default(),
    )
}

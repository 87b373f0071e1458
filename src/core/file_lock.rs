//! Session lock on the database file using flock(2).

use crate::constants;
use anyhow::{Context, Result};
use fs2::FileExt;
use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// An exclusive lock held for the whole shell session. Released on drop
/// (closing the file releases the flock).
#[derive(Debug)]
pub struct FileLock {
    _file: File,
}

impl FileLock {
    /// Try to acquire an exclusive lock without blocking.
    /// Returns `Ok(Some(lock))` if acquired, `Ok(None)` if already held.
    pub fn try_exclusive(path: &Path) -> Result<Option<Self>> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)
            .with_context(|| format!("open lock file {}", path.display()))?;
        match file.try_lock_exclusive() {
            Ok(()) => Ok(Some(Self { _file: file })),
            Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => Ok(None),
            // fs2 on Linux may return Other instead of WouldBlock
            Err(ref e) if e.raw_os_error() == Some(11) => Ok(None), // EAGAIN
            Err(e) => Err(e).with_context(|| format!("try lock {}", path.display())),
        }
    }
}

/// Lock file guarding `db_path`, e.g. `vault.toml.lock`.
pub fn lock_path(db_path: &Path) -> PathBuf {
    let mut name = OsString::from(db_path.as_os_str());
    name.push(constants::LOCK_SUFFIX);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_lock_acquired() {
        let dir = TempDir::new().unwrap();
        let lock_path = dir.path().join("db.toml.lock");
        let lock = FileLock::try_exclusive(&lock_path).unwrap();
        assert!(lock.is_some());
        assert!(lock_path.exists());
    }

    #[test]
    fn test_second_session_is_refused() {
        let dir = TempDir::new().unwrap();
        let lock_path = dir.path().join("db.toml.lock");
        let _lock = FileLock::try_exclusive(&lock_path).unwrap().unwrap();
        let result = FileLock::try_exclusive(&lock_path).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_lock_released_on_drop() {
        let dir = TempDir::new().unwrap();
        let lock_path = dir.path().join("db.toml.lock");
        {
            let _lock = FileLock::try_exclusive(&lock_path).unwrap();
        }
        let lock = FileLock::try_exclusive(&lock_path).unwrap();
        assert!(lock.is_some());
    }

    #[test]
    fn test_lock_path_appends_suffix() {
        assert_eq!(
            lock_path(Path::new("/home/u/vault.toml")),
            PathBuf::from("/home/u/vault.toml.lock")
        );
    }
}

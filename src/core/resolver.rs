//! UNIX-style path resolution over the credential tree.
//!
//! Paths are slash-separated. A leading `/` starts from the root, `.` and
//! empty components are ignored, `..` moves to the parent. Any other
//! component descends into a child group of that name, or, failing that,
//! matches an entry by title or decimal position. An entry match succeeds
//! without moving: entries terminate paths but are never traversed into.

use crate::core::tree::{Database, GroupId};
use crate::error::{ShellError, ShellResult};
use tracing::debug;

/// Resolve `path` relative to `start` to the group it lands on.
pub fn resolve(db: &Database, start: GroupId, path: &str) -> ShellResult<GroupId> {
    if path == "/" {
        return Ok(db.root());
    }

    let mut current = start;
    let rest = match path.strip_prefix('/') {
        Some(rest) => {
            current = db.root();
            rest
        }
        None => path,
    };

    for part in rest.split('/') {
        match part {
            "" | "." => continue,
            ".." => {
                current = db.parent(current).ok_or(ShellError::RootHasNoParent)?;
            }
            name => {
                if let Some(child) = db.find_subgroup(current, name) {
                    current = child;
                    continue;
                }
                let is_entry = db
                    .group(current)
                    .entries()
                    .iter()
                    .enumerate()
                    .any(|(i, entry)| entry.title() == name || i.to_string() == name);
                if !is_entry {
                    return Err(ShellError::NotFound(name.to_string()));
                }
            }
        }
    }

    debug!(path, group = db.group(current).name(), "resolved path");
    Ok(current)
}

/// Find an entry in `group` by exact title or by position.
///
/// Each entry is tested against both in a single pass, so the first entry in
/// order that satisfies either wins. A numeric selector can therefore pick an
/// earlier entry titled with that number over the entry at that position.
pub fn locate_entry(db: &Database, group: GroupId, selector: &str) -> Option<usize> {
    let index = selector.parse::<usize>().ok();
    db.group(group)
        .entries()
        .iter()
        .enumerate()
        .position(|(i, entry)| entry.title() == selector || index == Some(i))
}

/// Resolve an entry path such as `email/gmail` or `email/0` to the owning
/// group and the entry's position in it.
pub fn resolve_entry(db: &Database, start: GroupId, path: &str) -> ShellResult<(GroupId, usize)> {
    let group = resolve(db, start, path)?;
    let selector = last_component(path);
    let index = locate_entry(db, group, selector)
        .ok_or_else(|| ShellError::EntryNotFound(path.to_string()))?;
    Ok((group, index))
}

/// Text after the final `/` (the whole path when there is none).
pub fn last_component(path: &str) -> &str {
    match path.rsplit_once('/') {
        Some((_, last)) => last,
        None => path,
    }
}

//! Navigation and listing: `ls`, `cd`, `mkdir`.

use crate::cli::host::Host;
use crate::cli::Session;
use crate::core::resolver;
use crate::error::{ShellError, ShellResult};
use tracing::{debug, info};

/// List the group at `path` (default: the current group).
///
/// Groups come first as `name/`, then entries as `index: title`. When the
/// last path component names a child group or an entry title in the resolved
/// group, only that line is printed.
pub fn ls(session: &Session, host: &mut dyn Host, path: Option<&str>) -> ShellResult<()> {
    let db = &session.db;
    let (location, entity) = match path {
        Some(p) => (
            resolver::resolve(db, session.cursor, p)?,
            resolver::last_component(p),
        ),
        None => (session.cursor, "/"),
    };

    let group = db.group(location);
    let mut lines = Vec::new();
    for child in group.groups() {
        let name = db.group(*child).name();
        if name == entity {
            host.println(&format!("{}/", name));
            return Ok(());
        }
        lines.push(format!("{}/", name));
    }
    for (i, entry) in group.entries().iter().enumerate() {
        let line = format!("{}: {}", i, entry.title());
        if entry.title() == entity {
            host.println(&line);
            return Ok(());
        }
        lines.push(line);
    }

    if !lines.is_empty() {
        host.println(&lines.join("\n"));
    }
    Ok(())
}

/// Move the cursor to `path`, or to the root when no path is given.
pub fn cd(session: &mut Session, path: Option<&str>) -> ShellResult<()> {
    let target = match path {
        Some(p) => resolver::resolve(&session.db, session.cursor, p)?,
        None => session.db.root(),
    };
    session.cursor = target;
    debug!(location = %session.db.path_of(target), "changed group");
    Ok(())
}

/// Create a group at `path`. Fails if anything already answers to that path.
pub fn mkdir(session: &mut Session, path: &str) -> ShellResult<()> {
    if resolver::resolve(&session.db, session.cursor, path).is_ok() {
        return Err(ShellError::AlreadyExists(path.to_string()));
    }

    let trimmed = path.trim_end_matches('/');
    let (parent_path, name) = match trimmed.rsplit_once('/') {
        Some(("", name)) => ("/", name),
        Some((parent, name)) => (parent, name),
        None => ("", trimmed),
    };
    if name.is_empty() || name == "." || name == ".." {
        return Err(ShellError::InvalidName(name.to_string()));
    }

    let parent = resolver::resolve(&session.db, session.cursor, parent_path)?;
    session.db.new_subgroup(parent, name);
    info!(group = name, parent = %session.db.path_of(parent), "group created");
    Ok(())
}

//! `attach create|get|details` handlers.

use crate::cli::command::AttachCommand;
use crate::cli::host::Host;
use crate::cli::Session;
use crate::core::{attachment, resolver};
use crate::error::{ShellError, ShellResult};
use tracing::info;

/// Resolve the target entry fresh and run the sub-command on it.
pub fn run(session: &mut Session, host: &mut dyn Host, cmd: &AttachCommand) -> ShellResult<()> {
    let path = cmd.entry_path();
    let (group, index) = resolver::resolve_entry(&session.db, session.cursor, path)?;

    match cmd {
        AttachCommand::Create { name, source, .. } => {
            attachment::create(
                &mut session.db,
                group,
                index,
                name,
                source,
                session.config.max_attachment_size,
            )?;
            host.println("added attachment to database");
        }
        AttachCommand::Get { output, .. } => {
            let entry = session
                .db
                .entry(group, index)
                .ok_or_else(|| ShellError::EntryNotFound(path.to_string()))?;
            let value = entry.attachment()?;
            if output.exists()
                && session.config.confirm_overwrite
                && !host.confirm(&format!("{} exists, overwrite?", output.display()))
            {
                host.println("aborting");
                return Ok(());
            }
            let written = attachment::write_to(value, output)?;
            info!(attachment = %value.name, bytes = written, output = %output.display(), "attachment written");
            host.println(&format!(
                "wrote {} ({} bytes) to {}",
                value.name,
                written,
                output.display()
            ));
        }
        AttachCommand::Details { .. } => {
            let entry = session
                .db
                .entry(group, index)
                .ok_or_else(|| ShellError::EntryNotFound(path.to_string()))?;
            host.println(&attachment::details(entry)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::test_session;
    use crate::cli::host::ScriptedHost;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn create(entry: &str, name: &str, source: PathBuf) -> AttachCommand {
        AttachCommand::Create {
            entry: entry.into(),
            name: name.into(),
            source,
        }
    }

    fn get(entry: &str, output: PathBuf) -> AttachCommand {
        AttachCommand::Get {
            entry: entry.into(),
            output,
        }
    }

    fn details(entry: &str) -> AttachCommand {
        AttachCommand::Details {
            entry: entry.into(),
        }
    }

    #[test]
    fn test_create_then_get_round_trip() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("id_ed25519");
        let payload: Vec<u8> = (0u8..=255).rev().collect();
        fs::write(&source, &payload).unwrap();
        let output = dir.path().join("restored");

        let mut session = test_session();
        let mut host = ScriptedHost::new();
        run(&mut session, &mut host, &create("email/gmail", "id_ed25519", source)).unwrap();
        assert!(session.db.is_dirty());
        run(&mut session, &mut host, &get("email/gmail", output.clone())).unwrap();

        assert_eq!(fs::read(&output).unwrap(), payload);
        assert_eq!(
            host.output,
            vec![
                "added attachment to database".to_string(),
                format!("wrote id_ed25519 (256 bytes) to {}", output.display()),
            ]
        );
        assert!(host.questions.is_empty());
    }

    #[test]
    fn test_details_before_and_after_create() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("notes.txt");
        fs::write(&source, b"0123456789").unwrap();

        let mut session = test_session();
        let mut host = ScriptedHost::new();
        let err = run(&mut session, &mut host, &details("bank")).unwrap_err();
        assert!(matches!(err, ShellError::NoAttachment));

        run(&mut session, &mut host, &create("bank", "notes.txt", source)).unwrap();
        run(&mut session, &mut host, &details("1")).unwrap();
        assert_eq!(host.output.last().unwrap(), "Name: notes.txt\nSize: 10 bytes");
    }

    #[test]
    fn test_declined_overwrite_leaves_file() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src");
        fs::write(&source, b"secret").unwrap();
        let output = dir.path().join("existing");
        fs::write(&output, b"keep me").unwrap();

        let mut session = test_session();
        let mut host = ScriptedHost::new().answer(false);
        run(&mut session, &mut host, &create("mail", "src", source)).unwrap();
        run(&mut session, &mut host, &get("mail", output.clone())).unwrap();

        assert_eq!(fs::read(&output).unwrap(), b"keep me");
        assert_eq!(host.output.last().unwrap(), "aborting");
        assert_eq!(host.questions.len(), 1);
    }

    #[test]
    fn test_confirmed_overwrite_replaces_file() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src");
        fs::write(&source, b"secret").unwrap();
        let output = dir.path().join("existing");
        fs::write(&output, b"old and longer").unwrap();

        let mut session = test_session();
        let mut host = ScriptedHost::new().answer(true);
        run(&mut session, &mut host, &create("mail", "src", source)).unwrap();
        run(&mut session, &mut host, &get("mail", output.clone())).unwrap();
        assert_eq!(fs::read(&output).unwrap(), b"secret");
    }

    #[test]
    fn test_overwrite_without_confirmation_when_disabled() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src");
        fs::write(&source, b"secret").unwrap();
        let output = dir.path().join("existing");
        fs::write(&output, b"old").unwrap();

        let mut session = test_session();
        session.config.confirm_overwrite = false;
        let mut host = ScriptedHost::new();
        run(&mut session, &mut host, &create("mail", "src", source)).unwrap();
        run(&mut session, &mut host, &get("mail", output.clone())).unwrap();
        assert!(host.questions.is_empty());
        assert_eq!(fs::read(&output).unwrap(), b"secret");
    }

    #[test]
    fn test_get_without_attachment_does_not_touch_output() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("existing");
        fs::write(&output, b"keep me").unwrap();

        let mut session = test_session();
        let mut host = ScriptedHost::new().answer(true);
        let err = run(&mut session, &mut host, &get("mail", output.clone())).unwrap_err();
        assert!(matches!(err, ShellError::NoAttachment));
        assert!(host.questions.is_empty());
        assert_eq!(fs::read(&output).unwrap(), b"keep me");
    }

    #[test]
    fn test_unknown_entry() {
        let mut session = test_session();
        let mut host = ScriptedHost::new();
        let err = run(&mut session, &mut host, &details("email/outlook")).unwrap_err();
        assert!(matches!(err, ShellError::NotFound(c) if c == "outlook"));
        let err = run(&mut session, &mut host, &details("a/b")).unwrap_err();
        assert!(matches!(err, ShellError::EntryNotFound(p) if p == "a/b"));
    }

    #[test]
    fn test_create_missing_source_keeps_clean() {
        let dir = TempDir::new().unwrap();
        let mut session = test_session();
        let mut host = ScriptedHost::new();
        let err = run(
            &mut session,
            &mut host,
            &create("mail", "x", dir.path().join("missing")),
        )
        .unwrap_err();
        assert!(matches!(err, ShellError::Io { .. }));
        assert!(!session.db.is_dirty());
        assert!(host.output.is_empty());
    }
}

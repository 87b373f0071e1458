//! The read-eval loop. Every command error is reported here and never ends
//! the session.

use crate::cli::command::{self, Command, Flow};
use crate::cli::host::Host;
use crate::cli::Session;
use crate::core::store;
use crate::util::args;
use tracing::{debug, warn};

/// Read and run commands until `exit` or end of input.
///
/// A failed save after `exit` keeps the session open. At end of input there
/// is nothing left to read, so the changes are lost.
pub fn run(session: &mut Session, host: &mut dyn Host) {
    loop {
        let Some(line) = host.read_line(&session.prompt()) else {
            if !finish(session, host) {
                warn!(path = %session.db_path.display(), "input closed, unsaved changes lost");
            }
            return;
        };
        if execute_line(session, host, &line) == Flow::Exit && finish(session, host) {
            return;
        }
    }
}

/// Parse and run a single input line.
pub fn execute_line(session: &mut Session, host: &mut dyn Host, line: &str) -> Flow {
    let cmd = match Command::parse(&args::split(line)) {
        Ok(Some(cmd)) => cmd,
        Ok(None) => return Flow::Continue,
        Err(e) => {
            host.error(&e.to_string());
            return Flow::Continue;
        }
    };

    match command::dispatch(session, host, &cmd) {
        Ok(flow) => flow,
        Err(e) => {
            debug!(command = cmd.name(), error = %e, "command failed");
            host.error(&cmd.describe_error(&e));
            Flow::Continue
        }
    }
}

/// Offer to save unsaved changes. Returns false when saving was requested but
/// failed, so the caller can keep the session open.
fn finish(session: &mut Session, host: &mut dyn Host) -> bool {
    if !session.db.is_dirty() {
        return true;
    }
    if !host.confirm("database has unsaved changes, save before exiting?") {
        warn!(path = %session.db_path.display(), "discarding unsaved changes");
        host.error("discarding unsaved changes");
        return true;
    }
    match store::save(&session.db_path, &mut session.db) {
        Ok(()) => {
            host.println(&format!("saved to {}", session.db_path.display()));
            true
        }
        Err(e) => {
            host.error(&format!("could not save database: {:#}", e));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::host::ScriptedHost;
    use crate::cli::test_session;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_errors_do_not_end_session() {
        let mut session = test_session();
        let mut host = ScriptedHost::with_input(&[
            "cd nowhere",
            "frobnicate",
            "attach get mail",
            "cd ..",
            "ls email",
            "exit",
            "ls",
        ]);
        run(&mut session, &mut host);

        assert_eq!(
            host.errors,
            vec![
                "invalid path: could not find a group or entry named [nowhere]",
                "unknown command: frobnicate",
                "syntax: attach get <entry> <file>",
                "invalid path: root group has no parent",
            ]
        );
        assert_eq!(host.output, vec!["0: gmail"]);
        // The line after exit is never read.
        assert_eq!(host.input.len(), 1);
    }

    #[test]
    fn test_cd_updates_prompt() {
        let mut session = test_session();
        let mut host = ScriptedHost::new();
        execute_line(&mut session, &mut host, "cd /a/b");
        assert_eq!(session.prompt(), "b > ");
        execute_line(&mut session, &mut host, "cd");
        assert_eq!(session.prompt(), "root > ");
        assert!(host.output.is_empty());
    }

    #[test]
    fn test_attach_failures_are_prefixed() {
        let mut session = test_session();
        let mut host = ScriptedHost::new();
        execute_line(&mut session, &mut host, "attach details mail");
        execute_line(&mut session, &mut host, "attach details email/nope");
        execute_line(&mut session, &mut host, "attach details email");
        assert_eq!(
            host.errors,
            vec![
                "could not run command [details]: entry has no attachment",
                "error traversing path: could not find a group or entry named [nope]",
                "could not find entry at path email",
            ]
        );
    }

    #[test]
    fn test_quoted_titles() {
        let mut session = test_session();
        let root = session.db.root();
        session
            .db
            .add_entry(root, crate::models::entry::Entry::titled("my bank"));
        let mut host = ScriptedHost::new();
        execute_line(&mut session, &mut host, r#"ls "my bank""#);
        assert_eq!(host.output, vec!["2: my bank"]);
    }

    #[test]
    fn test_mkdir_duplicate_message() {
        let mut session = test_session();
        let mut host = ScriptedHost::new();
        execute_line(&mut session, &mut host, "mkdir email");
        assert_eq!(host.errors, vec!["cannot create duplicate entity 'email'"]);
    }

    #[test]
    fn test_exit_with_unsaved_changes_saves_on_yes() {
        let dir = TempDir::new().unwrap();
        let mut session = test_session();
        session.db_path = dir.path().join("vault.toml");
        let mut host = ScriptedHost::with_input(&["mkdir work", "exit"]).answer(true);
        run(&mut session, &mut host);

        assert_eq!(host.questions.len(), 1);
        assert!(!session.db.is_dirty());
        let saved = store::load(&session.db_path).unwrap();
        assert!(saved.find_subgroup(saved.root(), "work").is_some());
    }

    #[test]
    fn test_end_of_input_discards_when_declined() {
        let dir = TempDir::new().unwrap();
        let mut session = test_session();
        session.db_path = dir.path().join("vault.toml");
        let mut host = ScriptedHost::with_input(&["mkdir work"]);
        run(&mut session, &mut host);

        assert_eq!(host.errors, vec!["discarding unsaved changes"]);
        assert!(!session.db_path.exists());
    }

    #[test]
    fn test_save_command() {
        let dir = TempDir::new().unwrap();
        let mut session = test_session();
        session.db_path = dir.path().join("vault.toml");
        let mut host = ScriptedHost::with_input(&["mkdir work", "save", "exit"]);
        run(&mut session, &mut host);

        assert!(host.questions.is_empty());
        assert_eq!(
            host.output,
            vec![format!("saved to {}", session.db_path.display())]
        );
        assert!(fs::metadata(&session.db_path).unwrap().len() > 0);
    }

    #[test]
    fn test_failed_save_at_end_of_input_ends_session() {
        let dir = TempDir::new().unwrap();
        let mut session = test_session();
        session.db_path = dir.path().join("missing/vault.toml");
        let mut host = ScriptedHost::with_input(&["mkdir work"]).answer(true);
        run(&mut session, &mut host);

        assert_eq!(host.questions.len(), 1);
        assert_eq!(host.errors.len(), 1);
        assert!(host.errors[0].starts_with("could not save database: "));
        assert!(session.db.is_dirty());
        assert!(!session.db_path.exists());
    }

    #[test]
    fn test_failed_save_on_exit_keeps_session_open() {
        let dir = TempDir::new().unwrap();
        let mut session = test_session();
        session.db_path = dir.path().join("missing/vault.toml");
        let mut host = ScriptedHost::with_input(&["mkdir work", "exit", "ls work"])
            .answer(true)
            .answer(false);
        run(&mut session, &mut host);

        assert_eq!(host.questions.len(), 2);
        assert!(host.errors[0].starts_with("could not save database: "));
        assert_eq!(host.errors[1], "discarding unsaved changes");
    }
}

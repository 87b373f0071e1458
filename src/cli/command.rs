//! Shell commands: parsing an argument vector into a closed set of commands
//! and dispatching each to its handler.

use crate::cli::{attach, browse, show, Session};
use crate::core::store;
use crate::cli::host::Host;
use crate::error::{ShellError, ShellResult};
use std::path::PathBuf;
use tracing::debug;

pub const LS_USAGE: &str = "ls [path]";
pub const CD_USAGE: &str = "cd [path]";
pub const MKDIR_USAGE: &str = "mkdir <path>";
pub const SHOW_USAGE: &str = "show [-f] <entry>";
pub const ATTACH_USAGE: &str = "attach <create|get|details> <entry> [args...]";
pub const ATTACH_CREATE_USAGE: &str = "attach create <entry> <name> <file>";
pub const ATTACH_GET_USAGE: &str = "attach get <entry> <file>";
pub const ATTACH_DETAILS_USAGE: &str = "attach details <entry>";
pub const SAVE_USAGE: &str = "save";
pub const EXIT_USAGE: &str = "exit";

const HELP: &[(&str, &str)] = &[
    (LS_USAGE, "list groups and entries"),
    (CD_USAGE, "change the current group (default: root)"),
    (MKDIR_USAGE, "create a group"),
    (SHOW_USAGE, "show an entry; -f reveals the password"),
    (ATTACH_CREATE_USAGE, "attach a file to an entry"),
    (ATTACH_GET_USAGE, "write an entry's attachment to a file"),
    (ATTACH_DETAILS_USAGE, "show attachment name and size"),
    (SAVE_USAGE, "write changes to the database file"),
    (EXIT_USAGE, "leave the shell"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ls { path: Option<String> },
    Cd { path: Option<String> },
    Mkdir { path: String },
    Show { path: String, full: bool },
    Attach(AttachCommand),
    Save,
    Help,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachCommand {
    Create {
        entry: String,
        name: String,
        source: PathBuf,
    },
    Get {
        entry: String,
        output: PathBuf,
    },
    Details {
        entry: String,
    },
}

/// Whether the shell keeps reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

impl Command {
    /// Parse a tokenized line. Blank lines yield `Ok(None)`. Arity is checked
    /// here, so a command that parses never fails for lack of arguments.
    pub fn parse(args: &[String]) -> ShellResult<Option<Command>> {
        let Some((name, rest)) = args.split_first() else {
            return Ok(None);
        };
        let cmd = match name.as_str() {
            "ls" => Command::Ls {
                path: rest.first().cloned(),
            },
            "cd" => Command::Cd {
                path: rest.first().cloned(),
            },
            "mkdir" => Command::Mkdir {
                path: rest
                    .first()
                    .cloned()
                    .ok_or_else(|| ShellError::syntax(MKDIR_USAGE))?,
            },
            "show" => parse_show(rest)?,
            "attach" => Command::Attach(AttachCommand::parse(rest)?),
            "save" => Command::Save,
            "help" => Command::Help,
            "exit" | "quit" => Command::Exit,
            other => return Err(ShellError::UnknownCommand(other.to_string())),
        };
        Ok(Some(cmd))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Ls { .. } => "ls",
            Command::Cd { .. } => "cd",
            Command::Mkdir { .. } => "mkdir",
            Command::Show { .. } => "show",
            Command::Attach(_) => "attach",
            Command::Save => "save",
            Command::Help => "help",
            Command::Exit => "exit",
        }
    }

    /// The message shown when this command fails with `err`.
    pub fn describe_error(&self, err: &ShellError) -> String {
        let traversal = matches!(err, ShellError::NotFound(_) | ShellError::RootHasNoParent);
        match self {
            _ if matches!(err, ShellError::Syntax { .. }) => err.to_string(),
            Command::Ls { .. } if traversal => format!("Invalid path: {}", err),
            Command::Cd { .. } | Command::Mkdir { .. } if traversal => {
                format!("invalid path: {}", err)
            }
            Command::Show { path, .. }
                if traversal || matches!(err, ShellError::EntryNotFound(_)) =>
            {
                format!("could not find entry named [{}]", path)
            }
            Command::Attach(_) if traversal => format!("error traversing path: {}", err),
            Command::Attach(_) if matches!(err, ShellError::EntryNotFound(_)) => err.to_string(),
            Command::Attach(sub) => format!("could not run command [{}]: {}", sub.name(), err),
            _ => err.to_string(),
        }
    }
}

impl AttachCommand {
    fn parse(args: &[String]) -> ShellResult<AttachCommand> {
        let (sub, rest) = args
            .split_first()
            .ok_or_else(|| ShellError::syntax(ATTACH_USAGE))?;
        match sub.as_str() {
            "create" => match rest {
                [entry, name, source, ..] => Ok(AttachCommand::Create {
                    entry: entry.clone(),
                    name: name.clone(),
                    source: PathBuf::from(source),
                }),
                _ => Err(ShellError::syntax(ATTACH_CREATE_USAGE)),
            },
            "get" => match rest {
                [entry, output, ..] => Ok(AttachCommand::Get {
                    entry: entry.clone(),
                    output: PathBuf::from(output),
                }),
                _ => Err(ShellError::syntax(ATTACH_GET_USAGE)),
            },
            "details" => match rest {
                [entry, ..] => Ok(AttachCommand::Details {
                    entry: entry.clone(),
                }),
                _ => Err(ShellError::syntax(ATTACH_DETAILS_USAGE)),
            },
            other => Err(ShellError::UnknownCommand(format!("attach {}", other))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AttachCommand::Create { .. } => "create",
            AttachCommand::Get { .. } => "get",
            AttachCommand::Details { .. } => "details",
        }
    }

    pub fn entry_path(&self) -> &str {
        match self {
            AttachCommand::Create { entry, .. }
            | AttachCommand::Get { entry, .. }
            | AttachCommand::Details { entry } => entry,
        }
    }
}

fn parse_show(args: &[String]) -> ShellResult<Command> {
    let mut full = false;
    let mut path = None;
    for arg in args {
        if arg.starts_with('-') {
            if arg == "-f" {
                full = true;
            }
            continue;
        }
        path = Some(arg.clone());
    }
    let path = path.ok_or_else(|| ShellError::syntax(SHOW_USAGE))?;
    Ok(Command::Show { path, full })
}

/// Run one parsed command against the session.
pub fn dispatch(session: &mut Session, host: &mut dyn Host, cmd: &Command) -> ShellResult<Flow> {
    debug!(command = cmd.name(), "dispatch");
    match cmd {
        Command::Ls { path } => browse::ls(session, host, path.as_deref())?,
        Command::Cd { path } => browse::cd(session, path.as_deref())?,
        Command::Mkdir { path } => browse::mkdir(session, path)?,
        Command::Show { path, full } => show::run(session, host, path, *full)?,
        Command::Attach(sub) => attach::run(session, host, sub)?,
        Command::Save => {
            store::save(&session.db_path, &mut session.db).map_err(ShellError::Save)?;
            host.println(&format!("saved to {}", session.db_path.display()));
        }
        Command::Help => {
            for (usage, about) in HELP {
                host.println(&format!("{:<40} {}", usage, about));
            }
        }
        Command::Exit => return Ok(Flow::Exit),
    }
    Ok(Flow::Continue)
}

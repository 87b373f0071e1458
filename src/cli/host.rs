//! Terminal I/O for the shell.
//!
//! Command handlers never touch stdin/stdout directly; they talk to a
//! [`Host`], so tests can drive them with scripted input and answers.

use dialoguer::theme::Theme;
use dialoguer::{Confirm, Input};
use std::fmt;
use std::io::{self, IsTerminal};
use tracing::{debug, warn};

pub trait Host {
    /// Next input line, or None once input is exhausted.
    fn read_line(&mut self, prompt: &str) -> Option<String>;

    fn println(&mut self, text: &str);

    fn error(&mut self, message: &str);

    /// Ask a yes/no question; anything but an explicit yes is no.
    fn confirm(&mut self, question: &str) -> bool;
}

/// Prompt rendered exactly as given, without dialoguer's `: ` decoration.
struct PromptTheme;

impl Theme for PromptTheme {
    fn format_input_prompt(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        _default: Option<&str>,
    ) -> fmt::Result {
        write!(f, "{}", prompt)
    }

    fn format_input_prompt_selection(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        sel: &str,
    ) -> fmt::Result {
        write!(f, "{}{}", prompt, sel)
    }
}

/// Host backed by the process terminal. When stdin is not a terminal, lines
/// are read plainly so command files can be piped in.
pub struct ConsoleHost {
    non_interactive: bool,
    tty: bool,
}

impl ConsoleHost {
    pub fn new(non_interactive: bool) -> Self {
        Self {
            non_interactive,
            tty: io::stdin().is_terminal(),
        }
    }
}

impl Host for ConsoleHost {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        if self.tty {
            return match Input::<String>::with_theme(&PromptTheme)
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
            {
                Ok(line) => Some(line),
                Err(e) => {
                    debug!(error = %e, "terminal input closed");
                    None
                }
            };
        }

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                debug!(error = %e, "stdin closed");
                None
            }
        }
    }

    fn println(&mut self, text: &str) {
        println!("{}", text);
    }

    fn error(&mut self, message: &str) {
        eprintln!("{}", message);
    }

    fn confirm(&mut self, question: &str) -> bool {
        if self.non_interactive {
            debug!(question, "non-interactive: answering no");
            return false;
        }
        match Confirm::new().with_prompt(question).default(false).interact() {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "confirmation prompt failed; answering no");
                false
            }
        }
    }
}

/// Records output and replays queued input lines and answers.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ScriptedHost {
    pub input: std::collections::VecDeque<String>,
    pub answers: std::collections::VecDeque<bool>,
    pub output: Vec<String>,
    pub errors: Vec<String>,
    pub questions: Vec<String>,
}

#[cfg(test)]
impl ScriptedHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(lines: &[&str]) -> Self {
        Self {
            input: lines.iter().map(|l| l.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn answer(mut self, yes: bool) -> Self {
        self.answers.push_back(yes);
        self
    }

    /// Everything printed so far, newline-joined.
    pub fn stdout(&self) -> String {
        self.output.join("\n")
    }
}

#[cfg(test)]
impl Host for ScriptedHost {
    fn read_line(&mut self, _prompt: &str) -> Option<String> {
        self.input.pop_front()
    }

    fn println(&mut self, text: &str) {
        self.output.push(text.to_string());
    }

    fn error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn confirm(&mut self, question: &str) -> bool {
        self.questions.push(question.to_string());
        self.answers.pop_front().unwrap_or(false)
    }
}

//! External command execution.
//!
//! Every side effect of a bootstrap is an external command: the package
//! installer, the defaults applier, the linker and the workspace scripts.
//! The [`CommandRunner`] trait decouples the actions from process spawning
//! so plans and tests can record invocations instead of running them.

use std::cell::RefCell;
use std::fmt;
use std::path::PathBuf;
use std::process::Command;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A fully rendered external command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    /// Program to run, looked up on `PATH` unless it is a path.
    pub program: String,
    /// Arguments passed to the program.
    pub args: Vec<String>,
    /// Working directory for the process.
    pub current_dir: Option<PathBuf>,
}

impl Invocation {
    /// Creates an invocation with no arguments.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    /// Appends an argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Sets the working directory.
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

fn quote(word: &str) -> String {
    if word.is_empty() || word.chars().any(char::is_whitespace) {
        format!("'{}'", word.replace('\'', r"'\''"))
    } else {
        word.to_string()
    }
}

/// Runs external commands to completion.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    /// Runs `invocation` and waits for it to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be started or exits
    /// unsuccessfully.
    fn run(&self, invocation: &Invocation) -> Result<()>;
}

/// Runs commands as child processes sharing the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        log::info!("$ {invocation}");

        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);
        if let Some(ref dir) = invocation.current_dir {
            command.current_dir(dir);
        }

        let status = command.status().map_err(|source| Error::CommandSpawn {
            program: invocation.program.clone(),
            source,
        })?;

        if status.success() {
            Ok(())
        } else {
            log::warn!("`{invocation}` exited with {status}");
            Err(Error::CommandFailed {
                command: invocation.to_string(),
                code: status.code(),
            })
        }
    }
}

/// Records invocations instead of running them.
///
/// Used for dry runs. A program can be marked as failing to exercise
/// failure paths.
///
/// # Examples
///
/// ```
/// use strap::runner::{CommandRunner, Invocation, RecordingRunner};
///
/// let runner = RecordingRunner::new();
/// runner.run(&Invocation::new("brew").arg("update")).unwrap();
/// assert_eq!(runner.invocations().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct RecordingRunner {
    invocations: RefCell<Vec<Invocation>>,
    failing_program: Option<String>,
}

impl RecordingRunner {
    /// Creates a runner that records every invocation as successful.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every invocation of `program` fail with exit status 1.
    #[must_use]
    pub fn failing_on(mut self, program: impl Into<String>) -> Self {
        self.failing_program = Some(program.into());
        self
    }

    /// Returns the invocations recorded so far.
    #[must_use]
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.borrow().clone()
    }

    /// Removes and returns the invocations recorded so far.
    pub fn take(&self) -> Vec<Invocation> {
        self.invocations.borrow_mut().drain(..).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        self.invocations.borrow_mut().push(invocation.clone());
        if self.failing_program.as_deref() == Some(invocation.program.as_str()) {
            return Err(Error::CommandFailed {
                command: invocation.to_string(),
                code: Some(1),
            });
        }
        Ok(())
    }
}

/// A configurable command with `{name}` placeholders in its arguments.
///
/// # Examples
///
/// ```
/// use strap::runner::CommandTemplate;
///
/// let template = CommandTemplate::new("brew", ["bundle", "--file", "{manifest}"]);
/// let invocation = template.render(&[("manifest", "/dots/Brewfile".to_string())]).unwrap();
/// assert_eq!(invocation.to_string(), "brew bundle --file /dots/Brewfile");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CommandTemplate {
    /// Program to run.
    pub program: String,
    /// Argument templates.
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandTemplate {
    /// Creates a template.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns every placeholder name used by the arguments.
    #[must_use]
    pub fn placeholders(&self) -> Vec<String> {
        self.args
            .iter()
            .map(String::as_str)
            .flat_map(scan)
            .filter_map(|piece| match piece {
                Piece::Placeholder(name) => Some(name.to_string()),
                Piece::Text(_) => None,
            })
            .collect()
    }

    /// Renders the template with the given variables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if an argument uses a placeholder that
    /// is not among `vars`.
    ///
    /// Each argument is scanned once; substituted values are copied
    /// verbatim and never scanned again.
    pub fn render(&self, vars: &[(&str, String)]) -> Result<Invocation> {
        let mut args = Vec::with_capacity(self.args.len());
        for arg in &self.args {
            let mut rendered = String::with_capacity(arg.len());
            for piece in scan(arg) {
                match piece {
                    Piece::Text(text) => rendered.push_str(text),
                    Piece::Placeholder(name) => {
                        let value = vars
                            .iter()
                            .find(|(known, _)| *known == name)
                            .map(|(_, value)| value)
                            .ok_or_else(|| Error::Validation {
                                field: self.program.clone(),
                                message: format!("unknown placeholder {{{name}}}"),
                            })?;
                        rendered.push_str(value);
                    }
                }
            }
            args.push(rendered);
        }

        Ok(Invocation {
            program: self.program.clone(),
            args,
            current_dir: None,
        })
    }
}

/// A run of literal text or a `{name}` placeholder within an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece<'a> {
    Text(&'a str),
    Placeholder(&'a str),
}

/// Splits an argument into literal text and placeholders, left to right.
///
/// An unmatched `{` is kept as text.
fn scan(arg: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut rest = arg;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            break;
        };
        if start > 0 {
            pieces.push(Piece::Text(&rest[..start]));
        }
        pieces.push(Piece::Placeholder(&after[..end]));
        rest = &after[end + 1..];
    }
    if !rest.is_empty() {
        pieces.push(Piece::Text(rest));
    }
    pieces
}

//! # Authority Layer
//!
//! Everything arkbind knows about the outside world goes through a single seam: the
//! [`CommandRunner`] trait. A runner takes a fully composed [`Invocation`] (program,
//! argument list, stdin handling) and hands back the captured [`CommandOutput`].
//!
//! ## Implementations
//!
//! - [`process::ProcessRunner`]: Production runner backed by `std::process::Command`.
//! - `scripted::ScriptedRunner` (tests and the `test_utils` feature): records every
//!   invocation and replays canned outputs, so client and batch logic can be
//!   exercised without a NOID install.
//!
//! ## Exit Status
//!
//! Runners never interpret the exit status. They report it, and the client decides
//! that a non-zero status is an [`ArkError::Authority`](crate::error::ArkError)
//! failure. This keeps the failure policy in one place and lets scripted runners
//! simulate failing commands.
//!
//! ## Command Shape
//!
//! ```text
//! <program> -f <database> <subcommand> [args...]
//! ```

use crate::error::Result;
use std::fmt;

pub mod process;
#[cfg(any(test, feature = "test_utils"))]
pub mod scripted;

/// How the child process gets its standard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdinMode {
    /// No input; reads see end-of-file immediately.
    Closed,
    /// Share this process's stdin, for `bind` calls that read the value there.
    Inherit,
}

/// A fully composed authority command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub stdin: StdinMode,
}

impl Invocation {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            stdin: StdinMode::Closed,
        }
    }

    pub fn with_stdin(mut self, stdin: StdinMode) -> Self {
        self.stdin = stdin;
        self
    }

    /// The subcommand (`mint`, `bind`, ...), i.e. the argument after `-f <db>`.
    pub fn subcommand(&self) -> Option<&str> {
        self.args.get(2).map(String::as_str)
    }

    /// Program followed by every argument, as it would be typed in a shell.
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv().join(" "))
    }
}

/// Captured result of one child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }

    /// Human readable status for error messages.
    pub fn status_label(&self) -> String {
        match self.code {
            Some(code) => format!("exit status {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Executes authority commands.
///
/// Implementations spawn (or simulate) the program and capture its output.
/// An `Err` is reserved for the case where nothing could be run at all.
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        (**self).run(invocation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subcommand_is_third_argument() {
        let inv = Invocation::new(
            "noid",
            vec!["-f".into(), ".".into(), "mint".into(), "1".into()],
        );
        assert_eq!(inv.subcommand(), Some("mint"));
        assert_eq!(inv.to_string(), "noid -f . mint 1");
    }

    #[test]
    fn test_status_label() {
        assert_eq!(CommandOutput::failure(3, "boom").status_label(), "exit status 3");
        let killed = CommandOutput {
            code: None,
            ..Default::default()
        };
        assert_eq!(killed.status_label(), "terminated by signal");
        assert!(!killed.is_success());
    }
}

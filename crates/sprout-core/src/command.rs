//! Fail-fast execution of external commands
//!
//! Every external collaborator (package manager, git) is invoked through
//! [`CommandRunner`]. A command either exits cleanly or produces a
//! [`CommandError`]; there is no retry.

use std::fmt;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;

/// A command to run, either as one whitespace-separated string or pre-split
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSpec {
    Literal(String),
    Args(Vec<String>),
}

impl CommandSpec {
    /// Program followed by its arguments
    pub fn argv(&self) -> Vec<String> {
        match self {
            CommandSpec::Literal(line) => line.split_whitespace().map(str::to_string).collect(),
            CommandSpec::Args(args) => args.clone(),
        }
    }
}

impl From<&str> for CommandSpec {
    fn from(line: &str) -> Self {
        CommandSpec::Literal(line.to_string())
    }
}

impl From<Vec<String>> for CommandSpec {
    fn from(args: Vec<String>) -> Self {
        CommandSpec::Args(args)
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv().join(" "))
    }
}

/// Why an external command did not succeed
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Cannot run an empty command")]
    Empty,

    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed with exit code {code}")]
    Failed { command: String, code: i32 },

    #[error("`{command}` was terminated by signal {signal}")]
    Signaled { command: String, signal: i32 },
}

/// Something that can run a command to completion in a directory
pub trait CommandRunner {
    fn run(&mut self, command: &CommandSpec, cwd: &Path) -> Result<(), CommandError>;
}

/// Runs commands as child processes with inherited stdio
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, command: &CommandSpec, cwd: &Path) -> Result<(), CommandError> {
        run_command(command, cwd)
    }
}

/// Spawn `command` in `cwd` and wait for it
pub fn run_command(command: &CommandSpec, cwd: &Path) -> Result<(), CommandError> {
    let argv = command.argv();
    let (program, args) = argv.split_first().ok_or(CommandError::Empty)?;

    let status = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|source| CommandError::Spawn {
            command: command.to_string(),
            source,
        })?;

    check_status(command, status)
}

fn check_status(command: &CommandSpec, status: ExitStatus) -> Result<(), CommandError> {
    if status.success() {
        return Ok(());
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return Err(CommandError::Signaled {
                command: command.to_string(),
                signal,
            });
        }
    }

    Err(CommandError::Failed {
        command: command.to_string(),
        code: status.code().unwrap_or(-1),
    })
}

/// Records invocations instead of spawning anything
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingRunner {
    pub calls: Vec<(Vec<String>, std::path::PathBuf)>,
    /// Fail any command whose program matches
    pub fail_program: Option<&'static str>,
}

#[cfg(test)]
impl CommandRunner for RecordingRunner {
    fn run(&mut self, command: &CommandSpec, cwd: &Path) -> Result<(), CommandError> {
        let argv = command.argv();
        self.calls.push((argv.clone(), cwd.to_path_buf()));
        match (self.fail_program, argv.first().map(String::as_str)) {
            (Some(fail), Some(program)) if fail == program => Err(CommandError::Failed {
                command: command.to_string(),
                code: 1,
            }),
            _ => Ok(()),
        }
    }
}

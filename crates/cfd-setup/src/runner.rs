//! # Command Execution
//!
//! [`CommandRunner`] is the seam between the pipeline and the operating
//! system. Production code uses [`ShellRunner`]; tests use the in-crate
//! recorder to assert command sequences.

use std::process::Command;

use crate::error::SetupError;

/// Runs external commands on behalf of the pipeline.
pub trait CommandRunner {
    /// Run a command to completion, failing on a non-zero exit.
    fn run(&self, program: &str, args: &[&str]) -> Result<(), SetupError>;

    /// Run a command to completion, capturing stdout. Fails on a non-zero
    /// exit.
    fn run_capture(&self, program: &str, args: &[&str]) -> Result<String, SetupError>;

    /// Run a bash script line, for the repository's sourced shell helpers.
    fn bash_capture(&self, script: &str) -> Result<String, SetupError> {
        self.run_capture("/bin/bash", &["-c", script])
    }
}

fn command_line(program: &str, args: &[&str]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

/// [`CommandRunner`] backed by `std::process::Command`, inheriting the
/// parent's stdio so script output and prompts reach the operator.
#[derive(Debug, Default)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<(), SetupError> {
        let status = Command::new(program).args(args).status().map_err(|e| {
            SetupError::CommandSpawn {
                command: command_line(program, args),
                reason: e.to_string(),
            }
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(SetupError::CommandFailed {
                command: command_line(program, args),
                code: status.code(),
            })
        }
    }

    fn run_capture(&self, program: &str, args: &[&str]) -> Result<String, SetupError> {
        let output = Command::new(program).args(args).output().map_err(|e| {
            SetupError::CommandSpawn {
                command: command_line(program, args),
                reason: e.to_string(),
            }
        })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(SetupError::CommandFailed {
                command: command_line(program, args),
                code: output.status.code(),
            })
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_runner_reports_nonzero_exit() {
        let err = ShellRunner.run("/bin/false", &[]).unwrap_err();
        match err {
            SetupError::CommandFailed { command, code } => {
                assert_eq!(command, "/bin/false");
                assert_eq!(code, Some(1));
            }
            other => panic!("Expected CommandFailed, got: {other}"),
        }
    }

    #[test]
    fn shell_runner_captures_stdout() {
        let out = ShellRunner.run_capture("/bin/echo", &["hello"]).unwrap();
        assert_eq!(out.trim(), "hello");
    }

    #[test]
    fn shell_runner_reports_spawn_failure() {
        let err = ShellRunner.run("/nonexistent/binary", &[]).unwrap_err();
        assert!(matches!(err, SetupError::CommandSpawn { .. }));
    }

    #[test]
    fn bash_capture_runs_through_bash() {
        let out = ShellRunner.bash_capture("echo $((1 + 1))").unwrap();
        assert_eq!(out.trim(), "2");
    }
}

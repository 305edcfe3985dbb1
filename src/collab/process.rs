//! Process-execution collaborator
//!
//! Exec steps delegate to the [`ProcessRunner`] trait; the live
//! implementation blocks on `std::process::Command` and captures output.

use tracing::debug;

use crate::common::{Error, Result};

/// Captured outcome of a finished process.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecOutput {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Blocking process execution used by exec steps.
pub trait ProcessRunner {
    /// Run `program` with `args`, waiting for it to finish.
    ///
    /// An `Err` means the process could not be started at all; a non-zero
    /// exit is an `Ok` with the corresponding [`ExecOutput`].
    fn run(&self, program: &str, args: &[&str]) -> Result<ExecOutput>;
}

/// Live [`ProcessRunner`] over `std::process::Command`.
#[derive(Debug, Default)]
pub struct ShellRunner;

impl ProcessRunner for ShellRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<ExecOutput> {
        debug!(%program, ?args, "spawning process");
        let output = std::process::Command::new(program)
            .args(args)
            .output()
            .map_err(|e| Error::spawn(program, e))?;

        Ok(ExecOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

//! Synchronous invocation of external helper programs (`mknod`, `chattr`,
//! `setfacl`).
use anyhow::{Context as _, Result};
use std::process::{Command, Output};

use crate::logging::Log;
use crate::resources::error::ResourceError;

/// Result of a command execution.
#[derive(Debug)]
pub struct ExecResult {
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Exit code, `None` when killed by a signal.
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Runs external programs.
///
/// Production code uses [`SystemExecutor`]; tests substitute a fake that
/// records the argument vectors instead of touching the system.
#[cfg_attr(test, mockall::automock)]
pub trait Executor: Send + Sync {
    /// Run `program` with `args`, failing on a missing program or non-zero exit.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the program is not on `PATH`,
    /// [`ResourceError::ExecutionFailed`] on non-zero exit, or an I/O error
    /// if the process could not be spawned.
    fn run(&self, program: &str, args: &[String]) -> Result<ExecResult>;

    /// Whether `program` is available on `PATH`.
    fn which(&self, program: &str) -> bool;
}

/// [`Executor`] that spawns real processes.
#[derive(Debug, Default)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run(&self, program: &str, args: &[String]) -> Result<ExecResult> {
        if !self.which(program) {
            return Err(ResourceError::NotFound {
                resource: format!("program '{program}'"),
            }
            .into());
        }
        let output = Command::new(program)
            .args(args)
            .output()
            .with_context(|| format!("failed to execute: {program}"))?;
        let result = ExecResult::from(output);
        if !result.success {
            return Err(ResourceError::ExecutionFailed {
                program: program.to_string(),
                exit_code: result.code.unwrap_or(-1),
                stderr: result.stderr.trim().to_string(),
            }
            .into());
        }
        Ok(result)
    }

    fn which(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

/// Invoke a helper described by `desc` (e.g. `"set ACLs of /srv"`).
///
/// `argv[0]` is the program. Failure is reported as a warning and returned as
/// `false`; it never aborts the run.
#[must_use]
pub fn run_helper(executor: &dyn Executor, log: &dyn Log, desc: &str, argv: &[String]) -> bool {
    let Some((program, args)) = argv.split_first() else {
        log.warn(&format!("failed to {desc}: '<undefined>' program not found"));
        return false;
    };
    log.debug(&format!("running: {}", argv.join(" ")));
    match executor.run(program, args) {
        Ok(_) => true,
        Err(e) => {
            log.warn(&format!("failed to {desc}: {e:#}"));
            false
        }
    }
}

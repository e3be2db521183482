//! Typed error variants for resource operations.
//!
//! Apply functions and the executor may return these variants directly;
//! callers convert to [`anyhow::Error`] via `?`.

use thiserror::Error;

/// Errors that arise from applying actions.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// A helper program exited with a non-zero code.
    #[error("command '{program}' failed (exit {exit_code}): {stderr}")]
    ExecutionFailed {
        /// Name of the program that was invoked.
        program: String,
        /// Exit code returned by the process.
        exit_code: i32,
        /// Captured standard error output.
        stderr: String,
    },

    /// A required program or source object was not found.
    #[error("resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource.
        resource: String,
    },

    /// The action lacks the argument its kind requires.
    #[error("'{kind}' action has no {argument}")]
    MissingArgument {
        /// Type code of the action.
        kind: String,
        /// What was expected (e.g. `"symlink target"`).
        argument: &'static str,
    },
}

//! Domain-specific error types for the tmpfiles engine.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Parsing returns typed errors ([`ParseError`], [`ConfigError`]) while the
//! command handlers at the CLI boundary convert them to [`anyhow::Error`]
//! via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! CommandError              phase selection on the command line
//! ConfigError
//! ├── Io                    a directive file or directory could not be read
//! └── Parse(ParseError)     a directive line is malformed (with file:line)
//! ```
//!
//! Apply-time failures of single actions are not errors of this module: they
//! are reported through the logger and counted in the run statistics.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning one directive line into a [`Directive`](crate::config::directive::Directive).
///
/// Every variant is fatal: the run aborts before any filesystem change.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A `%x` specifier whose character is not in the specifier table.
    #[error("unsupported specifier '%{specifier}' in '{path}'")]
    UnknownSpecifier {
        /// The offending specifier character.
        specifier: char,
        /// The path in which it appeared.
        path: String,
    },

    /// The type field (after stripping modifiers) names no known action.
    #[error("unknown action type '{0}'")]
    UnknownType(String),

    /// The line has a type field but no path field.
    #[error("missing path")]
    MissingPath,

    /// The path is not absolute after specifier substitution.
    #[error("path '{0}' is not absolute")]
    RelativePath(String),

    /// The mode field is not an octal number in `0..=0o7777`.
    #[error("invalid mode '{0}': expected octal permission bits, optionally prefixed by '~'")]
    InvalidMode(String),

    /// The user field is neither numeric nor a known user name.
    #[error("unknown user '{0}'")]
    UnknownUser(String),

    /// The group field is neither numeric nor a known group name.
    #[error("unknown group '{0}'")]
    UnknownGroup(String),

    /// A required argument (attributes, ACLs, major:minor) is missing or empty.
    #[error("{field} cannot be empty")]
    EmptyArgument {
        /// Name of the argument field.
        field: &'static str,
    },

    /// The device argument is not of the form `MAJOR:MINOR`.
    #[error("invalid device number '{value}': {reason}")]
    InvalidDevice {
        /// The argument as written.
        value: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// `L` / `L+` without a link target.
    #[error("symlink target not specified")]
    MissingSymlinkTarget,

    /// The path of a glob-expanding action is not a valid pattern.
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob {
        /// The pattern as written.
        pattern: String,
        /// Message from the pattern compiler.
        message: String,
    },
}

/// Errors that arise while locating and reading directive files.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A directive file or config directory could not be read.
    #[error("IO error reading {path}: {source}")]
    Io {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A line of a directive file failed to parse.
    #[error("{path}:{line}: {source}")]
    Parse {
        /// Directive file containing the line.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// What was wrong with the line.
        source: ParseError,
    },
}

/// Errors raised by phase selection before any configuration is read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// None of `--create`, `--remove`, `--clean` was given.
    #[error("Must specify one or more of --create, --remove, --clean")]
    NoPhase,

    /// A phase that exists on the command line but has no implementation.
    #[error("--{0} is not implemented")]
    Unimplemented(&'static str),
}

//! Core logging types: the [`Log`] trait and message levels.

/// Severity / kind of a log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Detail, hidden on the console unless verbose.
    Debug,
    /// Normal progress output.
    Info,
    /// Section header.
    Stage,
    /// What a dry run would do.
    DryRun,
    /// Recoverable failure; the run continues.
    Warn,
    /// Failure of one action; the run continues but exits non-zero.
    Error,
}

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) writes to the console through
/// `tracing`; [`MemoryLog`](super::memory::MemoryLog) keeps messages for
/// inspection. Engine code only sees this trait.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
}

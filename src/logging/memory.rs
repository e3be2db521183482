//! In-memory [`Log`] sink.
use std::sync::Mutex;

use super::types::{Level, Log};

/// Collects every message with its [`Level`] instead of printing it.
///
/// Used by tests and by callers that embed the engine and want to inspect
/// diagnostics afterwards.
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: Mutex<Vec<(Level, String)>>,
}

impl MemoryLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages recorded at `level`, in order.
    #[must_use]
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.entries
            .lock()
            .map_or_else(
                |_| Vec::new(),
                |entries| {
                    entries
                        .iter()
                        .filter(|(l, _)| *l == level)
                        .map(|(_, m)| m.clone())
                        .collect()
                },
            )
    }

    /// All messages regardless of level, in order.
    #[must_use]
    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries
            .lock()
            .map_or_else(|_| Vec::new(), |entries| entries.clone())
    }

    fn push(&self, level: Level, msg: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push((level, msg.to_string()));
        }
    }
}

impl Log for MemoryLog {
    fn stage(&self, msg: &str) {
        self.push(Level::Stage, msg);
    }

    fn info(&self, msg: &str) {
        self.push(Level::Info, msg);
    }

    fn debug(&self, msg: &str) {
        self.push(Level::Debug, msg);
    }

    fn warn(&self, msg: &str) {
        self.push(Level::Warn, msg);
    }

    fn error(&self, msg: &str) {
        self.push(Level::Error, msg);
    }

    fn dry_run(&self, msg: &str) {
        self.push(Level::DryRun, msg);
    }
}

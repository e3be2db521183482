//! Shared state handed to every apply function.
use std::path::PathBuf;
use std::sync::Arc;

use crate::exec::Executor;
use crate::logging::Log;

/// Shared state handed to every apply function.
pub struct Context {
    /// Helper program runner (real or injected by tests).
    pub executor: Arc<dyn Executor>,
    /// Logger for progress and diagnostics.
    pub log: Arc<dyn Log>,
    /// Root of the factory tree used by `C` when no source is given.
    pub factory_dir: PathBuf,
    /// Whether to describe actions instead of performing them.
    pub dry_run: bool,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("executor", &"<dyn Executor>")
            .field("log", &"<dyn Log>")
            .field("factory_dir", &self.factory_dir)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl Context {
    /// Creates a new context.
    #[must_use]
    pub const fn new(
        executor: Arc<dyn Executor>,
        log: Arc<dyn Log>,
        factory_dir: PathBuf,
        dry_run: bool,
    ) -> Self {
        Self {
            executor,
            log,
            factory_dir,
            dry_run,
        }
    }
}

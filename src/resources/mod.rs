//! Creation-time effects of each action kind.
//!
//! Every kind maps to one apply function via [`handler`]. An apply function
//! receives the action, one concrete path (already glob-expanded) and the
//! shared [`Context`]; it returns what changed or an error that the engine
//! reports and counts.
pub mod acl;
pub mod attributes;
pub mod copy;
pub mod device;
pub mod directory;
pub mod error;
pub mod file;
pub mod helpers;
pub mod ownership;
pub mod remove;
pub mod symlink;

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::directive::{Action, ActionKind};
use crate::processing::context::Context;

/// Minimal interface for something that can be described and applied.
pub trait Applicable {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Apply the resource change.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be made due to I/O failures,
    /// permission issues, or a missing required argument.
    fn apply(&self) -> Result<ResourceChange>;
}

/// Result of applying a resource change.
///
/// # Examples
///
/// ```
/// use tmpfiles_cli::resources::ResourceChange;
///
/// let applied = ResourceChange::Applied;
/// let noop = ResourceChange::AlreadyCorrect;
/// let skipped = ResourceChange::Skipped { reason: "helper failed".into() };
///
/// assert_eq!(applied, ResourceChange::Applied);
/// assert_ne!(applied, noop);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    /// Something was created, written, removed or adjusted.
    Applied,
    /// The object already existed; only ownership and mode may have been set.
    AlreadyCorrect,
    /// Nothing was done (e.g. the path is missing, or a helper failed and
    /// has already been reported).
    Skipped {
        /// Reason why the action was skipped.
        reason: String,
    },
}

/// Signature shared by every per-kind apply function.
pub type ApplyFn = fn(&Action, &Path, &Context) -> Result<ResourceChange>;

/// The apply function for `kind`.
#[must_use]
pub const fn handler(kind: ActionKind) -> ApplyFn {
    match kind {
        ActionKind::CreateFile => file::create,
        ActionKind::TruncateFile | ActionKind::TruncateFileLegacy => file::truncate,
        ActionKind::WriteFile => file::overwrite,
        ActionKind::AppendFile => file::append,
        ActionKind::CreateDir
        | ActionKind::CreateRemovableDir
        | ActionKind::Subvolume
        | ActionKind::SubvolumeQuota
        | ActionKind::SubvolumeOwnQuota => directory::create,
        ActionKind::AdjustDir => directory::adjust,
        ActionKind::Symlink => symlink::create,
        ActionKind::ForceSymlink => symlink::replace,
        ActionKind::CharDevice => device::create_char,
        ActionKind::Copy => copy::copy,
        ActionKind::IgnoreRecursive | ActionKind::Ignore => remove::ignore,
        ActionKind::Remove => remove::remove,
        ActionKind::RemoveRecursive => remove::remove_recursive,
        ActionKind::Adjust | ActionKind::AdjustLegacy => ownership::adjust,
        ActionKind::AdjustRecursive => ownership::adjust_recursive,
        ActionKind::Attributes | ActionKind::AttributesRecursive => attributes::set,
        ActionKind::Acl
        | ActionKind::AclAppend
        | ActionKind::AclRecursive
        | ActionKind::AclAppendRecursive => acl::set,
    }
}

/// One action bound to one concrete path.
#[derive(Debug)]
pub struct ActionResource<'a> {
    /// The action to apply.
    pub action: &'a Action,
    /// Concrete target path.
    pub path: PathBuf,
    ctx: &'a Context,
}

impl<'a> ActionResource<'a> {
    /// Bind `action` to `path`.
    #[must_use]
    pub const fn new(action: &'a Action, path: PathBuf, ctx: &'a Context) -> Self {
        Self { action, path, ctx }
    }
}

impl Applicable for ActionResource<'_> {
    fn description(&self) -> String {
        format!("{} {}", self.action.kind, self.path.display())
    }

    fn apply(&self) -> Result<ResourceChange> {
        handler(self.action.kind)(self.action, &self.path, self.ctx)
    }
}

/// Shared test helpers for resource unit tests.
#[cfg(test)]
pub mod test_helpers {
    use std::sync::Arc;

    use crate::exec::{ExecResult, Executor, MockExecutor};
    use crate::logging::MemoryLog;
    use crate::processing::context::Context;

    /// Successful, empty command output.
    #[must_use]
    pub fn ok_result() -> ExecResult {
        ExecResult {
            stdout: String::new(),
            stderr: String::new(),
            success: true,
            code: Some(0),
        }
    }

    /// A context around `executor` that records log output in `log`.
    #[must_use]
    pub fn context(executor: impl Executor + 'static, log: &Arc<MemoryLog>) -> Context {
        Context::new(
            Arc::new(executor),
            Arc::clone(log) as Arc<dyn crate::logging::Log>,
            std::path::PathBuf::from("/usr/share/factory"),
            false,
        )
    }

    /// A context whose executor must never be called.
    #[must_use]
    pub fn fs_context(log: &Arc<MemoryLog>) -> Context {
        let mut executor = MockExecutor::new();
        executor.expect_run().never();
        context(executor, log)
    }

    /// Convert string slices to an owned argument vector.
    #[must_use]
    pub fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::MemoryLog;
    use std::sync::Arc;

    #[test]
    fn aliases_share_a_handler() {
        assert!(std::ptr::fn_addr_eq(
            handler(ActionKind::Adjust),
            handler(ActionKind::AdjustLegacy)
        ));
        assert!(std::ptr::fn_addr_eq(
            handler(ActionKind::TruncateFile),
            handler(ActionKind::TruncateFileLegacy)
        ));
    }

    #[test]
    fn description_names_kind_and_path() {
        let log = Arc::new(MemoryLog::new());
        let ctx = test_helpers::fs_context(&log);
        let action = Action::new(ActionKind::ForceSymlink);
        let resource = ActionResource::new(&action, PathBuf::from("/run/x"), &ctx);
        assert_eq!(resource.description(), "L+ /run/x");
    }

    #[test]
    fn apply_dispatches_to_handler() {
        let dir = tempfile::tempdir().unwrap();
        let log = Arc::new(MemoryLog::new());
        let ctx = test_helpers::fs_context(&log);
        let action = Action::new(ActionKind::CreateDir);
        let target = dir.path().join("made");
        let resource = ActionResource::new(&action, target.clone(), &ctx);
        assert_eq!(resource.apply().unwrap(), ResourceChange::Applied);
        assert!(target.is_dir());
    }
}

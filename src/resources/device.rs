//! `c`: character device nodes, created through `mknod(1)`.
use std::path::Path;

use anyhow::Result;

use super::ResourceChange;
use super::error::ResourceError;
use super::helpers::fs::lexists;
use super::ownership::apply_ownership_and_mode;
use crate::config::directive::{Action, Argument};
use crate::exec::run_helper;
use crate::processing::context::Context;

/// Create the node if nothing exists at the path, then apply ownership and
/// mode to whatever is there.
///
/// # Errors
///
/// Returns an error if the action carries no device number. A failing
/// `mknod` is reported as a warning and yields [`ResourceChange::Skipped`].
pub fn create_char(action: &Action, path: &Path, ctx: &Context) -> Result<ResourceChange> {
    let Argument::Device(device) = &action.argument else {
        return Err(ResourceError::MissingArgument {
            kind: action.kind.to_string(),
            argument: "device number",
        }
        .into());
    };

    let mut change = ResourceChange::AlreadyCorrect;
    if !lexists(path) {
        let argv = vec![
            "mknod".to_string(),
            path.display().to_string(),
            "c".to_string(),
            device.major.to_string(),
            device.minor.to_string(),
        ];
        let desc = format!("create device node {}", path.display());
        if !run_helper(ctx.executor.as_ref(), ctx.log.as_ref(), &desc, &argv) {
            return Ok(ResourceChange::Skipped {
                reason: "mknod failed".to_string(),
            });
        }
        change = ResourceChange::Applied;
    }
    if lexists(path) {
        apply_ownership_and_mode(action, path, ctx);
    }
    Ok(change)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::directive::{ActionKind, DeviceNumber};
    use crate::exec::MockExecutor;
    use crate::logging::{Level, MemoryLog};
    use crate::resources::test_helpers::{argv, context, ok_result};
    use std::sync::Arc;

    fn device_action() -> Action {
        let mut action = Action::new(ActionKind::CharDevice);
        action.argument = Argument::Device(DeviceNumber { major: 1, minor: 3 });
        action
    }

    #[test]
    fn invokes_mknod_with_major_and_minor() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("null");
        let expected = argv(&[&path.display().to_string(), "c", "1", "3"]);
        let mut executor = MockExecutor::new();
        executor
            .expect_run()
            .withf(move |program, args| program == "mknod" && args == expected)
            .times(1)
            .returning(|_, _| Ok(ok_result()));
        let log = Arc::new(MemoryLog::new());

        let change = create_char(&device_action(), &path, &context(executor, &log)).unwrap();

        assert_eq!(change, ResourceChange::Applied);
    }

    #[test]
    fn existing_node_is_not_recreated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("node");
        std::fs::write(&path, "").unwrap();
        let mut executor = MockExecutor::new();
        executor.expect_run().never();
        let log = Arc::new(MemoryLog::new());

        let change = create_char(&device_action(), &path, &context(executor, &log)).unwrap();

        assert_eq!(change, ResourceChange::AlreadyCorrect);
    }

    #[test]
    fn mknod_failure_is_skipped_with_warning() {
        let dir = tempfile::tempdir().unwrap();
        let mut executor = MockExecutor::new();
        executor
            .expect_run()
            .returning(|_, _| Err(anyhow::anyhow!("Operation not permitted")));
        let log = Arc::new(MemoryLog::new());

        let change = create_char(
            &device_action(),
            &dir.path().join("node"),
            &context(executor, &log),
        )
        .unwrap();

        assert!(matches!(change, ResourceChange::Skipped { .. }));
        assert_eq!(log.messages(Level::Warn).len(), 1);
    }
}

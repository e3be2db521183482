//! `a`, `a+`, `A`, `A+`: POSIX ACLs through `setfacl(1)`.
use std::path::Path;

use anyhow::Result;

use super::ResourceChange;
use crate::config::directive::{Action, ActionKind};
use crate::exec::run_helper;
use crate::processing::context::Context;

/// The `setfacl` invocations for `kind`, in the order they run.
///
/// Replacing kinds first strip every existing entry. The recursive kinds
/// pass `--physical` on the modifying call so symlinks are not followed.
#[must_use]
pub fn setfacl_argvs(kind: ActionKind, acl: &str, path: &Path) -> Vec<Vec<String>> {
    let path = path.display().to_string();
    let call = |flags: &[&str]| -> Vec<String> {
        std::iter::once("setfacl")
            .chain(flags.iter().copied())
            .map(ToString::to_string)
            .chain(["--".to_string(), path.clone()])
            .collect()
    };
    match kind {
        ActionKind::Acl => vec![call(&["--remove-all"]), call(&["--modify", acl])],
        ActionKind::AclRecursive => vec![
            call(&["--recursive", "--remove-all"]),
            call(&["--recursive", "--physical", "--modify", acl]),
        ],
        ActionKind::AclAppendRecursive => {
            vec![call(&["--recursive", "--physical", "--modify", acl])]
        }
        _ => vec![call(&["--modify", acl])],
    }
}

/// Run every `setfacl` call for the action. Each call runs regardless of
/// whether the previous one failed; failures are warnings.
///
/// # Errors
///
/// Never fails; the signature matches the other apply functions.
pub fn set(action: &Action, path: &Path, ctx: &Context) -> Result<ResourceChange> {
    let desc = format!("set ACLs of {}", path.display());
    let mut all_ok = true;
    for argv in setfacl_argvs(action.kind, action.argument.content(), path) {
        all_ok &= run_helper(ctx.executor.as_ref(), ctx.log.as_ref(), &desc, &argv);
    }
    if all_ok {
        Ok(ResourceChange::Applied)
    } else {
        Ok(ResourceChange::Skipped {
            reason: "setfacl failed".to_string(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::directive::Argument;
    use crate::exec::MockExecutor;
    use crate::logging::{Level, MemoryLog};
    use crate::resources::test_helpers::{argv, context, ok_result};
    use mockall::Sequence;
    use std::sync::Arc;

    const ACL: &str = "u:nobody:rwx";

    #[test]
    fn replace_strips_then_modifies() {
        let calls = setfacl_argvs(ActionKind::Acl, ACL, Path::new("/p"));
        assert_eq!(
            calls,
            [
                argv(&["setfacl", "--remove-all", "--", "/p"]),
                argv(&["setfacl", "--modify", ACL, "--", "/p"]),
            ]
        );
    }

    #[test]
    fn append_only_modifies() {
        let calls = setfacl_argvs(ActionKind::AclAppend, ACL, Path::new("/p"));
        assert_eq!(calls, [argv(&["setfacl", "--modify", ACL, "--", "/p"])]);
    }

    #[test]
    fn recursive_replace_uses_physical_walk() {
        let calls = setfacl_argvs(ActionKind::AclRecursive, ACL, Path::new("/p"));
        assert_eq!(
            calls,
            [
                argv(&["setfacl", "--recursive", "--remove-all", "--", "/p"]),
                argv(&[
                    "setfacl",
                    "--recursive",
                    "--physical",
                    "--modify",
                    ACL,
                    "--",
                    "/p"
                ]),
            ]
        );
    }

    #[test]
    fn recursive_append_only_modifies() {
        let calls = setfacl_argvs(ActionKind::AclAppendRecursive, ACL, Path::new("/p"));
        assert_eq!(
            calls,
            [argv(&[
                "setfacl",
                "--recursive",
                "--physical",
                "--modify",
                ACL,
                "--",
                "/p"
            ])]
        );
    }

    #[test]
    fn second_call_runs_after_first_fails() {
        let mut seq = Sequence::new();
        let mut executor = MockExecutor::new();
        executor
            .expect_run()
            .withf(|_, args| args[0] == "--remove-all")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(anyhow::anyhow!("Operation not supported")));
        executor
            .expect_run()
            .withf(|_, args| args[0] == "--modify")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(ok_result()));
        let log = Arc::new(MemoryLog::new());
        let mut action = Action::new(ActionKind::Acl);
        action.argument = Argument::Acl(ACL.to_string());

        let change = set(&action, Path::new("/p"), &context(executor, &log)).unwrap();

        assert!(matches!(change, ResourceChange::Skipped { .. }));
        assert_eq!(log.messages(Level::Warn).len(), 1);
    }
}

//! `h` / `H`: file attributes through `chattr(1)`.
use std::path::Path;

use anyhow::Result;

use super::ResourceChange;
use crate::config::directive::{Action, ActionKind};
use crate::exec::run_helper;
use crate::processing::context::Context;

/// Argument vector for `chattr`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use tmpfiles_cli::resources::attributes::chattr_argv;
///
/// assert_eq!(
///     chattr_argv(true, "+C", Path::new("/var/lib/db")),
///     ["chattr", "-R", "+C", "/var/lib/db"]
/// );
/// ```
#[must_use]
pub fn chattr_argv(recursive: bool, attributes: &str, path: &Path) -> Vec<String> {
    let mut argv = vec!["chattr".to_string()];
    if recursive {
        argv.push("-R".to_string());
    }
    argv.push(attributes.to_string());
    argv.push(path.display().to_string());
    argv
}

/// Run `chattr` on the path. A failure is a warning, never an error.
///
/// # Errors
///
/// Never fails; the signature matches the other apply functions.
pub fn set(action: &Action, path: &Path, ctx: &Context) -> Result<ResourceChange> {
    let recursive = action.kind == ActionKind::AttributesRecursive;
    let argv = chattr_argv(recursive, action.argument.content(), path);
    let desc = format!("change attributes of {}", path.display());
    if run_helper(ctx.executor.as_ref(), ctx.log.as_ref(), &desc, &argv) {
        Ok(ResourceChange::Applied)
    } else {
        Ok(ResourceChange::Skipped {
            reason: "chattr failed".to_string(),
        })
    }
}

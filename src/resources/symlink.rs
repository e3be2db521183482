//! `L` and `L+`.
use std::path::Path;

use anyhow::{Context as _, Result};

use super::ResourceChange;
use super::error::ResourceError;
use super::helpers::fs::{lexists, remove_existing};
use crate::config::directive::{Action, Argument};
use crate::processing::context::Context;

fn link_target(action: &Action) -> Result<&Path> {
    match &action.argument {
        Argument::LinkTarget(target) => Ok(target),
        _ => Err(ResourceError::MissingArgument {
            kind: action.kind.to_string(),
            argument: "symlink target",
        }
        .into()),
    }
}

/// `L`: create the symlink only if nothing (not even a broken link) exists.
///
/// # Errors
///
/// Returns an error if the action has no target or the link cannot be made.
pub fn create(action: &Action, path: &Path, _ctx: &Context) -> Result<ResourceChange> {
    let target = link_target(action)?;
    if lexists(path) {
        return Ok(ResourceChange::AlreadyCorrect);
    }
    std::os::unix::fs::symlink(target, path)
        .with_context(|| format!("create link: {}", path.display()))?;
    Ok(ResourceChange::Applied)
}

/// `L+`: remove whatever is at the path (a directory tree included), then
/// create the symlink.
///
/// # Errors
///
/// Returns an error if the action has no target, the existing object cannot
/// be removed, or the link cannot be made.
pub fn replace(action: &Action, path: &Path, _ctx: &Context) -> Result<ResourceChange> {
    let target = link_target(action)?;
    remove_existing(path)?;
    std::os::unix::fs::symlink(target, path)
        .with_context(|| format!("create link: {}", path.display()))?;
    Ok(ResourceChange::Applied)
}

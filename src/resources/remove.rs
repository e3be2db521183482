//! `r`, `R`, `x` and `X`.
use std::path::Path;

use anyhow::{Context as _, Result};

use super::ResourceChange;
use super::helpers::fs::{is_empty_dir, is_real_dir};
use crate::config::directive::Action;
use crate::processing::context::Context;

/// `x` / `X`: only affect cleanup, which this engine does not perform.
///
/// # Errors
///
/// Never fails.
pub const fn ignore(_action: &Action, _path: &Path, _ctx: &Context) -> Result<ResourceChange> {
    Ok(ResourceChange::AlreadyCorrect)
}

/// `r`: remove a file, node or symlink, or a directory if it is empty.
///
/// # Errors
///
/// Returns an error if the object cannot be removed.
pub fn remove(_action: &Action, path: &Path, _ctx: &Context) -> Result<ResourceChange> {
    if !is_real_dir(path) {
        std::fs::remove_file(path).with_context(|| format!("remove: {}", path.display()))?;
        return Ok(ResourceChange::Applied);
    }
    if !is_empty_dir(path)? {
        return Ok(ResourceChange::Skipped {
            reason: "directory not empty".to_string(),
        });
    }
    std::fs::remove_dir(path).with_context(|| format!("remove: {}", path.display()))?;
    Ok(ResourceChange::Applied)
}

/// `R`: remove an object and, for a real directory, everything below it.
///
/// Failures inside a directory tree are only logged at debug level.
///
/// # Errors
///
/// Returns an error if a non-directory cannot be removed.
pub fn remove_recursive(_action: &Action, path: &Path, ctx: &Context) -> Result<ResourceChange> {
    if !is_real_dir(path) {
        std::fs::remove_file(path).with_context(|| format!("remove: {}", path.display()))?;
        return Ok(ResourceChange::Applied);
    }
    if let Err(e) = std::fs::remove_dir_all(path) {
        ctx.log
            .debug(&format!("incomplete removal of {}: {e}", path.display()));
    }
    Ok(ResourceChange::Applied)
}

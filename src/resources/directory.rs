//! `d`, `D`, `v`, `q`, `Q` and `e`.
//!
//! Subvolume kinds create plain directories.
use std::path::Path;

use anyhow::{Context as _, Result};

use super::ResourceChange;
use super::helpers::fs::lexists;
use super::ownership::apply_ownership_and_mode;
use crate::config::directive::Action;
use crate::processing::context::Context;

/// Create the directory (with parents) if nothing exists at the path, then
/// apply ownership and mode.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn create(action: &Action, path: &Path, ctx: &Context) -> Result<ResourceChange> {
    let change = if lexists(path) {
        ResourceChange::AlreadyCorrect
    } else {
        std::fs::create_dir_all(path)
            .with_context(|| format!("create directory: {}", path.display()))?;
        ResourceChange::Applied
    };
    apply_ownership_and_mode(action, path, ctx);
    Ok(change)
}

/// `e`: adjust an existing directory; anything else is left alone.
///
/// # Errors
///
/// Never fails; the signature matches the other apply functions.
pub fn adjust(action: &Action, path: &Path, ctx: &Context) -> Result<ResourceChange> {
    if !path.is_dir() {
        return Ok(ResourceChange::Skipped {
            reason: "not a directory".to_string(),
        });
    }
    apply_ownership_and_mode(action, path, ctx);
    Ok(ResourceChange::Applied)
}

//! `f`, `f+`, `F`, `w` and `w+`.
use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::Path;

use anyhow::{Context as _, Result};

use super::ResourceChange;
use super::helpers::fs::lexists;
use super::ownership::apply_ownership_and_mode;
use crate::config::directive::Action;
use crate::processing::context::Context;

/// `f`: create the file with the argument as content unless something
/// already exists at the path. Ownership and mode are applied either way.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn create(action: &Action, path: &Path, ctx: &Context) -> Result<ResourceChange> {
    let change = if lexists(path) {
        ResourceChange::AlreadyCorrect
    } else {
        std::fs::write(path, action.argument.content())
            .with_context(|| format!("create file: {}", path.display()))?;
        ResourceChange::Applied
    };
    apply_ownership_and_mode(action, path, ctx);
    Ok(change)
}

/// `f+` / `F`: create or truncate, then write the argument.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn truncate(action: &Action, path: &Path, ctx: &Context) -> Result<ResourceChange> {
    std::fs::write(path, action.argument.content())
        .with_context(|| format!("truncate file: {}", path.display()))?;
    apply_ownership_and_mode(action, path, ctx);
    Ok(ResourceChange::Applied)
}

/// `w`: replace the content of an existing file. Never creates.
///
/// # Errors
///
/// Returns an error if the file does not exist or cannot be written.
pub fn overwrite(action: &Action, path: &Path, ctx: &Context) -> Result<ResourceChange> {
    let mut file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("open for writing: {}", path.display()))?;
    file.write_all(action.argument.content().as_bytes())
        .with_context(|| format!("write: {}", path.display()))?;
    apply_ownership_and_mode(action, path, ctx);
    Ok(ResourceChange::Applied)
}

/// `w+`: append the argument to an existing file. Never creates.
///
/// # Errors
///
/// Returns an error if the file does not exist or cannot be written.
pub fn append(action: &Action, path: &Path, ctx: &Context) -> Result<ResourceChange> {
    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .with_context(|| format!("open for appending: {}", path.display()))?;
    file.write_all(action.argument.content().as_bytes())
        .with_context(|| format!("append: {}", path.display()))?;
    apply_ownership_and_mode(action, path, ctx);
    Ok(ResourceChange::Applied)
}

//! Ownership and permission bits: the finishing step of most actions, and
//! the whole of `z`, `m` and `Z`.
use std::fs::Permissions;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use anyhow::Result;
use walkdir::WalkDir;

use super::ResourceChange;
use super::helpers::fs::{is_real_dir, lexists};
use crate::config::directive::{Action, Mode};
use crate::processing::context::Context;

/// Mode applied to non-directories when the directive leaves it unset.
pub const DEFAULT_FILE_MODE: u32 = 0o644;
/// Mode applied to directories when the directive leaves it unset.
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Compute the bits to set on an object.
///
/// A masked mode keeps only the requested bits that are already set; the
/// setuid, setgid and sticky bits survive the mask on directories only.
///
/// # Examples
///
/// ```
/// use tmpfiles_cli::config::directive::Mode;
/// use tmpfiles_cli::resources::ownership::effective_mode;
///
/// let masked = Mode { masked: true, bits: 0o644 };
/// assert_eq!(effective_mode(Some(masked), false, 0o100755), 0o644);
/// assert_eq!(effective_mode(None, true, 0o40700), 0o755);
/// ```
#[must_use]
pub const fn effective_mode(mode: Option<Mode>, is_dir: bool, current: u32) -> u32 {
    match mode {
        None if is_dir => DEFAULT_DIR_MODE,
        None => DEFAULT_FILE_MODE,
        Some(Mode {
            masked: false,
            bits,
        }) => bits,
        Some(Mode { masked: true, bits }) => {
            let kept = bits & current & 0o7777;
            if is_dir { kept } else { kept & !0o7000 }
        }
    }
}

/// Set owner, group and mode of `path` as requested by `action`.
///
/// Ownership is changed without following a final symlink and is skipped
/// when neither owner nor group is given. Symlinks never get a mode.
/// Failures are reported as warnings; they never fail the action.
pub fn apply_ownership_and_mode(action: &Action, path: &Path, ctx: &Context) {
    if (action.uid.is_some() || action.gid.is_some())
        && let Err(e) = std::os::unix::fs::lchown(path, action.uid, action.gid)
    {
        ctx.log
            .warn(&format!("failed to change owner of {}: {e}", path.display()));
    }

    let meta = match path.symlink_metadata() {
        Ok(meta) => meta,
        Err(e) => {
            ctx.log
                .warn(&format!("failed to change mode of {}: {e}", path.display()));
            return;
        }
    };
    if meta.file_type().is_symlink() {
        return;
    }
    let mode = effective_mode(action.mode, meta.is_dir(), meta.permissions().mode());
    if let Err(e) = std::fs::set_permissions(path, Permissions::from_mode(mode)) {
        ctx.log
            .warn(&format!("failed to change mode of {}: {e}", path.display()));
    }
}

/// `z` / `m`: adjust an existing object.
///
/// # Errors
///
/// Never fails; the signature matches the other apply functions.
pub fn adjust(action: &Action, path: &Path, ctx: &Context) -> Result<ResourceChange> {
    if !lexists(path) {
        return Ok(ResourceChange::Skipped {
            reason: "does not exist".to_string(),
        });
    }
    apply_ownership_and_mode(action, path, ctx);
    Ok(ResourceChange::Applied)
}

/// `Z`: adjust an object and, for a real directory, everything below it.
///
/// Symlinks inside the tree are not followed.
///
/// # Errors
///
/// Never fails; unreadable entries are reported as warnings.
pub fn adjust_recursive(action: &Action, path: &Path, ctx: &Context) -> Result<ResourceChange> {
    if !is_real_dir(path) {
        return adjust(action, path, ctx);
    }
    for entry in WalkDir::new(path).follow_links(false) {
        match entry {
            Ok(entry) => apply_ownership_and_mode(action, entry.path(), ctx),
            Err(e) => ctx
                .log
                .warn(&format!("failed to walk {}: {e}", path.display())),
        }
    }
    Ok(ResourceChange::Applied)
}

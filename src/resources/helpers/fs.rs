//! File-system helpers that never follow a symlink at the final component.
use anyhow::{Context as _, Result};
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

/// Whether anything (including a broken symlink) exists at `path`.
#[must_use]
pub fn lexists(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

/// Whether `path` is a symlink.
#[must_use]
pub fn is_symlink(path: &Path) -> bool {
    path.symlink_metadata()
        .is_ok_and(|meta| meta.file_type().is_symlink())
}

/// Whether `path` is a directory and not a symlink to one.
#[must_use]
pub fn is_real_dir(path: &Path) -> bool {
    path.symlink_metadata().is_ok_and(|meta| meta.is_dir())
}

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent: {}", parent.display()))?;
    }
    Ok(())
}

/// Remove whatever is at `path`: a whole directory tree if it is a real
/// directory, otherwise the file, node or symlink itself. Does nothing if
/// `path` does not exist.
///
/// # Errors
///
/// Returns an error if the path exists but cannot be removed.
pub fn remove_existing(path: &Path) -> Result<()> {
    if is_real_dir(path) {
        std::fs::remove_dir_all(path)
            .with_context(|| format!("remove existing: {}", path.display()))?;
    } else if lexists(path) {
        std::fs::remove_file(path)
            .with_context(|| format!("remove existing: {}", path.display()))?;
    }
    Ok(())
}

/// Copy one non-directory entry, recreating a symlink rather than
/// following it.
///
/// # Errors
///
/// Returns an error if the source cannot be read or the destination written.
pub fn copy_entry(src: &Path, dst: &Path) -> Result<()> {
    if is_symlink(src) {
        let target =
            std::fs::read_link(src).with_context(|| format!("reading link {}", src.display()))?;
        std::os::unix::fs::symlink(&target, dst)
            .with_context(|| format!("creating link {}", dst.display()))?;
    } else {
        std::fs::copy(src, dst)
            .with_context(|| format!("copying {} to {}", src.display(), dst.display()))?;
    }
    Ok(())
}

/// Recursively copy a directory tree.
///
/// Symlinks inside the tree are recreated as symlinks. Directory permission
/// bits are carried over; regular files keep theirs through [`std::fs::copy`].
///
/// # Errors
///
/// Returns an error if the destination directory cannot be created, a source
/// entry cannot be read, or a file cannot be copied.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst)
        .with_context(|| format!("creating directory {}", dst.display()))?;
    for entry in
        std::fs::read_dir(src).with_context(|| format!("reading directory {}", src.display()))?
    {
        let entry = entry.with_context(|| format!("reading entry in {}", src.display()))?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        let file_type = entry
            .file_type()
            .with_context(|| format!("reading type of {}", src_path.display()))?;
        if file_type.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            copy_entry(&src_path, &dst_path)?;
        }
    }
    let mode = std::fs::metadata(src)
        .with_context(|| format!("reading metadata of {}", src.display()))?
        .permissions()
        .mode();
    std::fs::set_permissions(dst, std::fs::Permissions::from_mode(mode & 0o7777))
        .with_context(|| format!("setting permissions of {}", dst.display()))?;
    Ok(())
}

/// Whether the directory at `path` has no entries.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed.
pub fn is_empty_dir(path: &Path) -> Result<bool> {
    let mut listing =
        std::fs::read_dir(path).with_context(|| format!("reading directory {}", path.display()))?;
    Ok(listing.next().is_none())
}

//! `C`: seed a path from an explicit source or the factory tree.
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use super::ResourceChange;
use super::helpers::fs::{
    copy_dir_recursive, copy_entry, ensure_parent_dir, is_empty_dir, is_real_dir, is_symlink,
};
use crate::config::directive::{Action, Argument};
use crate::processing::context::Context;

/// Source used when the directive names none: the same path below
/// `factory_dir`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use tmpfiles_cli::resources::copy::factory_source;
///
/// assert_eq!(
///     factory_source(Path::new("/usr/share/factory"), Path::new("/etc/pam.d")),
///     Path::new("/usr/share/factory/etc/pam.d")
/// );
/// ```
#[must_use]
pub fn factory_source(factory_dir: &Path, path: &Path) -> PathBuf {
    factory_dir.join(path.strip_prefix("/").unwrap_or(path))
}

/// A destination that is a symlink is resolved one level, relative to its
/// parent directory, so the copy lands where the link points.
fn resolve_destination(path: &Path) -> Result<PathBuf> {
    if !is_symlink(path) {
        return Ok(path.to_path_buf());
    }
    let target =
        std::fs::read_link(path).with_context(|| format!("reading link {}", path.display()))?;
    let parent = path.parent().unwrap_or_else(|| Path::new("/"));
    Ok(parent.join(target))
}

/// Copy the source to the path unless the destination already exists.
///
/// A file or symlink source is copied as-is (a symlink stays a symlink). A
/// directory source replaces an empty destination directory; a non-empty
/// one is left alone.
///
/// # Errors
///
/// Returns an error if the source cannot be read or the destination cannot
/// be written.
pub fn copy(action: &Action, path: &Path, ctx: &Context) -> Result<ResourceChange> {
    let source = match &action.argument {
        Argument::CopySource(source) => source.clone(),
        _ => factory_source(&ctx.factory_dir, path),
    };
    let dest = resolve_destination(path)?;
    ensure_parent_dir(&dest)?;

    if is_symlink(&source) || !source.is_dir() {
        if dest.exists() {
            return Ok(ResourceChange::AlreadyCorrect);
        }
        copy_entry(&source, &dest)?;
        return Ok(ResourceChange::Applied);
    }

    if is_real_dir(&dest) && is_empty_dir(&dest)? {
        std::fs::remove_dir(&dest)
            .with_context(|| format!("remove empty directory: {}", dest.display()))?;
    }
    if dest.exists() {
        return Ok(ResourceChange::AlreadyCorrect);
    }
    copy_dir_recursive(&source, &dest)?;
    Ok(ResourceChange::Applied)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::directive::ActionKind;
    use crate::logging::MemoryLog;
    use crate::resources::test_helpers::fs_context;
    use std::sync::Arc;

    fn copy_from(source: &Path) -> Action {
        let mut action = Action::new(ActionKind::Copy);
        action.argument = Argument::CopySource(source.to_path_buf());
        action
    }

    #[test]
    fn copies_file_when_destination_missing() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        std::fs::write(&src, "seed").unwrap();
        let dest = dir.path().join("out/dest");
        let log = Arc::new(MemoryLog::new());

        let change = copy(&copy_from(&src), &dest, &fs_context(&log)).unwrap();

        assert_eq!(change, ResourceChange::Applied);
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "seed");
    }

    #[test]
    fn existing_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        std::fs::write(&src, "seed").unwrap();
        let dest = dir.path().join("dest");
        std::fs::write(&dest, "local").unwrap();
        let log = Arc::new(MemoryLog::new());

        let change = copy(&copy_from(&src), &dest, &fs_context(&log)).unwrap();

        assert_eq!(change, ResourceChange::AlreadyCorrect);
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "local");
    }

    #[test]
    fn directory_replaces_empty_destination() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        std::fs::create_dir(&src).unwrap();
        std::fs::write(src.join("a"), "a").unwrap();
        let dest = dir.path().join("dest");
        std::fs::create_dir(&dest).unwrap();
        let log = Arc::new(MemoryLog::new());

        let change = copy(&copy_from(&src), &dest, &fs_context(&log)).unwrap();

        assert_eq!(change, ResourceChange::Applied);
        assert_eq!(std::fs::read_to_string(dest.join("a")).unwrap(), "a");
    }

    #[test]
    fn directory_leaves_populated_destination() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        std::fs::create_dir(&src).unwrap();
        std::fs::write(src.join("a"), "a").unwrap();
        let dest = dir.path().join("dest");
        std::fs::create_dir(&dest).unwrap();
        std::fs::write(dest.join("mine"), "").unwrap();
        let log = Arc::new(MemoryLog::new());

        let change = copy(&copy_from(&src), &dest, &fs_context(&log)).unwrap();

        assert_eq!(change, ResourceChange::AlreadyCorrect);
        assert!(!dest.join("a").exists());
    }

    #[test]
    fn symlink_source_is_copied_as_link() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        std::os::unix::fs::symlink("/elsewhere", &src).unwrap();
        let dest = dir.path().join("dest");
        let log = Arc::new(MemoryLog::new());

        copy(&copy_from(&src), &dest, &fs_context(&log)).unwrap();

        assert_eq!(std::fs::read_link(&dest).unwrap(), Path::new("/elsewhere"));
    }

    #[test]
    fn symlinked_destination_is_followed_one_level() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        std::fs::write(&src, "seed").unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink("real", &link).unwrap();
        let log = Arc::new(MemoryLog::new());

        copy(&copy_from(&src), &link, &fs_context(&log)).unwrap();

        assert_eq!(
            std::fs::read_to_string(dir.path().join("real")).unwrap(),
            "seed"
        );
    }

    #[test]
    fn defaults_to_factory_tree() {
        let factory = tempfile::tempdir().unwrap();
        let root = tempfile::tempdir().unwrap();
        let dest = root.path().join("seeded");
        let seeded = factory_source(factory.path(), &dest);
        std::fs::create_dir_all(seeded.parent().unwrap()).unwrap();
        std::fs::write(&seeded, "factory").unwrap();
        let log = Arc::new(MemoryLog::new());
        let mut ctx = fs_context(&log);
        ctx.factory_dir = factory.path().to_path_buf();

        let change = copy(&Action::new(ActionKind::Copy), &dest, &ctx).unwrap();

        assert_eq!(change, ResourceChange::Applied);
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "factory");
    }

    #[test]
    fn missing_source_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let log = Arc::new(MemoryLog::new());
        let result = copy(
            &copy_from(&dir.path().join("nope")),
            &dir.path().join("dest"),
            &fs_context(&log),
        );
        assert!(result.is_err());
    }
}

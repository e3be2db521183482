//! Apply-time glob expansion.
use std::path::PathBuf;

use glob::MatchOptions;

use crate::logging::Log;
use crate::resources::helpers::fs::lexists;

const GLOB_META: [char; 3] = ['*', '?', '['];

/// Hidden entries only match a pattern component that starts with a dot.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// The existing paths that `pattern` names.
///
/// A pattern without metacharacters is checked directly so that broken
/// symlinks still match. Unreadable entries are reported as warnings.
#[must_use]
pub fn expand(pattern: &str, log: &dyn Log) -> Vec<PathBuf> {
    if !pattern.contains(GLOB_META) {
        let path = PathBuf::from(pattern);
        return if lexists(&path) { vec![path] } else { Vec::new() };
    }
    let paths = match glob::glob_with(pattern, MATCH_OPTIONS) {
        Ok(paths) => paths,
        Err(e) => {
            log.warn(&format!("invalid glob pattern '{pattern}': {e}"));
            return Vec::new();
        }
    };
    paths
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                log.warn(&format!("failed to expand '{pattern}': {e}"));
                None
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::logging::MemoryLog;

    #[test]
    fn literal_path_matches_broken_symlink() {
        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join("dangling");
        std::os::unix::fs::symlink("/nonexistent", &link).unwrap();
        let log = MemoryLog::new();

        let paths = expand(&link.display().to_string(), &log);

        assert_eq!(paths, [link]);
    }

    #[test]
    fn literal_missing_path_matches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let log = MemoryLog::new();
        let paths = expand(&dir.path().join("missing").display().to_string(), &log);
        assert!(paths.is_empty());
    }

    #[test]
    fn star_matches_within_one_component() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.log"), "").unwrap();
        std::fs::write(dir.path().join("b.log"), "").unwrap();
        std::fs::write(dir.path().join(".hidden.log"), "").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub/c.log"), "").unwrap();
        let log = MemoryLog::new();

        let pattern = format!("{}/*.log", dir.path().display());
        let mut paths = expand(&pattern, &log);
        paths.sort();

        assert_eq!(paths, [dir.path().join("a.log"), dir.path().join("b.log")]);
    }

    #[test]
    fn pattern_without_matches_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = MemoryLog::new();
        let pattern = format!("{}/nothing-*", dir.path().display());
        assert!(expand(&pattern, &log).is_empty());
    }
}

//! Filtering, ordering and grouping of parsed directives.
use std::path::{Path, PathBuf};

use crate::config::directive::{Action, Directive};

/// Prefix selection from `--prefix` / `--exclude-prefix`.
///
/// Matching is per path component, so `/run` selects `/run/x` but not
/// `/running`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathFilter {
    /// Only paths below this prefix are kept.
    pub prefix: PathBuf,
    /// Paths below any of these are dropped.
    pub excludes: Vec<PathBuf>,
}

impl Default for PathFilter {
    fn default() -> Self {
        Self {
            prefix: PathBuf::from("/"),
            excludes: Vec::new(),
        }
    }
}

impl PathFilter {
    /// Whether `path` passes the filter.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use tmpfiles_cli::processing::plan::PathFilter;
    ///
    /// let filter = PathFilter {
    ///     prefix: PathBuf::from("/run"),
    ///     excludes: vec![PathBuf::from("/run/user")],
    /// };
    /// assert!(filter.matches("/run/lock"));
    /// assert!(!filter.matches("/running"));
    /// assert!(!filter.matches("/run/user/1000"));
    /// ```
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        let path = Path::new(path);
        path.starts_with(&self.prefix) && !self.excludes.iter().any(|ex| path.starts_with(ex))
    }
}

/// Every action that targets one path, in canonical kind order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathGroup {
    /// Resolved path or glob pattern.
    pub path: String,
    /// Actions for the path.
    pub actions: Vec<Action>,
}

/// Drop filtered directives, sort by path, and group equal paths.
///
/// Paths are compared as strings, so a parent sorts before its children.
/// Within a group, actions are ordered by kind; the sort is stable, so two
/// directives of the same kind (or a kind and its deprecated alias) keep
/// their file order.
#[must_use]
pub fn build(directives: Vec<Directive>, filter: &PathFilter) -> Vec<PathGroup> {
    let mut kept: Vec<Directive> = directives
        .into_iter()
        .filter(|d| filter.matches(&d.path))
        .collect();
    kept.sort_by(|a, b| a.path.cmp(&b.path));

    let mut groups: Vec<PathGroup> = Vec::new();
    for directive in kept {
        match groups.last_mut() {
            Some(group) if group.path == directive.path => group.actions.push(directive.action),
            _ => groups.push(PathGroup {
                path: directive.path,
                actions: vec![directive.action],
            }),
        }
    }
    for group in &mut groups {
        group.actions.sort_by_key(|action| action.kind.canonical());
    }
    groups
}

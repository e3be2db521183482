//! Locating, reading and parsing directive files.
pub mod directive;
pub mod parser;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::specifier::SpecifierTable;
use directive::Directive;

/// Directive directories, highest precedence first.
pub const TMPFILES_DIRS: [&str; 3] = ["/etc/tmpfiles.d", "/run/tmpfiles.d", "/usr/lib/tmpfiles.d"];

/// Suffix of directive files.
pub const CONFIG_SUFFIX: &str = ".conf";

/// A located directive file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// File name; the sort and de-duplication key.
    pub name: String,
}

impl ConfigEntry {
    /// Build an entry for an explicitly named file.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
        Self {
            path: path.to_path_buf(),
            name,
        }
    }
}

/// The default directive directories as paths.
#[must_use]
pub fn default_dirs() -> Vec<PathBuf> {
    TMPFILES_DIRS.iter().map(PathBuf::from).collect()
}

/// List directive files across `dirs` (highest precedence first).
///
/// The first directory in which a file name appears wins. The result is
/// sorted by file name only. Missing directories are skipped.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if a directory exists but cannot be listed.
pub fn locate(dirs: &[PathBuf]) -> Result<Vec<ConfigEntry>, ConfigError> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    for dir in dirs {
        let listing = match std::fs::read_dir(dir) {
            Ok(listing) => listing,
            Err(e)
                if matches!(
                    e.kind(),
                    std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory
                ) =>
            {
                continue;
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: dir.clone(),
                    source,
                });
            }
        };
        for item in listing {
            let item = item.map_err(|source| ConfigError::Io {
                path: dir.clone(),
                source,
            })?;
            let name = item.file_name().to_string_lossy().into_owned();
            if !name.ends_with(CONFIG_SUFFIX) || !seen.insert(name.clone()) {
                continue;
            }
            entries.push(ConfigEntry {
                path: item.path(),
                name,
            });
        }
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Parse every directive of one file's contents.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] for the first line that fails to parse.
pub fn parse_config(
    path: &Path,
    content: &str,
    specifiers: &SpecifierTable,
) -> Result<Vec<Directive>, ConfigError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| parser::is_directive_line(line))
        .map(|(idx, line)| {
            parser::parse_line(line, specifiers).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                line: idx + 1,
                source,
            })
        })
        .collect()
}

/// Read and parse all `entries` in order, merging their directives.
///
/// Everything is parsed before anything is applied, so one bad line aborts
/// the run without side effects.
///
/// # Errors
///
/// Returns the first read or parse error.
pub fn load(
    entries: &[ConfigEntry],
    specifiers: &SpecifierTable,
) -> Result<Vec<Directive>, ConfigError> {
    let mut directives = Vec::new();
    for entry in entries {
        let content = std::fs::read_to_string(&entry.path).map_err(|source| ConfigError::Io {
            path: entry.path.clone(),
            source,
        })?;
        directives.extend(parse_config(&entry.path, &content, specifiers)?);
    }
    Ok(directives)
}

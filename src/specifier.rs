//! `%x` specifier table and path substitution.
//!
//! The table is computed once at startup by [`SpecifierTable::detect`] and
//! then only read. It is passed explicitly to the parser.
use std::collections::BTreeMap;
use std::path::Path;

use nix::unistd::{Group, User, getgid, getuid};

use crate::error::ParseError;

/// Kernel boot id (with dashes).
pub const BOOT_ID_FILE: &str = "/proc/sys/kernel/random/boot_id";
/// Machine id written at install time.
pub const MACHINE_ID_FILE: &str = "/etc/machine-id";
/// Value of `%h`, independent of the invoking user.
pub const ROOT_HOME: &str = "/root";

/// Immutable mapping from specifier character to its runtime value.
///
/// # Examples
///
/// ```
/// use tmpfiles_cli::specifier::SpecifierTable;
///
/// let table = SpecifierTable::from_entries([('h', "/root"), ('%', "%")]);
/// assert_eq!(table.resolve("%h/.cache").unwrap(), "/root/.cache");
/// assert_eq!(table.resolve("/run/100%%").unwrap(), "/run/100%");
/// assert!(table.resolve("/run/%Q").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecifierTable {
    values: BTreeMap<char, String>,
}

impl SpecifierTable {
    /// Build a table from explicit entries.
    #[must_use]
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (char, S)>,
        S: Into<String>,
    {
        Self {
            values: entries.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }

    /// Compute the table for the running process.
    ///
    /// The boot id and machine id are read from [`BOOT_ID_FILE`] and
    /// [`MACHINE_ID_FILE`]; when a file is unreadable the key is left out,
    /// so only paths that actually use `%b` / `%m` fail.
    ///
    /// # Errors
    ///
    /// Returns an error if `uname(2)` fails or the current uid/gid has no
    /// passwd/group entry.
    pub fn detect() -> anyhow::Result<Self> {
        let uts = nix::sys::utsname::uname()?;
        let arch = uts.machine().to_string_lossy().replace('_', "-");
        let hostname = uts.nodename().to_string_lossy().into_owned();
        let short_hostname = short_hostname(&hostname).to_string();
        let release = uts.release().to_string_lossy().into_owned();

        let uid = getuid();
        let gid = getgid();
        let user = User::from_uid(uid)?
            .ok_or_else(|| anyhow::anyhow!("no passwd entry for uid {uid}"))?;
        let group = Group::from_gid(gid)?
            .ok_or_else(|| anyhow::anyhow!("no group entry for gid {gid}"))?;

        let mut entries: Vec<(char, String)> = vec![
            ('a', arch),
            ('C', "/var/cache".to_string()),
            ('g', group.name),
            ('G', gid.as_raw().to_string()),
            ('h', ROOT_HOME.to_string()),
            ('H', hostname),
            ('l', short_hostname),
            ('L', "/var/log".to_string()),
            ('S', "/var/lib".to_string()),
            ('t', "/run".to_string()),
            ('T', std::env::temp_dir().to_string_lossy().into_owned()),
            ('u', user.name),
            ('U', uid.as_raw().to_string()),
            ('v', release),
            ('V', "/var/run".to_string()),
            ('%', "%".to_string()),
        ];
        if let Some(boot_id) = read_id(Path::new(BOOT_ID_FILE)) {
            entries.push(('b', boot_id.replace('-', "")));
        }
        if let Some(machine_id) = read_id(Path::new(MACHINE_ID_FILE)) {
            entries.push(('m', machine_id));
        }
        Ok(Self::from_entries(entries))
    }

    /// Look up a single specifier.
    #[must_use]
    pub fn get(&self, specifier: char) -> Option<&str> {
        self.values.get(&specifier).map(String::as_str)
    }

    /// Substitute every `%x` token in `path`.
    ///
    /// Only `%` followed by an ASCII letter or another `%` is a token; any
    /// other `%` is copied through unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnknownSpecifier`] for a token whose character
    /// is not in the table.
    pub fn resolve(&self, path: &str) -> Result<String, ParseError> {
        if !path.contains('%') {
            return Ok(path.to_string());
        }

        let mut out = String::with_capacity(path.len());
        let mut chars = path.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '%' {
                out.push(c);
                continue;
            }
            match chars.peek().copied() {
                Some(spec) if spec.is_ascii_alphabetic() || spec == '%' => {
                    chars.next();
                    let value = self.get(spec).ok_or_else(|| ParseError::UnknownSpecifier {
                        specifier: spec,
                        path: path.to_string(),
                    })?;
                    out.push_str(value);
                }
                _ => out.push('%'),
            }
        }
        Ok(out)
    }
}

/// Host name up to the first dot.
fn short_hostname(hostname: &str) -> &str {
    hostname.split('.').next().unwrap_or(hostname)
}

fn read_id(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let id = content.trim();
    (!id.is_empty()).then(|| id.to_string())
}

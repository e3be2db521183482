//! Directive data model: action kinds, modes, arguments.
use std::fmt;
use std::path::PathBuf;

/// One of the tmpfiles action types.
///
/// The declaration order is the canonical order in which actions on the same
/// path are applied: creation of files, directories, links and nodes comes
/// before any action that adjusts an existing object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActionKind {
    /// `f`: create file if absent.
    CreateFile,
    /// `f+`: create or truncate file.
    TruncateFile,
    /// `F`: deprecated alias of `f+`.
    TruncateFileLegacy,
    /// `w`: overwrite existing file.
    WriteFile,
    /// `w+`: append to existing file.
    AppendFile,
    /// `d`: create directory.
    CreateDir,
    /// `D`: create directory (removed on `--remove`).
    CreateRemovableDir,
    /// `e`: adjust existing directory.
    AdjustDir,
    /// `v`: create subvolume (plain directory here).
    Subvolume,
    /// `q`: create subvolume with quota group (plain directory here).
    SubvolumeQuota,
    /// `Q`: create subvolume with own quota group (plain directory here).
    SubvolumeOwnQuota,
    /// `L`: create symlink if absent.
    Symlink,
    /// `L+`: replace whatever is at the path with a symlink.
    ForceSymlink,
    /// `c`: create character device node.
    CharDevice,
    /// `C`: copy from source or factory tree.
    Copy,
    /// `x`: ignore path and contents during cleanup.
    IgnoreRecursive,
    /// `X`: ignore path during cleanup.
    Ignore,
    /// `r`: remove file or empty directory.
    Remove,
    /// `R`: remove recursively.
    RemoveRecursive,
    /// `z`: adjust mode and ownership.
    Adjust,
    /// `m`: deprecated alias of `z`.
    AdjustLegacy,
    /// `Z`: adjust mode and ownership recursively.
    AdjustRecursive,
    /// `h`: set file attributes.
    Attributes,
    /// `H`: set file attributes recursively.
    AttributesRecursive,
    /// `a`: replace POSIX ACLs.
    Acl,
    /// `a+`: append POSIX ACLs.
    AclAppend,
    /// `A`: replace POSIX ACLs recursively.
    AclRecursive,
    /// `A+`: append POSIX ACLs recursively.
    AclAppendRecursive,
}

/// How the argument field of a directive is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    /// Free text (file content), or unused.
    Text,
    /// Symlink target (required).
    LinkTarget,
    /// Copy source (optional).
    CopySource,
    /// `MAJOR:MINOR` (required).
    Device,
    /// `chattr` attribute string (required).
    Attributes,
    /// `setfacl` ACL specification (required).
    Acl,
}

impl ActionKind {
    /// Every kind, in canonical order.
    pub const ALL: [Self; 28] = [
        Self::CreateFile,
        Self::TruncateFile,
        Self::TruncateFileLegacy,
        Self::WriteFile,
        Self::AppendFile,
        Self::CreateDir,
        Self::CreateRemovableDir,
        Self::AdjustDir,
        Self::Subvolume,
        Self::SubvolumeQuota,
        Self::SubvolumeOwnQuota,
        Self::Symlink,
        Self::ForceSymlink,
        Self::CharDevice,
        Self::Copy,
        Self::IgnoreRecursive,
        Self::Ignore,
        Self::Remove,
        Self::RemoveRecursive,
        Self::Adjust,
        Self::AdjustLegacy,
        Self::AdjustRecursive,
        Self::Attributes,
        Self::AttributesRecursive,
        Self::Acl,
        Self::AclAppend,
        Self::AclRecursive,
        Self::AclAppendRecursive,
    ];

    /// The kind that decides this kind's place in the canonical order.
    ///
    /// Deprecated aliases rank with the kind they stand for, so `F` and `f+`
    /// (or `m` and `z`) on one path keep their file order.
    #[must_use]
    pub const fn canonical(self) -> Self {
        match self {
            Self::TruncateFileLegacy => Self::TruncateFile,
            Self::AdjustLegacy => Self::Adjust,
            other => other,
        }
    }

    /// The type code as written in directive files.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::CreateFile => "f",
            Self::TruncateFile => "f+",
            Self::TruncateFileLegacy => "F",
            Self::WriteFile => "w",
            Self::AppendFile => "w+",
            Self::CreateDir => "d",
            Self::CreateRemovableDir => "D",
            Self::AdjustDir => "e",
            Self::Subvolume => "v",
            Self::SubvolumeQuota => "q",
            Self::SubvolumeOwnQuota => "Q",
            Self::Symlink => "L",
            Self::ForceSymlink => "L+",
            Self::CharDevice => "c",
            Self::Copy => "C",
            Self::IgnoreRecursive => "x",
            Self::Ignore => "X",
            Self::Remove => "r",
            Self::RemoveRecursive => "R",
            Self::Adjust => "z",
            Self::AdjustLegacy => "m",
            Self::AdjustRecursive => "Z",
            Self::Attributes => "h",
            Self::AttributesRecursive => "H",
            Self::Acl => "a",
            Self::AclAppend => "a+",
            Self::AclRecursive => "A",
            Self::AclAppendRecursive => "A+",
        }
    }

    /// Look up a type code with modifiers already stripped.
    ///
    /// # Examples
    ///
    /// ```
    /// use tmpfiles_cli::config::directive::ActionKind;
    ///
    /// assert_eq!(ActionKind::from_code("L+"), Some(ActionKind::ForceSymlink));
    /// assert_eq!(ActionKind::from_code("y"), None);
    /// ```
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    /// Whether the path is a glob pattern expanded at apply time.
    #[must_use]
    pub const fn expands_glob(self) -> bool {
        matches!(
            self,
            Self::WriteFile
                | Self::AppendFile
                | Self::AdjustDir
                | Self::IgnoreRecursive
                | Self::Ignore
                | Self::Remove
                | Self::RemoveRecursive
                | Self::Adjust
                | Self::AdjustLegacy
                | Self::AdjustRecursive
                | Self::Attributes
                | Self::AttributesRecursive
                | Self::Acl
                | Self::AclAppend
                | Self::AclRecursive
                | Self::AclAppendRecursive
        )
    }

    /// How the argument field is interpreted for this kind.
    #[must_use]
    pub const fn argument_kind(self) -> ArgumentKind {
        match self {
            Self::Symlink | Self::ForceSymlink => ArgumentKind::LinkTarget,
            Self::Copy => ArgumentKind::CopySource,
            Self::CharDevice => ArgumentKind::Device,
            Self::Attributes | Self::AttributesRecursive => ArgumentKind::Attributes,
            Self::Acl | Self::AclAppend | Self::AclRecursive | Self::AclAppendRecursive => {
                ArgumentKind::Acl
            }
            _ => ArgumentKind::Text,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Permission bits from the mode field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mode {
    /// `~` prefix: intersect with the existing bits instead of replacing them.
    pub masked: bool,
    /// Octal permission bits (`0..=0o7777`).
    pub bits: u32,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.masked {
            write!(f, "~{:04o}", self.bits)
        } else {
            write!(f, "{:04o}", self.bits)
        }
    }
}

/// Type-prefix modifiers (`!`, `-`, `=`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// `!`: only safe to apply at boot.
    pub boot_only: bool,
    /// `-`: failure to apply is not an error.
    pub ignore_errors: bool,
    /// `=`: remove objects of the wrong type before creating.
    pub remove_mismatched: bool,
}

/// Device number of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceNumber {
    /// Major number.
    pub major: u32,
    /// Minor number.
    pub minor: u32,
}

/// The interpreted argument field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    /// Field unset (`-` or missing).
    Absent,
    /// Free text, e.g. file content.
    Text(String),
    /// Where a symlink points.
    LinkTarget(PathBuf),
    /// Explicit copy source.
    CopySource(PathBuf),
    /// `MAJOR:MINOR`.
    Device(DeviceNumber),
    /// Attribute string with an explicit `+`, `-` or `=` operator.
    Attributes(String),
    /// ACL specification.
    Acl(String),
}

impl Argument {
    /// Text content, or the empty string when absent.
    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            Self::Text(s) | Self::Attributes(s) | Self::Acl(s) => s,
            _ => "",
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("-"),
            Self::Text(s) | Self::Attributes(s) | Self::Acl(s) => f.write_str(s),
            Self::LinkTarget(p) | Self::CopySource(p) => write!(f, "{}", p.display()),
            Self::Device(dev) => write!(f, "{}:{}", dev.major, dev.minor),
        }
    }
}

/// A parsed action. Stateless once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// Which action to perform.
    pub kind: ActionKind,
    /// Type-prefix modifiers.
    pub modifiers: Modifiers,
    /// Requested permission bits.
    pub mode: Option<Mode>,
    /// Requested owner.
    pub uid: Option<u32>,
    /// Requested group.
    pub gid: Option<u32>,
    /// Cleanup age. Kept for display only; cleanup is not implemented.
    pub age: Option<String>,
    /// Interpreted argument field.
    pub argument: Argument,
}

impl Action {
    /// An action of `kind` with every field unset.
    #[must_use]
    pub const fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            modifiers: Modifiers {
                boot_only: false,
                ignore_errors: false,
                remove_mismatched: false,
            },
            mode: None,
            uid: None,
            gid: None,
            age: None,
            argument: Argument::Absent,
        }
    }
}

/// Renders the action as a tmpfiles line without its path.
impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn or_dash<T: fmt::Display>(v: Option<&T>) -> String {
            v.map_or_else(|| "-".to_string(), ToString::to_string)
        }

        let mut prefix = String::new();
        if self.modifiers.boot_only {
            prefix.push('!');
        }
        if self.modifiers.ignore_errors {
            prefix.push('-');
        }
        if self.modifiers.remove_mismatched {
            prefix.push('=');
        }
        write!(
            f,
            "{}{} {} {} {} {} {}",
            self.kind,
            prefix,
            or_dash(self.mode.as_ref()),
            or_dash(self.uid.as_ref()),
            or_dash(self.gid.as_ref()),
            or_dash(self.age.as_ref()),
            self.argument
        )
    }
}

/// A resolved absolute path (or glob pattern) with the action to apply there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Target path, specifiers already substituted.
    pub path: String,
    /// What to do there.
    pub action: Action,
}

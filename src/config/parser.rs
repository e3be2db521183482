//! Directive line parsing.
//!
//! A line is `TYPE PATH [MODE] [USER] [GROUP] [AGE] [ARG...]`. The first six
//! fields are whitespace-delimited; `ARG` takes the rest of the line. A field
//! that is missing or written as `-` is unset.
use std::path::{Path, PathBuf};

use nix::unistd::{Group, User};

use super::directive::{
    Action, ActionKind, Argument, ArgumentKind, DeviceNumber, Directive, Mode, Modifiers,
};
use crate::error::ParseError;
use crate::specifier::SpecifierTable;

/// Field placeholder meaning "unset".
const UNSET: &str = "-";

/// Whether a line carries a directive (not blank, not a comment).
#[must_use]
pub fn is_directive_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && !trimmed.starts_with('#')
}

/// Parse one directive line into a resolved [`Directive`].
///
/// Must not be called on blank or comment lines (see [`is_directive_line`]).
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first invalid field.
///
/// # Examples
///
/// ```
/// use tmpfiles_cli::config::directive::ActionKind;
/// use tmpfiles_cli::config::parser::parse_line;
/// use tmpfiles_cli::specifier::SpecifierTable;
///
/// let table = SpecifierTable::from_entries([('t', "/run")]);
/// let directive = parse_line("d %t/app 0750 0 0 -", &table).unwrap();
/// assert_eq!(directive.path, "/run/app");
/// assert_eq!(directive.action.kind, ActionKind::CreateDir);
/// ```
pub fn parse_line(line: &str, specifiers: &SpecifierTable) -> Result<Directive, ParseError> {
    let [typ, path, mode, user, group, age, arg] = split_fields(line.trim());
    let typ = typ.unwrap_or_default();

    let path = path.ok_or(ParseError::MissingPath)?;
    let path = specifiers.resolve(path)?;
    if !Path::new(&path).is_absolute() {
        return Err(ParseError::RelativePath(path));
    }

    let modifiers = Modifiers {
        boot_only: typ.contains('!'),
        ignore_errors: typ.contains('-'),
        remove_mismatched: typ.contains('='),
    };
    let code = typ.trim_matches(['!', '-', '=']);
    let kind = ActionKind::from_code(code).ok_or_else(|| ParseError::UnknownType(code.to_string()))?;

    if kind.expands_glob() {
        glob::Pattern::new(&path).map_err(|e| ParseError::InvalidGlob {
            pattern: path.clone(),
            message: e.msg.to_string(),
        })?;
    }

    let action = Action {
        kind,
        modifiers,
        mode: unset_or(mode).map(parse_mode).transpose()?,
        uid: unset_or(user).map(parse_user).transpose()?,
        gid: unset_or(group).map(parse_group).transpose()?,
        age: unset_or(age).map(str::to_string),
        argument: parse_argument(kind.argument_kind(), unset_or(arg))?,
    };
    Ok(Directive { path, action })
}

/// Split a trimmed line into seven optional fields, the last one taking the
/// remainder of the line verbatim.
fn split_fields(line: &str) -> [Option<&str>; 7] {
    let mut fields = [None; 7];
    let mut rest = line;
    for field in fields.iter_mut().take(6) {
        rest = rest.trim_start();
        if rest.is_empty() {
            return fields;
        }
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let (token, tail) = rest.split_at(end);
        *field = Some(token);
        rest = tail;
    }
    let rest = rest.trim_start();
    if let Some(last) = fields.last_mut()
        && !rest.is_empty()
    {
        *last = Some(rest);
    }
    fields
}

fn unset_or(field: Option<&str>) -> Option<&str> {
    field.filter(|f| *f != UNSET)
}

/// Parse `[~]OCTAL`.
fn parse_mode(s: &str) -> Result<Mode, ParseError> {
    let (masked, digits) = s.strip_prefix('~').map_or((false, s), |rest| (true, rest));
    let bits = u32::from_str_radix(digits, 8).map_err(|_| ParseError::InvalidMode(s.to_string()))?;
    if bits > 0o7777 {
        return Err(ParseError::InvalidMode(s.to_string()));
    }
    Ok(Mode { masked, bits })
}

fn parse_user(s: &str) -> Result<u32, ParseError> {
    if let Ok(uid) = s.parse::<u32>() {
        return Ok(uid);
    }
    match User::from_name(s) {
        Ok(Some(user)) => Ok(user.uid.as_raw()),
        _ => Err(ParseError::UnknownUser(s.to_string())),
    }
}

fn parse_group(s: &str) -> Result<u32, ParseError> {
    if let Ok(gid) = s.parse::<u32>() {
        return Ok(gid);
    }
    match Group::from_name(s) {
        Ok(Some(group)) => Ok(group.gid.as_raw()),
        _ => Err(ParseError::UnknownGroup(s.to_string())),
    }
}

fn parse_argument(kind: ArgumentKind, arg: Option<&str>) -> Result<Argument, ParseError> {
    match kind {
        ArgumentKind::Text => Ok(arg.map_or(Argument::Absent, |s| Argument::Text(s.to_string()))),
        ArgumentKind::LinkTarget => arg
            .map(|s| Argument::LinkTarget(PathBuf::from(s)))
            .ok_or(ParseError::MissingSymlinkTarget),
        ArgumentKind::CopySource => {
            Ok(arg.map_or(Argument::Absent, |s| Argument::CopySource(PathBuf::from(s))))
        }
        ArgumentKind::Device => parse_device(arg).map(Argument::Device),
        ArgumentKind::Attributes => parse_attributes(arg).map(Argument::Attributes),
        ArgumentKind::Acl => match arg {
            Some(s) if !s.is_empty() => Ok(Argument::Acl(s.to_string())),
            _ => Err(ParseError::EmptyArgument { field: "file ACLs" }),
        },
    }
}

/// Attribute strings default to the `+` (add) operator.
fn parse_attributes(arg: Option<&str>) -> Result<String, ParseError> {
    let s = arg
        .filter(|s| !s.is_empty())
        .ok_or(ParseError::EmptyArgument {
            field: "file attributes",
        })?;
    if s.starts_with(['+', '-', '=']) {
        Ok(s.to_string())
    } else {
        Ok(format!("+{s}"))
    }
}

fn parse_device(arg: Option<&str>) -> Result<DeviceNumber, ParseError> {
    let s = arg.ok_or(ParseError::EmptyArgument {
        field: "major:minor",
    })?;
    let invalid = |reason| ParseError::InvalidDevice {
        value: s.to_string(),
        reason,
    };
    let parts: Vec<&str> = s.split(':').collect();
    let [major, minor] = parts.as_slice() else {
        return Err(invalid("major:minor must have 2 parts"));
    };
    let major = major
        .trim()
        .parse()
        .map_err(|_| invalid("major:minor must be integers"))?;
    let minor = minor
        .trim()
        .parse()
        .map_err(|_| invalid("major:minor must be integers"))?;
    Ok(DeviceNumber { major, minor })
}

//! Ordered application of grouped actions.
pub mod context;
pub mod expand;
pub mod plan;

use std::path::PathBuf;

use crate::resources::{ActionResource, Applicable, ResourceChange};
use context::Context;
use plan::PathGroup;

/// Counters for processing actions.
///
/// # Examples
///
/// ```
/// use tmpfiles_cli::processing::ApplyStats;
///
/// let stats = ApplyStats { changed: 1, already_ok: 2, skipped: 3, failed: 0 };
/// assert_eq!(stats.summary(false), "1 changed, 2 already ok, 3 skipped");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ApplyStats {
    /// Number of actions that changed something.
    pub changed: u32,
    /// Number of actions whose object already existed.
    pub already_ok: u32,
    /// Number of actions that had nothing to do or were downgraded.
    pub skipped: u32,
    /// Number of actions that failed.
    pub failed: u32,
}

impl ApplyStats {
    /// Format the summary string (e.g. "3 changed, 10 already ok, 1 failed").
    ///
    /// # Examples
    ///
    /// ```
    /// use tmpfiles_cli::processing::ApplyStats;
    ///
    /// let stats = ApplyStats { changed: 5, already_ok: 12, skipped: 0, failed: 1 };
    /// assert_eq!(stats.summary(false), "5 changed, 12 already ok, 1 failed");
    /// assert_eq!(stats.summary(true), "5 would change, 12 already ok, 1 failed");
    /// ```
    #[must_use]
    pub fn summary(&self, dry_run: bool) -> String {
        let verb = if dry_run { "would change" } else { "changed" };
        let mut out = format!("{} {verb}, {} already ok", self.changed, self.already_ok);
        if self.skipped > 0 {
            out.push_str(&format!(", {} skipped", self.skipped));
        }
        if self.failed > 0 {
            out.push_str(&format!(", {} failed", self.failed));
        }
        out
    }
}

impl std::ops::AddAssign for ApplyStats {
    fn add_assign(&mut self, rhs: Self) {
        self.changed += rhs.changed;
        self.already_ok += rhs.already_ok;
        self.skipped += rhs.skipped;
        self.failed += rhs.failed;
    }
}

/// Apply every group in order.
///
/// A failing action is logged and counted; it never stops the run.
#[must_use]
pub fn apply_groups(groups: &[PathGroup], ctx: &Context) -> ApplyStats {
    let mut stats = ApplyStats::default();
    for group in groups {
        stats += apply_group(group, ctx);
    }
    stats
}

fn apply_group(group: &PathGroup, ctx: &Context) -> ApplyStats {
    let mut stats = ApplyStats::default();
    if ctx.dry_run {
        ctx.log.info(&format!(">>> {}", group.path));
    } else {
        ctx.log.debug(&format!(">>> {}", group.path));
    }
    for action in &group.actions {
        if ctx.dry_run {
            ctx.log.dry_run(&action.to_string());
            stats.changed += 1;
            continue;
        }
        let paths = if action.kind.expands_glob() {
            expand::expand(&group.path, ctx.log.as_ref())
        } else {
            vec![PathBuf::from(&group.path)]
        };
        for path in paths {
            stats += apply_one(&ActionResource::new(action, path, ctx), ctx);
        }
    }
    stats
}

fn apply_one(resource: &ActionResource<'_>, ctx: &Context) -> ApplyStats {
    let desc = resource.description();
    let mut delta = ApplyStats::default();
    match resource.apply() {
        Ok(ResourceChange::Applied) => {
            ctx.log.debug(&format!("applied: {desc}"));
            delta.changed += 1;
        }
        Ok(ResourceChange::AlreadyCorrect) => {
            ctx.log.debug(&format!("ok: {desc}"));
            delta.already_ok += 1;
        }
        Ok(ResourceChange::Skipped { reason }) => {
            ctx.log.debug(&format!("skipped {desc}: {reason}"));
            delta.skipped += 1;
        }
        Err(e) if resource.action.modifiers.ignore_errors => {
            ctx.log.warn(&format!("ignoring failure of {desc}: {e:#}"));
            delta.skipped += 1;
        }
        Err(e) => {
            ctx.log.error(&format!("failed to apply {desc}: {e:#}"));
            delta.failed += 1;
        }
    }
    delta
}

//! The `--create` phase: locate, parse, order and apply.
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::cli::Cli;
use crate::config::{self, ConfigEntry};
use crate::exec::Executor;
use crate::logging::Log;
use crate::processing::context::Context;
use crate::processing::plan::{self, PathFilter};
use crate::processing::{self, ApplyStats};
use crate::specifier::SpecifierTable;

/// Factory tree mirrored by `C` when a directive names no source.
pub const FACTORY_DIR: &str = "/usr/share/factory";

/// Inputs of one creation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOptions {
    /// Directories to search, highest precedence first.
    pub config_dirs: Vec<PathBuf>,
    /// Explicit directive files; when non-empty, no search happens.
    pub configs: Vec<PathBuf>,
    /// Which resolved paths are processed.
    pub filter: PathFilter,
    /// Root of the factory tree.
    pub factory_dir: PathBuf,
    /// Describe instead of apply.
    pub dry_run: bool,
}

impl Default for CreateOptions {
    fn default() -> Self {
        Self {
            config_dirs: config::default_dirs(),
            configs: Vec::new(),
            filter: PathFilter::default(),
            factory_dir: PathBuf::from(FACTORY_DIR),
            dry_run: false,
        }
    }
}

impl CreateOptions {
    /// Options selected on the command line.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        let config_dirs = if cli.config_dirs.is_empty() {
            config::default_dirs()
        } else {
            cli.config_dirs.clone()
        };
        Self {
            config_dirs,
            configs: cli.configs.clone(),
            filter: PathFilter {
                prefix: cli.prefix.clone(),
                excludes: cli.exclude_prefixes.clone(),
            },
            factory_dir: PathBuf::from(FACTORY_DIR),
            dry_run: cli.dry_run,
        }
    }
}

/// Run the creation phase and return its statistics.
///
/// Every file is parsed before the first action is applied. Failing
/// actions are counted in [`ApplyStats::failed`] rather than returned as
/// errors.
///
/// # Errors
///
/// Returns an error if a directive directory or file cannot be read, or a
/// directive line fails to parse.
pub fn run(
    opts: &CreateOptions,
    specifiers: &SpecifierTable,
    executor: Arc<dyn Executor>,
    log: Arc<dyn Log>,
) -> Result<ApplyStats> {
    log.stage("Locating configuration");
    let entries = if opts.configs.is_empty() {
        config::locate(&opts.config_dirs)?
    } else {
        opts.configs
            .iter()
            .map(|path| ConfigEntry::from_path(path))
            .collect()
    };
    for entry in &entries {
        log.debug(&format!("config: {}", entry.path.display()));
    }
    log.info(&format!("{} config file(s)", entries.len()));

    log.stage("Parsing directives");
    let directives = config::load(&entries, specifiers)?;
    let total = directives.len();
    let groups = plan::build(directives, &opts.filter);
    log.info(&format!(
        "{total} directive(s), {} path(s) selected",
        groups.len()
    ));

    log.stage(if opts.dry_run {
        "Planning actions"
    } else {
        "Applying actions"
    });
    let ctx = Context::new(executor, Arc::clone(&log), opts.factory_dir.clone(), opts.dry_run);
    let stats = processing::apply_groups(&groups, &ctx);
    log.info(&stats.summary(opts.dry_run));
    Ok(stats)
}

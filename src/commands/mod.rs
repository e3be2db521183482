//! Phase selection and orchestration.
pub mod create;

use std::sync::Arc;

use anyhow::Result;

use crate::cli::Cli;
use crate::error::CommandError;
use crate::exec::SystemExecutor;
use crate::logging::Logger;
use crate::specifier::SpecifierTable;

/// Reject phase selections that cannot run.
///
/// `--remove` and `--clean` are refused even together with `--create`, so
/// nothing is read or changed.
///
/// # Errors
///
/// Returns [`CommandError::Unimplemented`] for `--remove` / `--clean` and
/// [`CommandError::NoPhase`] when no phase is selected.
pub const fn check_phases(cli: &Cli) -> Result<(), CommandError> {
    if cli.remove {
        return Err(CommandError::Unimplemented("remove"));
    }
    if cli.clean {
        return Err(CommandError::Unimplemented("clean"));
    }
    if !cli.create {
        return Err(CommandError::NoPhase);
    }
    Ok(())
}

/// Run the selected phases against the real system.
///
/// # Errors
///
/// Returns an error for an unsupported phase selection, an unreadable or
/// malformed directive file, or if any action failed to apply.
pub fn run(cli: &Cli) -> Result<()> {
    check_phases(cli)?;

    let log = Arc::new(Logger::new());
    let version = option_env!("TMPFILES_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    log.debug(&format!("tmpfiles {version}"));
    let specifiers = SpecifierTable::detect()?;
    let opts = create::CreateOptions::from_cli(cli);
    let stats = create::run(&opts, &specifiers, Arc::new(SystemExecutor), log.clone())?;

    if log.warning_count() > 0 {
        log.debug(&format!("{} warning(s) reported", log.warning_count()));
    }
    if stats.failed > 0 {
        anyhow::bail!("{} action(s) failed", stats.failed);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("tmpfiles").chain(args.iter().copied()))
    }

    #[test]
    fn create_is_accepted() {
        assert!(check_phases(&cli(&["--create"])).is_ok());
    }

    #[test]
    fn no_phase_is_rejected() {
        let err = check_phases(&cli(&[])).unwrap_err();
        assert!(matches!(err, CommandError::NoPhase));
        assert!(err.to_string().contains("--create"));
    }

    #[test]
    fn remove_is_rejected_even_with_create() {
        let err = check_phases(&cli(&["--create", "--remove"])).unwrap_err();
        assert!(matches!(err, CommandError::Unimplemented("remove")));
    }

    #[test]
    fn clean_is_rejected() {
        let err = check_phases(&cli(&["--clean"])).unwrap_err();
        assert_eq!(err.to_string(), "--clean is not implemented");
    }

    #[test]
    fn run_rejects_remove_before_reading_config() {
        let err = run(&cli(&["--remove", "--config-dir", "/nonexistent"])).unwrap_err();
        assert!(err.downcast_ref::<CommandError>().is_some());
    }
}

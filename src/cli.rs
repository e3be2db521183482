use clap::Parser;
use std::path::PathBuf;

/// Top-level CLI entry point for the tmpfiles engine.
#[derive(Parser, Debug)]
#[command(
    name = "tmpfiles",
    about = "Create files, directories, links and device nodes from tmpfiles.d directives",
    version
)]
pub struct Cli {
    /// Create and adjust files and directories
    #[arg(long)]
    pub create: bool,

    /// Remove directories marked for removal (not implemented)
    #[arg(long)]
    pub remove: bool,

    /// Clean up aged files (not implemented)
    #[arg(long)]
    pub clean: bool,

    /// Print what would be done without changing anything
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Only apply directives for paths below this prefix
    #[arg(long, value_name = "PATH", default_value = "/")]
    pub prefix: PathBuf,

    /// Skip directives for paths below this prefix
    #[arg(long = "exclude-prefix", value_name = "PATH")]
    pub exclude_prefixes: Vec<PathBuf>,

    /// Search these directories instead of the default ones, highest
    /// precedence first
    #[arg(long = "config-dir", value_name = "DIR")]
    pub config_dirs: Vec<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Directive files to process instead of searching the config directories
    #[arg(value_name = "CONFIG")]
    pub configs: Vec<PathBuf>,
}

use anyhow::Result;
use clap::Parser;

use tmpfiles_cli::{cli, commands, logging};

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbose);
    commands::run(&args)
}

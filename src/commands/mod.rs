use anyhow::{Context, Result};
use clap::CommandFactory;

use crate::cli::{Cli, Commands};
use crate::site::Site;

mod build;
mod clean;
mod dev;
mod post;
mod venv;

pub fn execute(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        // Bare invocation behaves like the help subcommand: usage to stdout,
        // exit 0.
        Cli::command()
            .print_help()
            .context("Failed to print usage")?;
        return Ok(());
    };

    // Locate the site - every operation runs relative to its root
    let site = Site::locate(cli.dir.as_deref())?;

    match command {
        Commands::Venv => venv::execute(&site),

        Commands::Dev { port, bind } => dev::execute(&site, port, bind),

        Commands::Post => post::execute(&site),

        Commands::Build => build::execute(&site),

        Commands::Clean => clean::execute(&site),
    }
}

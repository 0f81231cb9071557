use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pelican site helper - Provision, preview, and publish your blog
///
/// pelikit wraps the repetitive commands of a Pelican site: creating the
/// virtual environment, serving a live preview, generating a new post via
/// the content pipeline, and producing the publishable output. All real
/// work is delegated to the site's own tools; pelikit passes the right
/// flags and reports their exit codes faithfully.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run as if started in this directory
    #[arg(short = 'C', long = "dir", global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the virtualenv and install requirements into it
    ///
    /// Safe to re-run: an existing environment is reused and pip reconciles
    /// the installed requirements.
    Venv,

    /// Serve a live preview that rebuilds on change
    ///
    /// Runs the generator with the development settings in autoreload +
    /// listen mode until interrupted.
    Dev {
        /// Port to listen on (default from pelikit.toml, else 8000)
        #[arg(short, long, value_name = "PORT")]
        port: Option<u16>,

        /// Address to bind (default from pelikit.toml, else 127.0.0.1)
        #[arg(short, long, value_name = "ADDR")]
        bind: Option<String>,
    },

    /// Generate a new post with the content pipeline
    Post,

    /// Build the publishable site with the production settings
    Build,

    /// Remove the generated output directory
    Clean,
}

use clap::Parser;
use std::process::ExitCode;

use pelikit::cli::Cli;
use pelikit::commands;
use pelikit::ui;
use pelikit::CommandError;

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "pelikit=debug"
    } else {
        "pelikit=info"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match commands::execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ui::error(format!("{:#}", err));
            exit_code(&err)
        }
    }
}

/// A delegate that ran and failed sets our exit code to its own; everything
/// else is a plain failure.
fn exit_code(err: &anyhow::Error) -> ExitCode {
    let code = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<CommandError>())
        .and_then(CommandError::exit_code)
        .unwrap_or(1);

    ExitCode::from(code.clamp(1, 255) as u8)
}

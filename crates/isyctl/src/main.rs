mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use isyctl_core::Controller;

use crate::cli::{Cli, Command, DevicesArgs, DevicesCommand};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose, cli.global.quiet);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8, quiet: bool) {
    let filter = match (quiet, verbosity) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a controller connection
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "isy", &mut std::io::stdout());
            Ok(())
        }

        // All other commands require a controller
        cmd => {
            let session = config::resolve_session(&cli.global)?;
            let controller = Controller::new(&session.descriptor, &session.seed)?;

            // `devices discover` runs its own pass and reports it.
            let explicit_discover = matches!(
                cmd,
                Command::Devices(DevicesArgs {
                    command: DevicesCommand::Discover { .. }
                })
            );
            if session.discover && !explicit_discover {
                controller.discover().await?;
            }

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &controller, &session, &cli.global).await
        }
    }
}

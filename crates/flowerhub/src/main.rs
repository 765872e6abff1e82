mod cli;
mod commands;
mod error;
mod output;

use clap::parser::ValueSource;
use clap::{ArgMatches, CommandFactory, FromArgMatches, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, OutputFormat};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let matches = Cli::command().get_matches();
    let mut cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    init_tracing(cli.global.verbose);
    apply_output_default(&mut cli, &matches);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Without `--output`/`FLOWERHUB_OUTPUT`, fall back to `defaults.output`
/// from the config file.
fn apply_output_default(cli: &mut Cli, matches: &ArgMatches) {
    if matches.value_source("output") != Some(ValueSource::DefaultValue) {
        return;
    }
    let configured = flowerhub_config::load_config_or_default().defaults.output;
    match output_format(&configured) {
        Some(format) => cli.global.output = format,
        None => {
            tracing::warn!(output = %configured, "ignoring unknown output format in config");
        }
    }
}

fn output_format(name: &str) -> Option<OutputFormat> {
    OutputFormat::from_str(name, true).ok()
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a portal session
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "flowerhub", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let conn = commands::util::connect(&cli.global).await?;

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &conn, &cli.global).await
        }
    }
}

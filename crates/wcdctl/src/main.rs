mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use wcdctl_api::{Credentials, WcdClient};

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

/// Crates whose logs `-v` turns up; dependencies stay at `warn`.
const LOG_TARGETS: [&str; 4] = ["wcdctl", "wcdctl_api", "wcdctl_core", "wcdctl_config"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

/// `RUST_LOG` wins over `-v`. Output goes to stderr so stdout stays
/// machine-readable.
fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_directives(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn log_directives(verbosity: u8) -> String {
    let level = match verbosity {
        0 => return "warn".into(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    std::iter::once("warn".to_owned())
        .chain(LOG_TARGETS.iter().map(|target| format!("{target}={level}")))
        .collect::<Vec<_>>()
        .join(",")
}

/// Resolve the active profile into a client plus the credentials that
/// session-aware commands log in with.
fn connect(global: &GlobalOpts) -> Result<(WcdClient, Credentials), CliError> {
    let cfg = config::load_config_or_default();
    let settings = config::resolve_client_settings(global, &cfg)?;
    let client = WcdClient::new(settings.base_url, &settings.transport)?;
    Ok((client, settings.credentials))
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let Cli { global, command } = cli;
    match command {
        Command::Config(args) => commands::config_cmd::handle(args, &global),
        Command::Completions(args) => {
            let mut cmd = Cli::command();
            clap_complete::generate(args.shell, &mut cmd, "wcdctl", &mut std::io::stdout());
            Ok(())
        }
        cmd => {
            let (client, credentials) = connect(&global)?;
            tracing::debug!(command = ?cmd, base_url = %client.base_url(), "dispatching command");
            commands::dispatch(cmd, &client, &credentials, &global).await
        }
    }
}

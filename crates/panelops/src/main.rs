mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser as _;
use tracing_subscriber::EnvFilter;

use panelops_core::{PanelClient, SessionStore};

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        report_and_exit(err);
    }
}

/// Print the failure through miette and terminate with its exit code.
fn report_and_exit(err: CliError) -> ! {
    let code = err.exit_code();
    eprintln!("{:?}", miette::Report::new(err));
    std::process::exit(code);
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Local commands that never touch the network
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),
        Command::Completions(args) => {
            print_completions(args.shell);
            Ok(())
        }

        cmd => {
            let client = build_client(&cli.global)?;

            tracing::debug!(command = ?cmd, "dispatching");
            let result = commands::dispatch(cmd, &client, &cli.global).await;

            // The panel has already invalidated this token; drop the
            // cached copy too so the next run starts at login.
            if let Err(ref err) = result {
                if err.is_auth_expired() {
                    let _ = config::clear_session();
                }
            }
            result
        }
    }
}

fn print_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;

    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "panelops", &mut std::io::stdout());
}

/// Build a gateway client from the config file, profile, CLI overrides,
/// and the cached session (when one exists for this server).
fn build_client(global: &GlobalOpts) -> Result<PanelClient, CliError> {
    let cfg = config::load_config_or_default();
    let profile_name = config::active_profile_name(global, &cfg);
    let (url, transport) = config::resolve_connection(&cfg, &profile_name, global)?;

    let store = SessionStore::new();
    match config::load_session() {
        Ok(Some(cache)) if cache.matches_server(&url) => {
            store.set(cache.token.clone(), cache.user());
        }
        Ok(Some(_)) => {
            tracing::debug!("cached session belongs to a different server, ignoring");
        }
        Ok(None) => {}
        Err(err) => {
            tracing::warn!(error = %err, "could not read session cache");
        }
    }

    Ok(PanelClient::new(url, &transport, store)?)
}

//! `panelops-tui` — live terminal console for a hosting control panel.
//!
//! A [ratatui](https://ratatui.rs) front end over `panelops-core`: the
//! [`QueueMonitor`](panelops_core::QueueMonitor) feeds the queue screen
//! and a bridge task relays dashboard stats and session events into the
//! action loop. Number keys switch between the Dashboard (1) and Task
//! Queue (2) screens.
//!
//! The terminal owns stdout while the UI runs, so tracing goes to a log
//! file instead (default `/tmp/panelops-tui.log`).

mod action;
mod app;
mod bridge;
mod component;
mod event;
mod screen;
mod screens;
mod theme;
mod tui; // terminal lifecycle, not the app loop
mod widgets;

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use secrecy::ExposeSecret;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use panelops_config::SessionCache;
use panelops_core::{PanelClient, SessionStore};

use crate::app::App;

/// Live terminal console for a hosting control panel.
#[derive(Parser, Debug)]
#[command(name = "panelops-tui", version, about)]
struct Cli {
    /// Panel server URL (e.g., https://panel.example.com:8443)
    #[arg(short = 's', long, env = "PANELOPS_SERVER")]
    server: Option<String>,

    /// Named profile from the config file
    #[arg(short = 'p', long, env = "PANELOPS_PROFILE")]
    profile: Option<String>,

    /// Where to write the log file
    #[arg(long, default_value = "/tmp/panelops-tui.log")]
    log_file: PathBuf,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Route tracing to a file. Nothing may write to stdout or stderr while
/// the UI runs, or it scribbles over the terminal. The returned guard
/// flushes buffered log lines when dropped, so `main` must hold it.
fn init_file_logging(cli: &Cli) -> WorkerGuard {
    let directive = match cli.verbose {
        0 => "panelops_tui=warn",
        1 => "panelops_tui=info",
        2 => "panelops_tui=debug",
        _ => "panelops_tui=trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    // A bare filename has an empty parent, which rolling::never rejects.
    let dir = cli.log_file.parent().filter(|p| !p.as_os_str().is_empty());
    let appender = tracing_appender::rolling::never(
        dir.unwrap_or_else(|| Path::new(".")),
        cli.log_file.file_name().unwrap_or_else(|| OsStr::new("panelops-tui.log")),
    );
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false).with_target(true))
        .init();

    guard
}

/// Build an authenticated [`PanelClient`] from CLI args and the shared
/// config file. Reuses a cached session when one matches the server,
/// otherwise logs in with the profile's credentials.
async fn connect(cli: &Cli) -> Result<PanelClient> {
    let cfg = panelops_config::load_config_or_default();
    let (profile_name, profile) = cfg
        .profile(cli.profile.as_deref())
        .map_err(|err| eyre!("{err}. Run: panelops config init"))?;

    let url = match &cli.server {
        Some(raw) => raw
            .parse()
            .wrap_err_with(|| format!("invalid server URL: {raw}"))?,
        None => panelops_config::server_url(profile)?,
    };

    let transport = panelops_config::profile_to_transport(profile);
    let store = SessionStore::new();

    if let Ok(Some(cache)) = panelops_config::load_session() {
        if cache.matches_server(&url) {
            store.set(cache.token.clone(), cache.user());
        }
    }

    let client = PanelClient::new(url, &transport, store)?;

    if !client.session().is_authenticated() {
        let username = panelops_config::resolve_username(profile, profile_name)
            .map_err(|err| eyre!("{err}. Run: panelops login"))?;
        let password = panelops_config::resolve_password(profile, profile_name)
            .map_err(|err| eyre!("{err}. Run: panelops login"))?;

        let resp = client
            .login(&username, password.expose_secret())
            .await
            .wrap_err("login failed")?;

        let _ = panelops_config::save_session(&SessionCache::new(
            client.base_url(),
            &resp.token,
            &resp.user,
        ));
        info!(user = %resp.user.username, "logged in");
    }

    Ok(client)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks must be in place before the alternate screen is entered.
    tui::install_hooks()?;
    let _log_guard = init_file_logging(&cli);

    info!(
        server = cli.server.as_deref().unwrap_or("(from config)"),
        "panelops-tui starting"
    );

    let client = connect(&cli).await?;
    let mut app = App::new(client);
    app.run().await?;

    // Terminal is back to normal here; parting words go to stderr.
    if let Some(note) = app.exit_note() {
        eprintln!("{note}");
    }

    Ok(())
}

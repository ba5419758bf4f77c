//! Login, logout, and whoami handlers.

use owo_colors::OwoColorize;
use secrecy::ExposeSecret;

use panelops_core::PanelClient;
use panelops_core::models::User;

use crate::cli::{GlobalOpts, LoginArgs};
use crate::config::{self, SessionCache};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Login ───────────────────────────────────────────────────────────

pub async fn login(
    client: &PanelClient,
    args: LoginArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let profile_name = config::active_profile_name(global, &cfg);

    let username = match config::resolve_username(args.username.as_deref(), &cfg, &profile_name) {
        Some(name) => name,
        None => util::prompt_username()?,
    };

    let password = if args.password_stdin {
        util::read_password_stdin()?
    } else if let Some(secret) = config::resolve_password(&cfg, &profile_name) {
        secret.expose_secret().to_owned()
    } else {
        util::prompt_password()?
    };

    let resp = client.login(&username, &password).await?;

    let cache = SessionCache::new(client.base_url(), &resp.token, &resp.user);
    config::save_session(&cache)?;

    if !global.quiet {
        eprintln!("Logged in as {} ({})", resp.user.username, resp.user.role);
    }
    Ok(())
}

// ── Logout ──────────────────────────────────────────────────────────

pub async fn logout(client: &PanelClient, global: &GlobalOpts) -> Result<(), CliError> {
    if !client.session().is_authenticated() {
        config::clear_session()?;
        if !global.quiet {
            eprintln!("Not logged in");
        }
        return Ok(());
    }

    // Tell the server, but discard local state no matter what it says.
    let result = client.logout().await;
    config::clear_session()?;

    let message = match result {
        Ok(ack) => ack.message,
        Err(err) => {
            tracing::debug!(error = %err, "server-side logout failed, local session discarded");
            None
        }
    };
    util::print_ack(message.as_deref(), "Logged out", global.quiet);
    Ok(())
}

// ── Whoami ──────────────────────────────────────────────────────────

pub async fn whoami(client: &PanelClient, global: &GlobalOpts) -> Result<(), CliError> {
    let user = client.me().await?;
    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &user,
        |u| detail(u, color),
        |u| u.username.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

fn detail(user: &User, color: bool) -> String {
    let role = if color && user.role.is_admin() {
        user.role.to_string().yellow().bold().to_string()
    } else {
        user.role.to_string()
    };
    [
        format!("Username: {}", user.username),
        format!("Email:    {}", user.email),
        format!("Role:     {role}"),
        format!("Active:   {}", util::yes_no(user.active)),
        format!("User ID:  {}", user.id),
    ]
    .join("\n")
}

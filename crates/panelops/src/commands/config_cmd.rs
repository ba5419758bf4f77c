//! Handlers for `panelops config`.

use dialoguer::{Input, Select};

use super::util;
use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => run_wizard(),

        ConfigCommand::Show => {
            // Redact before rendering so the structured formats cannot
            // leak a plaintext password either.
            let cfg = redact(config::load_config_or_default());
            let out = output::render_single(
                &global.output,
                &cfg,
                |c| toml::to_string_pretty(c).expect("serialization should not fail"),
                |_| "config".into(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: panelops config init");
            } else {
                let mut names: Vec<_> = cfg.profiles.iter().collect();
                names.sort_by(|a, b| a.0.cmp(b.0));
                for (name, profile) in names {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}\t{}", profile.server);
                }
            }
            Ok(())
        }

        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            apply_set(cfg.profiles.entry(profile_name.clone()).or_default(), &key, value)?;
            config::save_config(&cfg)?;
            eprintln!("✓ Set {key} on profile '{profile_name}'");
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound { name });
            }
            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            eprintln!("✓ Default profile set to '{name}'");
            Ok(())
        }

        ConfigCommand::SetPassword { profile } => {
            let cfg = config::load_config_or_default();
            let profile_name =
                profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));
            if !cfg.profiles.contains_key(&profile_name) {
                return Err(CliError::ProfileNotFound { name: profile_name });
            }

            let secret = util::prompt_password()?;
            store_in_keyring(&profile_name, &secret)?;
            eprintln!("✓ Password stored in the system keyring for profile '{profile_name}'");
            Ok(())
        }
    }
}

// ── Interactive wizard ──────────────────────────────────────────────

fn run_wizard() -> Result<(), CliError> {
    let config_path = config::config_path();
    eprintln!("Configuring panelops ({})\n", config_path.display());

    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default("default".into())
        .interact_text()
        .map_err(prompt_err)?;

    let server: String = Input::new()
        .with_prompt("Panel URL")
        .default("https://localhost:8080".into())
        .interact_text()
        .map_err(prompt_err)?;

    let username = util::prompt_username()?;
    let secret = util::prompt_password()?;
    let password = offer_keyring(&secret, &profile_name)?;

    let profile = Profile {
        server,
        username: Some(username),
        password,
        ..Profile::default()
    };

    // Other profiles already on disk survive the wizard.
    let mut cfg = config::load_config_or_default();
    cfg.profiles.insert(profile_name.clone(), profile);
    cfg.default_profile = Some(profile_name.clone());
    config::save_config(&cfg)?;

    eprintln!("\n✓ Configuration written to {}", config_path.display());
    eprintln!("  Active profile: {profile_name}");
    eprintln!("\n  Test it: panelops ping");
    Ok(())
}

/// Ask where the password should live.
///
/// `None` means it went to the keyring; `Some` hands it back for the
/// config file.
fn offer_keyring(secret: &str, profile_name: &str) -> Result<Option<String>, CliError> {
    let choice = Select::new()
        .with_prompt("Password storage")
        .items(&["system keyring (recommended)", "config file, in the clear"])
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    if choice != 0 {
        return Ok(Some(secret.to_owned()));
    }
    store_in_keyring(profile_name, secret)?;
    eprintln!("   ✓ Password stored in the system keyring");
    Ok(None)
}

// ── Helpers ─────────────────────────────────────────────────────────

fn apply_set(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "server" => profile.server = value,
        "username" => profile.username = Some(value),
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
        "insecure" => {
            profile.insecure = Some(value.parse().map_err(|_| CliError::Validation {
                field: "insecure".into(),
                reason: "expected true or false".into(),
            })?);
        }
        "timeout" => {
            profile.timeout = Some(value.parse().map_err(|_| CliError::Validation {
                field: "timeout".into(),
                reason: "expected a whole number of seconds".into(),
            })?);
        }
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!(
                    "unknown config key '{other}'; one of server, username, ca_cert, \
                     insecure, timeout"
                ),
            });
        }
    }
    Ok(())
}

fn store_in_keyring(profile_name: &str, secret: &str) -> Result<(), CliError> {
    keyring::Entry::new("panelops", &format!("{profile_name}/password"))
        .and_then(|entry| entry.set_password(secret))
        .map_err(|e| CliError::Validation {
            field: "keyring".into(),
            reason: format!("keyring unavailable: {e}"),
        })
}

fn prompt_err(e: dialoguer::Error) -> CliError {
    CliError::Validation {
        field: "prompt".into(),
        reason: format!("interactive input failed: {e}"),
    }
}

/// Blank out stored passwords, keeping only the fact that one exists.
fn redact(mut cfg: Config) -> Config {
    for profile in cfg.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some("****".into());
        }
    }
    cfg
}

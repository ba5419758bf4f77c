//! End-to-end checks of the `panelops` binary surface: parsing, help,
//! completions and offline failure modes. No panel server is contacted.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

/// Scratch path that never exists, so config lookups come up empty.
const SCRATCH: &str = "/tmp/panelops-test-home";

/// Command with a scrubbed environment. `PANELOPS_*` variables from the
/// developer's shell must not bleed into assertions.
fn bin() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("panelops");
    cmd.env("HOME", SCRATCH).env("XDG_CONFIG_HOME", SCRATCH);
    for var in ["PROFILE", "SERVER", "OUTPUT", "INSECURE", "TIMEOUT", "USERNAME", "PASSWORD"] {
        cmd.env_remove(format!("PANELOPS_{var}"));
    }
    cmd
}

/// Both streams joined, for assertions that do not care where clap printed.
fn all_output(out: &std::process::Output) -> String {
    let mut text = String::from_utf8_lossy(&out.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&out.stderr));
    text
}

// ── Invocation basics ───────────────────────────────────────────────

#[test]
fn test_bare_invocation_shows_usage() {
    let out = bin().output().unwrap();
    let text = all_output(&out);
    assert_eq!(out.status.code(), Some(2), "usage errors exit 2, got:\n{text}");
    assert!(text.contains("Usage"), "help text missing:\n{text}");
}

#[test]
fn test_help_lists_command_groups() {
    bin().arg("--help").assert().success().stdout(
        predicate::str::contains("hosting control panel")
            .and(predicate::str::contains("dashboard"))
            .and(predicate::str::contains("accounts"))
            .and(predicate::str::contains("databases")),
    );
}

#[test]
fn test_version_flag() {
    bin()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ── Completions ─────────────────────────────────────────────────────

#[test]
fn test_completions_cover_common_shells() {
    for shell in ["bash", "zsh", "fish"] {
        bin()
            .args(["completions", shell])
            .assert()
            .success()
            .stdout(predicate::str::is_empty().not());
    }
}

#[test]
fn test_zsh_completions_are_compdef() {
    bin()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("#compdef"));
}

// ── Parser rejections ───────────────────────────────────────────────

#[test]
fn test_unknown_subcommand_is_rejected() {
    bin()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("frobnicate"));
}

#[test]
fn test_output_format_values_are_validated() {
    bin()
        .args(["--output", "sideways", "users", "list"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("possible values").or(predicate::str::contains("invalid")),
        );
}

#[test]
fn test_watch_interval_must_be_numeric() {
    bin()
        .args(["queue", "watch", "--interval", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("soon"));
}

// ── Offline failure modes ───────────────────────────────────────────
//
// With no config file and no --server flag, network commands must fail
// with a configuration error before any request is attempted.

#[test]
fn test_users_list_without_config_fails() {
    bin()
        .args(["users", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("profile").or(predicate::str::contains("config")));
}

#[test]
fn test_queue_show_without_config_fails() {
    bin()
        .args(["queue", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("profile").or(predicate::str::contains("config")));
}

#[test]
fn test_global_flags_reach_past_the_parser() {
    // Every flag parses; the failure is the absent server config.
    bin()
        .args(["-o", "json", "-v", "--insecure", "--timeout", "60", "ping"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("profile").or(predicate::str::contains("config")));
}

// ── Local config commands ───────────────────────────────────────────

#[test]
fn test_config_show_works_without_a_file() {
    // Falls back to the built-in defaults rather than erroring.
    bin().args(["config", "show"]).assert().success();
}

#[test]
fn test_config_path_prints_location() {
    bin()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_use_rejects_unknown_profile() {
    bin()
        .args(["config", "use", "no-such-profile"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no-such-profile"));
}

// ── Help discovery ──────────────────────────────────────────────────

#[test]
fn test_users_help_names_crud_verbs() {
    bin().args(["users", "--help"]).assert().success().stdout(
        predicate::str::contains("list")
            .and(predicate::str::contains("create"))
            .and(predicate::str::contains("update"))
            .and(predicate::str::contains("delete")),
    );
}

#[test]
fn test_queue_help_names_operations() {
    bin().args(["queue", "--help"]).assert().success().stdout(
        predicate::str::contains("show")
            .and(predicate::str::contains("flush"))
            .and(predicate::str::contains("watch")),
    );
}

#[test]
fn test_accounts_help_names_suspension() {
    bin().args(["accounts", "--help"]).assert().success().stdout(
        predicate::str::contains("suspend").and(predicate::str::contains("unsuspend")),
    );
}

#[test]
fn test_system_help_names_operations() {
    bin().args(["system", "--help"]).assert().success().stdout(
        predicate::str::contains("stats")
            .and(predicate::str::contains("services"))
            .and(predicate::str::contains("restart")),
    );
}

#[test]
fn test_config_help_names_subcommands() {
    bin().args(["config", "--help"]).assert().success().stdout(
        predicate::str::contains("init")
            .and(predicate::str::contains("profiles"))
            .and(predicate::str::contains("set-password")),
    );
}

#[test]
fn test_database_engine_flag_is_named_type() {
    bin()
        .args(["databases", "create", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--type").and(predicate::str::contains("ENGINE")));
}

#[test]
fn test_command_aliases_parse() {
    for alias in ["q", "db", "acct", "dash", "sys"] {
        bin().args([alias, "--help"]).assert().success();
    }
}

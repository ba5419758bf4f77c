//! Shared helpers for command handlers.

use std::io::BufRead;

use crate::error::CliError;

/// Ask the operator to confirm a destructive action; `--yes` skips the prompt.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))
}

/// Interactive username prompt.
pub fn prompt_username() -> Result<String, CliError> {
    dialoguer::Input::new()
        .with_prompt("Username")
        .interact_text()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))
}

/// Hidden password prompt.
pub fn prompt_password() -> Result<String, CliError> {
    let password = rpassword::prompt_password("Password: ")?;
    if password.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }
    Ok(password)
}

/// Read a password from the first line of stdin (for `--password-stdin`).
pub fn read_password_stdin() -> Result<String, CliError> {
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_owned();
    if password.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "no password on stdin".into(),
        });
    }
    Ok(password)
}

/// Report a mutation outcome, preferring the panel's own wording.
pub fn print_ack(message: Option<&str>, fallback: &str, quiet: bool) {
    if !quiet {
        eprintln!("{}", message.unwrap_or(fallback));
    }
}

/// Format bytes the way the panel dashboard does: base-1024 with up to
/// two decimals, e.g. "7.84 GB", "512 MB".
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        return format!("{bytes} B");
    }
    let formatted = format!("{value:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}

/// Usage percentage, 0 when the total is unknown.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn percent(used: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    used as f64 / total as f64 * 100.0
}

/// "yes"/"no" for boolean table cells.
pub fn yes_no(value: bool) -> String {
    if value { "yes".into() } else { "no".into() }
}

/// "-" for absent optional table cells.
pub fn or_dash(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".into())
}

/// "YYYY-MM-DD HH:MM" in UTC, "-" when the backend omitted the stamp.
pub fn timestamp(value: Option<chrono::DateTime<chrono::Utc>>) -> String {
    value.map_or_else(|| "-".into(), |t| t.format("%Y-%m-%d %H:%M").to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes_matches_dashboard_style() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(8_418_135_965), "7.84 GB");
    }

    #[test]
    fn test_percent_handles_zero_total() {
        assert!(percent(0, 0).abs() < f64::EPSILON);
        assert!((percent(1, 4) - 25.0).abs() < f64::EPSILON);
    }
}

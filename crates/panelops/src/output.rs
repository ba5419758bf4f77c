//! Terminal rendering for command results.
//!
//! Read commands pick their format from `--output`. The `table` and `plain`
//! views are shaped by caller closures; `json`, `json-compact` and `yaml`
//! serialize the response value itself, so scripts see every field the panel
//! returned, including ones the table view leaves out.

use std::io::{self, IsTerminal, Write};

use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};

// ── Dispatchers ──────────────────────────────────────────────────────

/// Render a listing in the requested format.
///
/// `to_row` shapes one item into its table row and `id_fn` yields the bare
/// identifier (username, domain name, ...) that `plain` emits one per line.
/// An empty listing renders as `(no results)` in table mode and as nothing
/// in plain mode.
pub fn render_list<'a, T: serde::Serialize, R: Tabled>(
    format: &OutputFormat,
    data: &'a [T],
    to_row: impl Fn(&'a T) -> R,
    id_fn: impl Fn(&'a T) -> String,
) -> String {
    if let Some(rendered) = serialized(format, data) {
        return rendered;
    }
    if matches!(format, OutputFormat::Plain) {
        let ids: Vec<String> = data.iter().map(&id_fn).collect();
        return ids.join("\n");
    }
    if data.is_empty() {
        return "(no results)".to_owned();
    }
    let rows: Vec<R> = data.iter().map(to_row).collect();
    render_table(&rows)
}

/// Render one resource in the requested format.
///
/// Detail views are label/value prose rather than `Tabled` rows, so the
/// caller passes a ready `detail_fn`; `id_fn` feeds `plain`.
pub fn render_single<T: serde::Serialize>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> String {
    if let Some(rendered) = serialized(format, data) {
        return rendered;
    }
    if matches!(format, OutputFormat::Plain) {
        return id_fn(data);
    }
    detail_fn(data)
}

/// Print a rendering to stdout, unless `--quiet` asked for silence.
///
/// Empty renderings print nothing rather than a blank line.
pub fn print_output(output: &str, quiet: bool) {
    if !quiet && !output.is_empty() {
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{output}");
    }
}

// ── Leaf renderers ───────────────────────────────────────────────────

/// Border and layout shared by every table the CLI prints.
pub(crate) fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::sharp()).to_string()
}

/// Serialize `data` for the machine-readable formats.
///
/// Returns `None` for `table` and `plain`, which the dispatchers shape
/// themselves.
fn serialized<T: serde::Serialize + ?Sized>(format: &OutputFormat, data: &T) -> Option<String> {
    let rendered = match format {
        OutputFormat::Table | OutputFormat::Plain => return None,
        OutputFormat::Json => {
            serde_json::to_string_pretty(data).expect("serialization should not fail")
        }
        OutputFormat::JsonCompact => {
            serde_json::to_string(data).expect("serialization should not fail")
        }
        OutputFormat::Yaml => serde_yaml::to_string(data).expect("serialization should not fail"),
    };
    Some(rendered)
}

// ── Terminal capabilities ────────────────────────────────────────────

/// Resolve the effective color choice for stdout.
///
/// `auto` follows the `NO_COLOR` convention and turns color off when stdout
/// is not a terminal, so piped output stays free of escape codes.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal(),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use tabled::Tabled;

    use super::*;

    #[derive(Serialize, Tabled)]
    struct Row {
        name: &'static str,
    }

    fn rows() -> Vec<Row> {
        vec![Row { name: "alice" }, Row { name: "bob" }]
    }

    #[test]
    fn plain_emits_one_identifier_per_line() {
        let out = render_list(
            &OutputFormat::Plain,
            &rows(),
            |r| Row { name: r.name },
            |r| r.name.to_owned(),
        );
        assert_eq!(out, "alice\nbob");
    }

    #[test]
    fn empty_table_says_so_instead_of_printing_bare_borders() {
        let out = render_list(
            &OutputFormat::Table,
            &Vec::<Row>::new(),
            |r| Row { name: r.name },
            |r| r.name.to_owned(),
        );
        assert_eq!(out, "(no results)");
    }

    #[test]
    fn json_serializes_the_source_value_not_the_table_rows() {
        let out = render_list(
            &OutputFormat::JsonCompact,
            &rows(),
            |r| Row { name: r.name },
            |r| r.name.to_owned(),
        );
        assert_eq!(out, r#"[{"name":"alice"},{"name":"bob"}]"#);
    }

    #[test]
    fn single_plain_prints_the_identifier() {
        let item = Row { name: "alice" };
        let out = render_single(
            &OutputFormat::Plain,
            &item,
            |r| format!("Name: {}", r.name),
            |r| r.name.to_owned(),
        );
        assert_eq!(out, "alice");
    }

    #[test]
    fn explicit_color_modes_ignore_the_environment() {
        assert!(should_color(&ColorMode::Always));
        assert!(!should_color(&ColorMode::Never));
    }
}

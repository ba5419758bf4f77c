//! System command handlers: stats, services, restart, ping.

use owo_colors::OwoColorize;
use tabled::Tabled;

use panelops_core::PanelClient;
use panelops_core::models::{ServiceInfo, SystemStats};

use crate::cli::{GlobalOpts, SystemArgs, SystemCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ServiceRow {
    #[tabled(rename = "Service")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
}

impl ServiceRow {
    fn new(service: &ServiceInfo, color: bool) -> Self {
        let status = if color {
            match service.status.as_str() {
                "running" | "active" => service.status.green().to_string(),
                "stopped" | "failed" | "dead" => service.status.red().to_string(),
                _ => service.status.clone(),
            }
        } else {
            service.status.clone()
        };
        Self {
            name: service.name.clone(),
            status,
            enabled: util::or_dash(service.enabled.map(util::yes_no)),
        }
    }
}

fn stats_detail(stats: &SystemStats) -> String {
    let mem_pct = util::percent(stats.memory_used, stats.memory_total);
    let disk_pct = util::percent(stats.disk_used, stats.disk_total);
    let mut out = format!(
        "CPU:     {:.1}%\n\
         Memory:  {} / {} ({mem_pct:.0}%)\n\
         Disk:    {} / {} ({disk_pct:.0}%)",
        stats.cpu_usage,
        util::format_bytes(stats.memory_used),
        util::format_bytes(stats.memory_total),
        util::format_bytes(stats.disk_used),
        util::format_bytes(stats.disk_total),
    );
    if !stats.load_average.is_empty() {
        let load = stats
            .load_average
            .iter()
            .map(|l| format!("{l:.2}"))
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&format!("\nLoad:    {load}"));
    }
    out
}

// ── Handlers ────────────────────────────────────────────────────────

/// Reachability check against the unauthenticated health endpoint.
pub async fn ping(client: &PanelClient, global: &GlobalOpts) -> Result<(), CliError> {
    let health = client.health().await?;
    if !global.quiet {
        let version = health.version.as_deref().unwrap_or("unknown");
        println!(
            "panel at {}: {} (version {version})",
            client.base_url(),
            health.status
        );
    }
    Ok(())
}

pub async fn handle(
    client: &PanelClient,
    args: SystemArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        SystemCommand::Stats => {
            let stats = client.system_stats().await?;
            let out = output::render_single(&global.output, &stats, stats_detail, |s| {
                format!("cpu={:.1}", s.cpu_usage)
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SystemCommand::Services => {
            let services = client.services().await?;
            let color = output::should_color(&global.color);
            let out = output::render_list(
                &global.output,
                &services,
                |s| ServiceRow::new(s, color),
                |s| s.name.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SystemCommand::Restart { service } => {
            if !util::confirm(&format!("Restart service {service}?"), global.yes)? {
                return Ok(());
            }
            let ack = client.restart_service(&service).await?;
            util::print_ack(
                ack.message.as_deref(),
                &format!("Service {service} restarted"),
                global.quiet,
            );
            Ok(())
        }
    }
}

//! Dashboard command handler: aggregate counters plus live host metrics.

use panelops_core::PanelClient;
use panelops_core::models::DashboardStats;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

fn detail(stats: &DashboardStats) -> String {
    let mut out = format!(
        "Users:      {}\n\
         Domains:    {}\n\
         Databases:  {}\n\
         Emails:     {}",
        stats.total_users, stats.total_domains, stats.total_databases, stats.total_emails
    );

    if let Some(sys) = &stats.system_stats {
        let mem_pct = util::percent(sys.memory_used, sys.memory_total);
        let disk_pct = util::percent(sys.disk_used, sys.disk_total);
        out.push_str(&format!(
            "\n\nCPU:        {:.1}%\n\
             Memory:     {} / {} ({mem_pct:.0}%)\n\
             Disk:       {} / {} ({disk_pct:.0}%)",
            sys.cpu_usage,
            util::format_bytes(sys.memory_used),
            util::format_bytes(sys.memory_total),
            util::format_bytes(sys.disk_used),
            util::format_bytes(sys.disk_total),
        ));
        if !sys.load_average.is_empty() {
            let load = sys
                .load_average
                .iter()
                .map(|l| format!("{l:.2}"))
                .collect::<Vec<_>>()
                .join(" ");
            out.push_str(&format!("\nLoad:       {load}"));
        }
    }

    out
}

fn plain(stats: &DashboardStats) -> String {
    format!(
        "users={} domains={} databases={} emails={}",
        stats.total_users, stats.total_domains, stats.total_databases, stats.total_emails
    )
}

pub async fn handle(client: &PanelClient, global: &GlobalOpts) -> Result<(), CliError> {
    let stats = client.dashboard_stats().await?;
    let out = output::render_single(&global.output, &stats, detail, plain);
    output::print_output(&out, global.quiet);
    Ok(())
}

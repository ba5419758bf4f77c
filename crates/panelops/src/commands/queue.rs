//! Task queue command handlers: show, flush, watch.

use std::time::Duration;

use owo_colors::OwoColorize;
use tabled::Tabled;

use panelops_core::models::{CronJob, MailQueueItem, QueueSnapshot};
use panelops_core::{PanelClient, QueueMonitor, QueuePhase};

use crate::cli::{GlobalOpts, QueueArgs, QueueCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct MailRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Sender")]
    sender: String,
    #[tabled(rename = "Recipient")]
    recipient: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl MailRow {
    fn new(item: &MailQueueItem, color: bool) -> Self {
        let status = if item.status.is_deferred() && color {
            item.status.to_string().yellow().to_string()
        } else {
            item.status.to_string()
        };
        Self {
            id: item.id.clone(),
            sender: item.sender.clone(),
            recipient: item.recipient.clone(),
            size: item.size.clone(),
            time: item.time.clone(),
            status,
        }
    }
}

#[derive(Tabled)]
struct CronRow {
    #[tabled(rename = "User")]
    user: String,
    #[tabled(rename = "Schedule")]
    schedule: String,
    #[tabled(rename = "Command")]
    command: String,
    #[tabled(rename = "Next Run")]
    next_run: String,
}

impl From<&CronJob> for CronRow {
    fn from(job: &CronJob) -> Self {
        Self {
            user: job.user.clone(),
            schedule: job.schedule.clone(),
            command: job.command.clone(),
            next_run: job.next_run.clone(),
        }
    }
}

// ── Rendering ───────────────────────────────────────────────────────

fn snapshot_detail(snap: &QueueSnapshot, color: bool) -> String {
    let mut out = format!(
        "Mail queued: {}   Cron jobs: {}   Pending tasks: {}\n",
        snap.mail_queue_count,
        snap.cron_jobs.len(),
        snap.pending_tasks
    );

    out.push_str("\nMail queue\n");
    if snap.mail_queue.is_empty() {
        out.push_str("  Mail queue is empty\n");
    } else {
        let rows: Vec<MailRow> = snap
            .mail_queue
            .iter()
            .map(|i| MailRow::new(i, color))
            .collect();
        out.push_str(&output::render_table(&rows));
        out.push('\n');
        let listed = u64::try_from(snap.mail_queue.len()).unwrap_or(u64::MAX);
        if snap.mail_queue_count > listed {
            out.push_str(&format!(
                "  ({} queued in total, showing {listed})\n",
                snap.mail_queue_count
            ));
        }
    }

    out.push_str("\nCron jobs\n");
    if snap.cron_jobs.is_empty() {
        out.push_str("  No scheduled jobs found\n");
    } else {
        let rows: Vec<CronRow> = snap.cron_jobs.iter().map(CronRow::from).collect();
        out.push_str(&output::render_table(&rows));
        out.push('\n');
    }

    out.trim_end().to_owned()
}

fn summary_line(snap: &QueueSnapshot) -> String {
    format!(
        "mail {}  cron {}  pending {}",
        snap.mail_queue_count,
        snap.cron_jobs.len(),
        snap.pending_tasks
    )
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &PanelClient,
    args: QueueArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        QueueCommand::Show => {
            let snap = client.queue_status().await?;
            let color = output::should_color(&global.color);
            let out = output::render_single(
                &global.output,
                &snap,
                |s| snapshot_detail(s, color),
                summary_line,
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        QueueCommand::Flush => {
            if !util::confirm("Flush the mail queue?", global.yes)? {
                return Ok(());
            }
            let ack = client.flush_mail_queue().await?;
            util::print_ack(ack.message.as_deref(), "Mail queue flushed", global.quiet);
            Ok(())
        }

        QueueCommand::Watch { interval } => watch(client, interval, global).await,
    }
}

/// Poll the queue on a timer and print one line per completed refresh
/// until Ctrl-C. Failures keep the previous figures and annotate the
/// line with the panel's error text.
async fn watch(client: &PanelClient, interval: u64, global: &GlobalOpts) -> Result<(), CliError> {
    let period = Duration::from_secs(interval.max(1));
    let monitor = QueueMonitor::with_period(client.clone(), period);
    let mut rx = monitor.subscribe();
    let color = output::should_color(&global.color);

    if !global.quiet {
        eprintln!("Watching the task queue every {}s (Ctrl-C to stop)", period.as_secs());
    }
    monitor.start();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = rx.borrow_and_update().clone();
                if state.phase != QueuePhase::Ready && state.phase != QueuePhase::Failed {
                    continue;
                }

                // The session died mid-watch; stop instead of looping on 401s.
                if !client.session().is_authenticated() {
                    monitor.stop();
                    return Err(CliError::AuthRequired {
                        message: state.error,
                    });
                }

                let stamp = chrono::Local::now().format("%H:%M:%S");
                let figures = state
                    .snapshot
                    .as_ref()
                    .map_or_else(|| "no data".to_owned(), summary_line);
                match state.error {
                    Some(ref err) if color => {
                        println!("{stamp}  {figures}  {}", format!("error: {err}").red());
                    }
                    Some(ref err) => println!("{stamp}  {figures}  error: {err}"),
                    None => println!("{stamp}  {figures}"),
                }
            }
        }
    }

    monitor.stop();
    Ok(())
}

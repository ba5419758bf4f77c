//! Package (hosting plan) command handlers.

use tabled::Tabled;

use panelops_core::PanelClient;
use panelops_core::models::{NewPackage, Package, PackageUpdate};

use crate::cli::{GlobalOpts, PackagesArgs, PackagesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// Quotas use 0 as "unlimited" on the wire.
fn quota_mb(value: i64) -> String {
    if value == 0 {
        "unlimited".into()
    } else {
        format!("{value} MB")
    }
}

fn limit(value: i64) -> String {
    if value == 0 {
        "unlimited".into()
    } else {
        value.to_string()
    }
}

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PackageRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Disk")]
    disk: String,
    #[tabled(rename = "Bandwidth")]
    bandwidth: String,
    #[tabled(rename = "Domains")]
    domains: String,
    #[tabled(rename = "Databases")]
    databases: String,
}

impl From<&Package> for PackageRow {
    fn from(pkg: &Package) -> Self {
        Self {
            id: pkg.id,
            name: pkg.name.clone(),
            disk: quota_mb(pkg.disk_quota),
            bandwidth: quota_mb(pkg.bandwidth_quota),
            domains: limit(pkg.max_domains),
            databases: limit(pkg.max_databases),
        }
    }
}

fn detail(pkg: &Package) -> String {
    format!(
        "Name:        {}\n\
         Disk:        {}\n\
         Bandwidth:   {}\n\
         Domains:     {}\n\
         Databases:   {}\n\
         Emails:      {}\n\
         FTP:         {}\n\
         Created:     {}\n\
         Package ID:  {}",
        pkg.name,
        quota_mb(pkg.disk_quota),
        quota_mb(pkg.bandwidth_quota),
        limit(pkg.max_domains),
        limit(pkg.max_databases),
        limit(pkg.max_emails),
        limit(pkg.max_ftp),
        util::timestamp(pkg.created_at),
        pkg.id
    )
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &PanelClient,
    args: PackagesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        PackagesCommand::List => {
            let packages = client.list_packages().await?;
            let out =
                output::render_list(&global.output, &packages, PackageRow::from, |p| {
                    p.name.clone()
                });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PackagesCommand::Get { id } => {
            let pkg = client.get_package(id).await?;
            let out = output::render_single(&global.output, &pkg, detail, |p| p.name.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PackagesCommand::Create {
            name,
            disk_quota,
            bandwidth_quota,
            max_domains,
            max_databases,
            max_emails,
            max_ftp,
        } => {
            let new = NewPackage {
                name,
                disk_quota,
                bandwidth_quota,
                max_domains,
                max_databases,
                max_emails,
                max_ftp,
            };
            let created = client.create_package(&new).await?;
            util::print_ack(created.message.as_deref(), "Package created", global.quiet);
            Ok(())
        }

        PackagesCommand::Update {
            id,
            name,
            disk_quota,
            bandwidth_quota,
            max_domains,
            max_databases,
            max_emails,
            max_ftp,
        } => {
            let update = PackageUpdate {
                name,
                disk_quota,
                bandwidth_quota,
                max_domains,
                max_databases,
                max_emails,
                max_ftp,
            };
            let ack = client.update_package(id, &update).await?;
            util::print_ack(ack.message.as_deref(), "Package updated", global.quiet);
            Ok(())
        }

        PackagesCommand::Delete { id } => {
            if !util::confirm(&format!("Delete package {id}?"), global.yes)? {
                return Ok(());
            }
            let ack = client.delete_package(id).await?;
            util::print_ack(ack.message.as_deref(), "Package deleted", global.quiet);
            Ok(())
        }
    }
}

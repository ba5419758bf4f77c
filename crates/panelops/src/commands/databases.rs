//! Database command handlers.

use tabled::Tabled;

use panelops_core::PanelClient;
use panelops_core::models::{Database, DatabaseUpdate, NewDatabase};

use crate::cli::{DatabasesArgs, DatabasesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DatabaseRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Engine")]
    engine: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&Database> for DatabaseRow {
    fn from(db: &Database) -> Self {
        Self {
            id: db.id,
            name: db.name.clone(),
            engine: db.kind.clone(),
            size: util::format_bytes(db.size.max(0).unsigned_abs()),
            created: util::timestamp(db.created_at),
        }
    }
}

fn detail(db: &Database) -> String {
    format!(
        "Name:           {}\n\
         Engine:         {}\n\
         Size:           {}\n\
         Owner user ID:  {}\n\
         Created:        {}\n\
         Database ID:    {}",
        db.name,
        db.kind,
        util::format_bytes(db.size.max(0).unsigned_abs()),
        db.user_id,
        util::timestamp(db.created_at),
        db.id
    )
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &PanelClient,
    args: DatabasesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DatabasesCommand::List => {
            let databases = client.list_databases().await?;
            let out = output::render_list(&global.output, &databases, DatabaseRow::from, |d| {
                d.name.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DatabasesCommand::Get { id } => {
            let db = client.get_database(id).await?;
            let out = output::render_single(&global.output, &db, detail, |d| d.name.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DatabasesCommand::Create { name, kind } => {
            let new = NewDatabase { name, kind };
            let created = client.create_database(&new).await?;
            util::print_ack(created.message.as_deref(), "Database created", global.quiet);
            Ok(())
        }

        DatabasesCommand::Update { id, kind } => {
            let update = DatabaseUpdate { kind };
            let ack = client.update_database(id, &update).await?;
            util::print_ack(ack.message.as_deref(), "Database updated", global.quiet);
            Ok(())
        }

        DatabasesCommand::Delete { id } => {
            if !util::confirm(&format!("Delete database {id}?"), global.yes)? {
                return Ok(());
            }
            let ack = client.delete_database(id).await?;
            util::print_ack(ack.message.as_deref(), "Database deleted", global.quiet);
            Ok(())
        }
    }
}

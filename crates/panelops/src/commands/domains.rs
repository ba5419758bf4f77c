//! Domain command handlers.

use tabled::Tabled;

use panelops_core::PanelClient;
use panelops_core::models::{Domain, DomainUpdate, NewDomain};

use crate::cli::{DomainsArgs, DomainsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DomainRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Domain")]
    name: String,
    #[tabled(rename = "Document Root")]
    document_root: String,
    #[tabled(rename = "SSL")]
    ssl: String,
    #[tabled(rename = "Active")]
    active: String,
}

impl From<&Domain> for DomainRow {
    fn from(domain: &Domain) -> Self {
        Self {
            id: domain.id,
            name: domain.name.clone(),
            document_root: domain.document_root.clone(),
            ssl: util::yes_no(domain.ssl_enabled),
            active: util::yes_no(domain.active),
        }
    }
}

fn detail(domain: &Domain) -> String {
    let ssl = if domain.ssl_enabled {
        match domain.ssl_expiry {
            Some(expiry) => format!("yes (expires {})", expiry.format("%Y-%m-%d")),
            None => "yes".into(),
        }
    } else {
        "no".into()
    };
    format!(
        "Domain:         {}\n\
         Document root:  {}\n\
         SSL:            {ssl}\n\
         Active:         {}\n\
         Owner user ID:  {}\n\
         Created:        {}\n\
         Domain ID:      {}",
        domain.name,
        domain.document_root,
        util::yes_no(domain.active),
        domain.user_id,
        util::timestamp(domain.created_at),
        domain.id
    )
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &PanelClient,
    args: DomainsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DomainsCommand::List => {
            let domains = client.list_domains().await?;
            let out =
                output::render_list(&global.output, &domains, DomainRow::from, |d| d.name.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DomainsCommand::Get { id } => {
            let domain = client.get_domain(id).await?;
            let out = output::render_single(&global.output, &domain, detail, |d| d.name.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DomainsCommand::Create {
            name,
            document_root,
        } => {
            let new = NewDomain {
                name,
                document_root,
            };
            let created = client.create_domain(&new).await?;
            util::print_ack(created.message.as_deref(), "Domain created", global.quiet);
            Ok(())
        }

        DomainsCommand::Update {
            id,
            document_root,
            ssl,
            active,
        } => {
            let update = DomainUpdate {
                document_root,
                ssl_enabled: ssl,
                active,
            };
            let ack = client.update_domain(id, &update).await?;
            util::print_ack(ack.message.as_deref(), "Domain updated", global.quiet);
            Ok(())
        }

        DomainsCommand::Delete { id } => {
            if !util::confirm(&format!("Delete domain {id}?"), global.yes)? {
                return Ok(());
            }
            let ack = client.delete_domain(id).await?;
            util::print_ack(ack.message.as_deref(), "Domain deleted", global.quiet);
            Ok(())
        }
    }
}

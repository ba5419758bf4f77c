//! Hosting account command handlers.

use tabled::Tabled;

use panelops_core::PanelClient;
use panelops_core::models::{Account, AccountUpdate, NewAccount};

use crate::cli::{AccountsArgs, AccountsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct AccountRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Domain")]
    domain: String,
    #[tabled(rename = "Package")]
    package: String,
    #[tabled(rename = "Active")]
    active: String,
}

impl From<&Account> for AccountRow {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
            domain: account.domain.clone(),
            package: util::or_dash(account.package_name.clone()),
            active: util::yes_no(account.active),
        }
    }
}

fn detail(account: &Account) -> String {
    let package = match &account.package_name {
        Some(name) => format!("{name} (#{})", account.package_id),
        None => format!("#{}", account.package_id),
    };
    format!(
        "Username:    {}\n\
         Email:       {}\n\
         Domain:      {}\n\
         Package:     {package}\n\
         Active:      {}\n\
         Created:     {}\n\
         Account ID:  {}",
        account.username,
        account.email,
        account.domain,
        util::yes_no(account.active),
        util::timestamp(account.created_at),
        account.id
    )
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &PanelClient,
    args: AccountsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AccountsCommand::List => {
            let accounts = client.list_accounts().await?;
            let out = output::render_list(&global.output, &accounts, AccountRow::from, |a| {
                a.username.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AccountsCommand::Get { id } => {
            let account = client.get_account(id).await?;
            let out =
                output::render_single(&global.output, &account, detail, |a| a.username.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AccountsCommand::Create {
            username,
            email,
            password,
            domain,
            package_id,
        } => {
            let password = match password {
                Some(p) => p,
                None => util::prompt_password()?,
            };
            let new = NewAccount {
                username,
                email,
                password,
                domain,
                package_id,
            };
            let created = client.create_account(&new).await?;
            util::print_ack(created.message.as_deref(), "Account created", global.quiet);
            Ok(())
        }

        AccountsCommand::Update {
            id,
            email,
            password,
            package_id,
        } => {
            let update = AccountUpdate {
                email,
                password,
                package_id,
            };
            let ack = client.update_account(id, &update).await?;
            util::print_ack(ack.message.as_deref(), "Account updated", global.quiet);
            Ok(())
        }

        AccountsCommand::Delete { id } => {
            if !util::confirm(&format!("Delete account {id}?"), global.yes)? {
                return Ok(());
            }
            let ack = client.delete_account(id).await?;
            util::print_ack(ack.message.as_deref(), "Account deleted", global.quiet);
            Ok(())
        }

        AccountsCommand::Suspend { id } => {
            if !util::confirm(&format!("Suspend account {id}?"), global.yes)? {
                return Ok(());
            }
            let ack = client.suspend_account(id).await?;
            util::print_ack(ack.message.as_deref(), "Account suspended", global.quiet);
            Ok(())
        }

        AccountsCommand::Unsuspend { id } => {
            let ack = client.unsuspend_account(id).await?;
            util::print_ack(ack.message.as_deref(), "Account unsuspended", global.quiet);
            Ok(())
        }
    }
}

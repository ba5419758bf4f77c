//! User command handlers.

use tabled::Tabled;

use panelops_core::PanelClient;
use panelops_core::models::{NewUser, Role, User, UserUpdate};

use crate::cli::{GlobalOpts, UsersArgs, UsersCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Active")]
    active: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role.to_string(),
            active: util::yes_no(user.active),
            created: util::timestamp(user.created_at),
        }
    }
}

fn detail(user: &User) -> String {
    format!(
        "Username:  {}\n\
         Email:     {}\n\
         Role:      {}\n\
         Active:    {}\n\
         Created:   {}\n\
         User ID:   {}",
        user.username,
        user.email,
        user.role,
        util::yes_no(user.active),
        util::timestamp(user.created_at),
        user.id
    )
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &PanelClient,
    args: UsersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        UsersCommand::List => {
            let users = client.list_users().await?;
            let out = output::render_list(&global.output, &users, UserRow::from, |u| {
                u.username.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        UsersCommand::Get { id } => {
            let user = client.get_user(id).await?;
            let out = output::render_single(&global.output, &user, detail, |u| u.username.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        UsersCommand::Create {
            username,
            email,
            password,
            role,
        } => {
            let password = match password {
                Some(p) => p,
                None => util::prompt_password()?,
            };
            let new = NewUser {
                username,
                email,
                password,
                role: Role::from(role),
            };
            let created = client.create_user(&new).await?;
            util::print_ack(created.message.as_deref(), "User created", global.quiet);
            Ok(())
        }

        UsersCommand::Update {
            id,
            email,
            password,
            role,
            active,
        } => {
            let update = UserUpdate {
                email,
                password,
                role: role.map(Role::from),
                active,
            };
            let ack = client.update_user(id, &update).await?;
            util::print_ack(ack.message.as_deref(), "User updated", global.quiet);
            Ok(())
        }

        UsersCommand::Delete { id } => {
            if !util::confirm(&format!("Delete user {id}?"), global.yes)? {
                return Ok(());
            }
            let ack = client.delete_user(id).await?;
            util::print_ack(ack.message.as_deref(), "User deleted", global.quiet);
            Ok(())
        }
    }
}

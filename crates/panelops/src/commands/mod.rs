//! Command dispatch: bridges CLI args -> gateway calls -> output formatting.

pub mod accounts;
pub mod auth;
pub mod config_cmd;
pub mod dashboard;
pub mod databases;
pub mod domains;
pub mod packages;
pub mod queue;
pub mod system;
pub mod users;
pub mod util;

use panelops_core::PanelClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a panel-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &PanelClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Login(args) => auth::login(client, args, global).await,
        Command::Logout => auth::logout(client, global).await,
        Command::Whoami => auth::whoami(client, global).await,
        Command::Ping => system::ping(client, global).await,
        Command::Dashboard => dashboard::handle(client, global).await,
        Command::Queue(args) => queue::handle(client, args, global).await,
        Command::Users(args) => users::handle(client, args, global).await,
        Command::Packages(args) => packages::handle(client, args, global).await,
        Command::Domains(args) => domains::handle(client, args, global).await,
        Command::Databases(args) => databases::handle(client, args, global).await,
        Command::Accounts(args) => accounts::handle(client, args, global).await,
        Command::System(args) => system::handle(client, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}

//! Clap derive structures for the `panelops` CLI.
//!
//! The full command tree, plus the global flags and value enums every
//! subcommand shares.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Entry Point ──────────────────────────────────────────────────────

/// panelops -- scriptable administration for hosting control panels
#[derive(Debug, Parser)]
#[command(
    name = "panelops",
    version,
    about = "Manage a hosting control panel from the command line",
    long_about = "A CLI for administering hosting control panel servers.\n\n\
        Talks to the panel's v1 HTTP API with bearer-token auth. Log in once\n\
        with `panelops login`; the session is cached and reused until the\n\
        server expires it.",
    arg_required_else_help = true,
    subcommand_required = true,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub global: GlobalOpts,
}

// ── Global Flags ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config profile to connect with
    #[arg(long, short = 'p', env = "PANELOPS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Panel server URL (takes precedence over the profile)
    #[arg(long, short = 's', env = "PANELOPS_SERVER", global = true)]
    pub server: Option<String>,

    /// How to render results
    #[arg(long, short = 'o', env = "PANELOPS_OUTPUT", default_value = "table", global = true)]
    pub output: OutputFormat,

    /// When to colorize output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Raise log verbosity (repeat for more)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print errors only
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Answer yes to every confirmation prompt
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Tolerate self-signed TLS certificates
    #[arg(long, short = 'k', env = "PANELOPS_INSECURE", global = true)]
    pub insecure: bool,

    /// HTTP request timeout in seconds
    #[arg(long, env = "PANELOPS_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Shared Value Enums ───────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Aligned table, the interactive default
    Table,
    /// Indented JSON
    Json,
    /// One-line JSON for piping
    JsonCompact,
    /// YAML document
    Yaml,
    /// Bare identifiers, one per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Color only when stdout is an interactive terminal
    Auto,
    /// Force color on
    Always,
    /// Force color off
    Never,
}

// ── Subcommands ──────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and cache the session token
    Login(LoginArgs),

    /// Log out and discard the cached session
    Logout,

    /// Show the identity behind the current session
    Whoami,

    /// Check that the panel server is reachable (no auth needed)
    Ping,

    /// Show panel-wide totals and live system metrics
    #[command(alias = "dash")]
    Dashboard,

    /// Inspect and manage the mail/cron task queue
    #[command(alias = "q")]
    Queue(QueueArgs),

    /// Manage panel users
    #[command(alias = "u")]
    Users(UsersArgs),

    /// Manage hosting packages (plans)
    #[command(alias = "pkg")]
    Packages(PackagesArgs),

    /// Manage hosted domains
    #[command(alias = "dom")]
    Domains(DomainsArgs),

    /// Manage provisioned databases
    #[command(alias = "db")]
    Databases(DatabasesArgs),

    /// Manage hosting accounts
    #[command(alias = "acct")]
    Accounts(AccountsArgs),

    /// System stats and managed services
    #[command(alias = "sys")]
    System(SystemArgs),

    /// Inspect and edit CLI configuration
    Config(ConfigArgs),

    /// Emit completion scripts for your shell
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  AUTH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username to log in as (falls back to profile, then a prompt)
    #[arg(long, short = 'u')]
    pub username: Option<String>,

    /// Read the password from the first line of stdin (scripting)
    #[arg(long)]
    pub password_stdin: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  QUEUE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct QueueArgs {
    #[command(subcommand)]
    pub command: QueueCommand,
}

#[derive(Debug, Subcommand)]
pub enum QueueCommand {
    /// Show the current mail queue and scheduled cron jobs
    #[command(alias = "status")]
    Show,

    /// Ask the server to flush the mail queue
    Flush,

    /// Poll the queue and re-render on every change (Ctrl-C to stop)
    Watch {
        /// Seconds between polls
        #[arg(long, default_value = "10")]
        interval: u64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  USERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List panel users
    #[command(alias = "ls")]
    List,

    /// Get one user by ID
    Get {
        /// User ID
        id: i64,
    },

    /// Create a user
    Create {
        #[arg(long)]
        username: String,

        #[arg(long)]
        email: String,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,

        /// Panel role, e.g. "admin" or "user"
        #[arg(long, default_value = "user")]
        role: String,
    },

    /// Update a user (only the given fields change)
    Update {
        /// User ID
        id: i64,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        password: Option<String>,

        #[arg(long)]
        role: Option<String>,

        /// Enable or disable the user
        #[arg(long, action = clap::ArgAction::Set)]
        active: Option<bool>,
    },

    /// Delete a user
    #[command(alias = "rm")]
    Delete {
        /// User ID
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PACKAGES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PackagesArgs {
    #[command(subcommand)]
    pub command: PackagesCommand,
}

#[derive(Debug, Subcommand)]
pub enum PackagesCommand {
    /// List hosting packages
    #[command(alias = "ls")]
    List,

    /// Get one package by ID
    Get {
        /// Package ID
        id: i64,
    },

    /// Create a package (0 means unlimited for every quota)
    Create {
        #[arg(long)]
        name: String,

        /// Disk quota in MB
        #[arg(long, default_value = "0")]
        disk_quota: i64,

        /// Monthly bandwidth quota in MB
        #[arg(long, default_value = "0")]
        bandwidth_quota: i64,

        #[arg(long, default_value = "0")]
        max_domains: i64,

        #[arg(long, default_value = "0")]
        max_databases: i64,

        #[arg(long, default_value = "0")]
        max_emails: i64,

        #[arg(long, default_value = "0")]
        max_ftp: i64,
    },

    /// Update a package (only the given fields change)
    Update {
        /// Package ID
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        disk_quota: Option<i64>,

        #[arg(long)]
        bandwidth_quota: Option<i64>,

        #[arg(long)]
        max_domains: Option<i64>,

        #[arg(long)]
        max_databases: Option<i64>,

        #[arg(long)]
        max_emails: Option<i64>,

        #[arg(long)]
        max_ftp: Option<i64>,
    },

    /// Delete a package
    #[command(alias = "rm")]
    Delete {
        /// Package ID
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DOMAINS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DomainsArgs {
    #[command(subcommand)]
    pub command: DomainsCommand,
}

#[derive(Debug, Subcommand)]
pub enum DomainsCommand {
    /// List hosted domains
    #[command(alias = "ls")]
    List,

    /// Get one domain by ID
    Get {
        /// Domain ID
        id: i64,
    },

    /// Add a domain (the server derives the document root when omitted)
    Create {
        /// Fully qualified domain name
        name: String,

        /// Document root path on the server
        #[arg(long)]
        document_root: Option<String>,
    },

    /// Update a domain (only the given fields change)
    Update {
        /// Domain ID
        id: i64,

        #[arg(long)]
        document_root: Option<String>,

        /// Enable or disable SSL
        #[arg(long, action = clap::ArgAction::Set)]
        ssl: Option<bool>,

        /// Enable or disable the domain
        #[arg(long, action = clap::ArgAction::Set)]
        active: Option<bool>,
    },

    /// Delete a domain
    #[command(alias = "rm")]
    Delete {
        /// Domain ID
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DATABASES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DatabasesArgs {
    #[command(subcommand)]
    pub command: DatabasesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DatabasesCommand {
    /// List provisioned databases
    #[command(alias = "ls")]
    List,

    /// Get one database by ID
    Get {
        /// Database ID
        id: i64,
    },

    /// Create a database (engine defaults to mysql on the server)
    Create {
        /// Database name
        name: String,

        /// Engine, e.g. "mysql" or "postgresql"
        #[arg(long = "type", value_name = "ENGINE")]
        kind: Option<String>,
    },

    /// Update a database (only the given fields change)
    Update {
        /// Database ID
        id: i64,

        /// Engine, e.g. "mysql" or "postgresql"
        #[arg(long = "type", value_name = "ENGINE")]
        kind: Option<String>,
    },

    /// Delete a database
    #[command(alias = "rm")]
    Delete {
        /// Database ID
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ACCOUNTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AccountsArgs {
    #[command(subcommand)]
    pub command: AccountsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AccountsCommand {
    /// List hosting accounts
    #[command(alias = "ls")]
    List,

    /// Get one account by ID
    Get {
        /// Account ID
        id: i64,
    },

    /// Create a hosting account (user + primary domain + package)
    Create {
        #[arg(long)]
        username: String,

        #[arg(long)]
        email: String,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,

        /// Primary domain for the account
        #[arg(long)]
        domain: String,

        /// Hosting package ID
        #[arg(long)]
        package_id: i64,
    },

    /// Update an account (only the given fields change)
    Update {
        /// Account ID
        id: i64,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        password: Option<String>,

        #[arg(long)]
        package_id: Option<i64>,
    },

    /// Delete an account
    #[command(alias = "rm")]
    Delete {
        /// Account ID
        id: i64,
    },

    /// Suspend an account
    Suspend {
        /// Account ID
        id: i64,
    },

    /// Lift a suspension
    Unsuspend {
        /// Account ID
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SYSTEM
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SystemArgs {
    #[command(subcommand)]
    pub command: SystemCommand,
}

/// Host telemetry, plus the one mutation in the group: service restart.
#[derive(Debug, Subcommand)]
pub enum SystemCommand {
    /// Show live CPU, memory, disk, and load figures
    Stats,

    /// List managed services and their states
    Services,

    /// Restart a managed service
    Restart {
        /// Service name, e.g. "nginx"
        service: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Local config management. None of these touch the network.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive wizard: create or replace a profile
    Init,

    /// Print the effective configuration (secrets masked)
    Show,

    /// Print the config file path
    Path,

    /// List the profiles defined in the config file
    Profiles,

    /// Set one key on the active profile
    Set {
        /// Key: server, username, insecure, timeout, ca_cert
        key: String,

        /// New value
        value: String,
    },

    /// Switch the default profile
    Use {
        /// Profile to make the default
        name: String,
    },

    /// Store a profile's password in the system keyring
    SetPassword {
        /// Profile to store it for (defaults to the active profile)
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell for the completion script
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

//! Clap derive structures for the `flowerhub` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// flowerhub -- command-line client for the Flowerhub portal
#[derive(Debug, Parser)]
#[command(
    name = "flowerhub",
    version,
    about = "Query your Flowerhub home battery from the command line",
    long_about = "Log in to the Flowerhub portal, read the battery status, watch it\n\
        on an interval, and fetch invoices, consumption, revenue and uptime.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Account profile to use
    #[arg(long, short = 'p', env = "FLOWERHUB_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Portal API root (overrides profile)
    #[arg(long, env = "FLOWERHUB_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Portal username (overrides profile)
    #[arg(long, short = 'u', global = true)]
    pub username: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "FLOWERHUB_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "FLOWERHUB_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and show the account the session belongs to
    Login,

    /// Discover the asset and read its current status
    #[command(alias = "ro")]
    Readout,

    /// Show the asset's hardware and connection status
    #[command(alias = "st")]
    Status,

    /// Poll the asset status on an interval
    #[command(alias = "w")]
    Watch(WatchArgs),

    /// Show the asset owner's profile
    Profile,

    /// Show the asset owner's account details
    Details,

    /// Show the electricity agreement
    Agreement,

    /// List invoices
    #[command(alias = "inv")]
    Invoices,

    /// List consumption readings
    Consumption,

    /// Show revenue for the last invoice period
    Revenue,

    /// Asset uptime statistics
    Uptime(UptimeArgs),

    /// Show a portal system notification
    Notification(NotificationArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Watch ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Interval between status fetches (e.g. 30s, 2m); minimum 5s
    #[arg(long, short = 'i', value_parser = humantime::parse_duration)]
    pub interval: Option<Duration>,

    /// Fetch once right away instead of waiting a full interval
    #[arg(long)]
    pub immediate: bool,

    /// Exit after this many status updates
    #[arg(long, short = 'n')]
    pub count: Option<usize>,
}

// ── Uptime ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct UptimeArgs {
    #[command(subcommand)]
    pub command: UptimeCommand,
}

#[derive(Debug, Subcommand)]
pub enum UptimeCommand {
    /// Months with uptime data
    Months,

    /// Monthly uptime ratio
    History,

    /// Uptime / downtime / no-data split for one month
    Pie {
        /// Month in YYYY-MM form
        #[arg(long)]
        period: String,
    },
}

// ── Notification ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct NotificationArgs {
    /// Notification slug (e.g. active-flower, active-zavann)
    #[arg(long, default_value = flowerhub_api::DEFAULT_NOTIFICATION_SLUG)]
    pub slug: String,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive configuration wizard
    Init,

    /// Print the effective configuration
    Show,

    /// Store the profile's password in the system keyring
    SetPassword,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}

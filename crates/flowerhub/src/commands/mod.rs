//! Command dispatch: bridges CLI args -> client calls -> output formatting.

pub mod account;
pub mod asset;
pub mod billing;
pub mod config_cmd;
pub mod notification;
pub mod util;
pub mod watch;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

use self::util::Connection;

/// Dispatch a portal-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    conn: &Connection,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Login => account::login(conn, global),
        Command::Profile => account::profile(conn, global).await,
        Command::Details => account::details(conn, global).await,
        Command::Readout => asset::readout(conn, global).await,
        Command::Status => asset::status(conn, global).await,
        Command::Revenue => asset::revenue(conn, global).await,
        Command::Uptime(args) => asset::uptime(conn, args, global).await,
        Command::Agreement => billing::agreement(conn, global).await,
        Command::Invoices => billing::invoices(conn, global).await,
        Command::Consumption => billing::consumption(conn, global).await,
        Command::Notification(args) => notification::handle(conn, args, global).await,
        Command::Watch(args) => watch::handle(conn, args, global).await,
        // Config and Completions are handled before connecting
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "config and completions do not need a portal session".into(),
        )),
    }
}

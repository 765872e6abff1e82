//! System notification handler.

use serde_json::Value;

use crate::cli::{GlobalOpts, NotificationArgs};
use crate::error::CliError;
use crate::output;

use super::util::{self, Connection};

/// The payload has no fixed schema; table mode shows it as JSON.
fn detail(payload: &Value) -> String {
    match payload {
        Value::Null => "(none)".into(),
        Value::String(s) => s.clone(),
        other => output::render_json_pretty(other),
    }
}

pub async fn handle(
    conn: &Connection,
    args: NotificationArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let result = conn
        .client
        .fetch_system_notification(Some(&args.slug), true)
        .await
        .map_err(|e| conn.api_err(e))?;
    let payload = util::into_data(result, "notification")?;

    let out = output::render_single(&global.output, &payload, detail, |_| args.slug.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}

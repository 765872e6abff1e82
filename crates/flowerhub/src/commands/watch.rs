//! `watch`: stream asset status updates from the background poller.

use std::sync::Arc;

use tokio::sync::{Notify, mpsc};

use flowerhub_api::{PollConfig, StatusSnapshot};

use crate::cli::{GlobalOpts, OutputFormat, WatchArgs};
use crate::error::CliError;
use crate::output::{self, or_dash, paint_status};

use super::util::{self, Connection};

const UPDATE_BUFFER: usize = 16;

/// One line (or document) per update.
fn render_update(format: &OutputFormat, snapshot: &StatusSnapshot, color: bool) -> String {
    match format {
        // NDJSON so the stream stays line-parseable.
        OutputFormat::Json | OutputFormat::JsonCompact => output::render_json_compact(snapshot),
        OutputFormat::Yaml => format!("---\n{}", output::render_yaml(snapshot).trim_end()),
        OutputFormat::Plain => or_dash(snapshot.status.as_deref()),
        OutputFormat::Table => format!(
            "{}  {}  {}",
            or_dash(
                snapshot
                    .observed_at
                    .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            ),
            paint_status(snapshot.status.as_deref(), color),
            snapshot.message.as_deref().unwrap_or("")
        )
        .trim_end()
        .to_owned(),
    }
}

pub async fn handle(
    conn: &Connection,
    args: WatchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let asset_id = conn.asset_id().await?;
    let interval = match args.interval {
        Some(interval) => interval,
        None => flowerhub_config::poll_interval(&conn.profile, &conn.config.defaults)?,
    };

    // A 401 that survives refresh lands here; the session is rebuilt by
    // logging in again and the poller picks it up on its next cycle.
    let relogin = Arc::new(Notify::new());
    {
        let relogin = Arc::clone(&relogin);
        conn.client.set_on_auth_failed(move || relogin.notify_one());
    }

    let (tx, mut rx) = mpsc::channel(UPDATE_BUFFER);
    conn.client
        .start_periodic_asset_fetch(
            PollConfig::new(interval)
                .run_immediately(args.immediate)
                .sink(tx),
        )
        .map_err(|e| conn.api_err(e))?;
    tracing::info!(
        asset_id,
        interval = %humantime::format_duration(interval),
        "watching asset status"
    );

    let color = output::should_color(&global.color);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut seen = 0usize;

    let result = loop {
        tokio::select! {
            biased;

            _ = &mut ctrl_c => break Ok(()),

            () = relogin.notified() => {
                tracing::warn!("session rejected, logging in again");
                let login = util::login(&conn.client, &conn.credentials, &conn.profile_name);
                if let Err(e) = login.await {
                    break Err(e);
                }
            }

            update = rx.recv() => {
                let Some(snapshot) = update else { break Ok(()) };
                let line = render_update(&global.output, &snapshot, color);
                output::print_output(&line, global.quiet);
                seen += 1;
                if args.count.is_some_and(|n| seen >= n) {
                    break Ok(());
                }
            }
        }
    };

    conn.client.stop_periodic_asset_fetch();
    result
}

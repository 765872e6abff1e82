//! Asset command handlers: readout, status, revenue, uptime.

use tabled::Tabled;

use flowerhub_api::ReadoutResult;
use flowerhub_api::models::{Asset, Revenue, UptimeHistoryEntry, UptimeMonth, UptimePie};

use crate::cli::{GlobalOpts, UptimeArgs, UptimeCommand};
use crate::error::CliError;
use crate::output::{self, or_dash, paint_status};

use super::util::{self, Connection};

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct UptimeMonthRow {
    #[tabled(rename = "Period")]
    value: String,
    #[tabled(rename = "Label")]
    label: String,
}

impl From<&UptimeMonth> for UptimeMonthRow {
    fn from(m: &UptimeMonth) -> Self {
        Self {
            value: m.value.clone(),
            label: m.label.clone(),
        }
    }
}

#[derive(Tabled)]
struct UptimeHistoryRow {
    #[tabled(rename = "Month")]
    date: String,
    #[tabled(rename = "Uptime")]
    uptime: String,
}

impl From<&UptimeHistoryEntry> for UptimeHistoryRow {
    fn from(h: &UptimeHistoryEntry) -> Self {
        Self {
            date: h.date.clone(),
            uptime: percent(h.uptime),
        }
    }
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "-".into(), |v| format!("{v:.2}%"))
}

// ── Detail views ────────────────────────────────────────────────────

fn hardware_lines(asset: &Asset) -> Vec<String> {
    let inverter = asset.inverter.as_ref();
    let battery = asset.battery.as_ref();
    vec![
        format!(
            "Inverter:     {} {}",
            inverter
                .and_then(|i| i.manufacturer_name.as_deref())
                .unwrap_or("-"),
            inverter.and_then(|i| i.name.as_deref()).unwrap_or("")
        )
        .trim_end()
        .to_owned(),
        format!(
            "Battery:      {} {}",
            battery
                .and_then(|b| b.manufacturer_name.as_deref())
                .unwrap_or("-"),
            battery.and_then(|b| b.name.as_deref()).unwrap_or("")
        )
        .trim_end()
        .to_owned(),
        format!(
            "Capacity:     {}",
            battery
                .and_then(|b| b.energy_capacity)
                .map_or_else(|| "-".into(), |c| format!("{c} kWh"))
        ),
        format!(
            "Fuse:         {}",
            asset.fuse_size.map_or_else(|| "-".into(), |f| format!("{f} A"))
        ),
        format!("Installed:    {}", or_dash(asset.is_installed)),
    ]
}

fn status_detail(asset: &Asset, color: bool) -> String {
    let fhs = asset.flower_hub_status.as_ref();
    let mut lines = vec![format!("Asset:        {}", or_dash(asset.id))];
    lines.extend(hardware_lines(asset));
    lines.push(format!(
        "Status:       {}",
        paint_status(fhs.and_then(|s| s.status.as_deref()), color)
    ));
    lines.push(format!(
        "Message:      {}",
        fhs.and_then(|s| s.message.as_deref()).unwrap_or("-")
    ));
    lines.join("\n")
}

fn readout_detail(r: &ReadoutResult, color: bool) -> String {
    let mut lines = vec![
        format!("Asset owner:  {}", r.asset_owner_id),
        format!("Asset:        {}", or_dash(r.asset_id)),
    ];
    if let Some(err) = &r.with_asset.error {
        lines.push(format!("Discovery:    {err}"));
    }
    match &r.asset {
        Some(fetch) => {
            if let Some(asset) = &fetch.data {
                lines.extend(hardware_lines(asset));
            }
            if let Some(err) = &fetch.error {
                lines.push(format!("Asset fetch:  {err}"));
            }
        }
        None => lines.push("Asset fetch:  skipped (no asset id)".into()),
    }
    let status = r.status.as_deref();
    lines.push(format!(
        "Status:       {}",
        paint_status(status.and_then(|s| s.status.as_deref()), color)
    ));
    lines.push(format!(
        "Message:      {}",
        status.and_then(|s| s.message.as_deref()).unwrap_or("-")
    ));
    lines.push(format!(
        "Observed:     {}",
        or_dash(status.and_then(|s| s.observed_at).map(|t| t.to_rfc3339()))
    ));
    lines.join("\n")
}

fn revenue_detail(r: &Revenue) -> String {
    let num = |v: Option<f64>, unit: &str| {
        v.map_or_else(|| "-".into(), |v| format!("{v:.2}{unit}"))
    };
    [
        format!("ID:                  {}", or_dash(r.id)),
        format!(
            "Min available power: {}",
            num(r.min_available_power, " kW")
        ),
        format!("Compensation:        {}", num(r.compensation, "")),
        format!("Compensation / kW:   {}", num(r.compensation_per_kw, "")),
    ]
    .join("\n")
}

fn pie_detail(p: &UptimePie) -> String {
    let secs = |name: &str| {
        p.slice_value(name)
            .map_or_else(|| "-".into(), |v| format!("{v:.0}s"))
    };
    [
        format!("Uptime:    {}", secs("uptime")),
        format!("Downtime:  {}", secs("downtime")),
        format!("No data:   {}", secs("noData")),
        format!("Ratio:     {}", percent(p.uptime_ratio)),
    ]
    .join("\n")
}

// ── Handlers ────────────────────────────────────────────────────────

/// Discover the asset and read its status in one go.
pub async fn readout(conn: &Connection, global: &GlobalOpts) -> Result<(), CliError> {
    let result = conn
        .client
        .readout_sequence(None)
        .await
        .map_err(|e| conn.api_err(e))?;

    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &result,
        |r| readout_detail(r, color),
        |r| or_dash(r.status.as_deref().and_then(|s| s.status.clone())),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn status(conn: &Connection, global: &GlobalOpts) -> Result<(), CliError> {
    let asset_id = conn.asset_id().await?;
    let result = conn
        .client
        .fetch_asset(Some(asset_id), true)
        .await
        .map_err(|e| conn.api_err(e))?;
    let asset = util::into_data(result, "asset")?;

    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &asset,
        |a| status_detail(a, color),
        |a| {
            or_dash(
                a.flower_hub_status
                    .as_ref()
                    .and_then(|s| s.status.clone()),
            )
        },
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn revenue(conn: &Connection, global: &GlobalOpts) -> Result<(), CliError> {
    let asset_id = conn.asset_id().await?;
    let result = conn
        .client
        .fetch_revenue(Some(asset_id), true)
        .await
        .map_err(|e| conn.api_err(e))?;
    let revenue = util::into_data(result, "revenue")?;

    let out = output::render_single(&global.output, &revenue, revenue_detail, |r| {
        or_dash(r.compensation)
    });
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn uptime(
    conn: &Connection,
    args: UptimeArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let asset_id = conn.asset_id().await?;
    let client = &conn.client;

    let out = match args.command {
        UptimeCommand::Months => {
            let result = client
                .fetch_uptime_months(Some(asset_id), true)
                .await
                .map_err(|e| conn.api_err(e))?;
            let months = util::into_data(result, "uptime months")?;
            output::render_list(&global.output, &months, |m| UptimeMonthRow::from(m), |m| {
                m.value.clone()
            })
        }

        UptimeCommand::History => {
            let result = client
                .fetch_uptime_history(Some(asset_id), true)
                .await
                .map_err(|e| conn.api_err(e))?;
            let history = util::into_data(result, "uptime history")?;
            output::render_list(&global.output, &history, |h| UptimeHistoryRow::from(h), |h| {
                format!("{}\t{}", h.date, or_dash(h.uptime))
            })
        }

        UptimeCommand::Pie { period } => {
            let result = client
                .fetch_uptime_pie(&period, Some(asset_id), true)
                .await
                .map_err(|e| conn.api_err(e))?;
            let pie = util::into_data(result, "uptime pie")?;
            output::render_single(&global.output, &pie, pie_detail, |p| {
                or_dash(p.uptime_ratio)
            })
        }
    };

    output::print_output(&out, global.quiet);
    Ok(())
}

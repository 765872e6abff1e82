//! Billing command handlers: agreement, invoices, consumption.

use tabled::Tabled;

use flowerhub_api::models::{AgreementState, ConsumptionRecord, ElectricityAgreement, Invoice};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{self, or_dash};

use super::util::{self, Connection};

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct InvoiceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Lines")]
    lines: usize,
}

impl From<&Invoice> for InvoiceRow {
    fn from(i: &Invoice) -> Self {
        Self {
            id: i.id.clone(),
            month: or_dash(i.invoiced_month.as_deref()),
            due: or_dash(i.due_date.as_deref()),
            total: or_dash(i.total_amount.as_deref()),
            remaining: or_dash(i.remaining_amount.as_deref()),
            status: or_dash(i.invoice_status.as_deref()),
            lines: i.invoice_lines.len(),
        }
    }
}

#[derive(Tabled)]
struct ConsumptionRow {
    #[tabled(rename = "Site")]
    site: String,
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Volume")]
    volume: String,
    #[tabled(rename = "Type")]
    kind: String,
}

impl From<&ConsumptionRecord> for ConsumptionRow {
    fn from(c: &ConsumptionRecord) -> Self {
        Self {
            site: c.site_id.clone(),
            month: c.invoiced_month.clone(),
            from: c.valid_from.clone(),
            to: or_dash(c.valid_to.as_deref()),
            volume: c.volume.map_or_else(|| "-".into(), |v| format!("{v:.2}")),
            kind: c.kind.clone(),
        }
    }
}

// ── Detail views ────────────────────────────────────────────────────

fn state_lines(label: &str, state: Option<&AgreementState>) -> Vec<String> {
    let Some(s) = state else {
        return vec![format!("{label}: -")];
    };
    vec![
        format!("{label}:"),
        format!("  Category:    {}", or_dash(s.state_category.as_deref())),
        format!("  Site:        {}", or_dash(s.site_id)),
        format!("  Start:       {}", or_dash(s.start_date.as_deref())),
        format!("  Terminated:  {}", or_dash(s.termination_date.as_deref())),
    ]
}

fn agreement_detail(a: &ElectricityAgreement) -> String {
    let mut lines = state_lines("Consumption", a.consumption.as_ref());
    lines.extend(state_lines("Production", a.production.as_ref()));
    lines.join("\n")
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn agreement(conn: &Connection, global: &GlobalOpts) -> Result<(), CliError> {
    let result = conn
        .client
        .fetch_electricity_agreement(None, true)
        .await
        .map_err(|e| conn.api_err(e))?;
    let agreement = util::into_data(result, "electricity agreement")?;

    let out = output::render_single(&global.output, &agreement, agreement_detail, |a| {
        or_dash(
            a.consumption
                .as_ref()
                .and_then(|s| s.state_category.clone()),
        )
    });
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn invoices(conn: &Connection, global: &GlobalOpts) -> Result<(), CliError> {
    let result = conn
        .client
        .fetch_invoices(None, true)
        .await
        .map_err(|e| conn.api_err(e))?;
    let invoices = util::into_data(result, "invoice")?;

    let out = output::render_list(
        &global.output,
        &invoices,
        |i| InvoiceRow::from(i),
        |i| i.id.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn consumption(conn: &Connection, global: &GlobalOpts) -> Result<(), CliError> {
    let result = conn
        .client
        .fetch_consumption(None, true)
        .await
        .map_err(|e| conn.api_err(e))?;
    let records = util::into_data(result, "consumption")?;

    let out = output::render_list(
        &global.output,
        &records,
        |c| ConsumptionRow::from(c),
        |c| format!("{}\t{}", c.invoiced_month, or_dash(c.volume)),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agreement_without_production() {
        let a = ElectricityAgreement {
            consumption: Some(AgreementState {
                state_category: Some("Active".into()),
                site_id: Some(7),
                ..AgreementState::default()
            }),
            production: None,
        };
        let out = agreement_detail(&a);
        assert!(out.contains("Category:    Active"));
        assert!(out.contains("Site:        7"));
        assert!(out.ends_with("Production: -"));
    }

    #[test]
    fn invoice_row_counts_lines() {
        let invoice = Invoice {
            id: "inv-1".into(),
            total_amount: Some("123.45".into()),
            ..Invoice::default()
        };
        let row = InvoiceRow::from(&invoice);
        assert_eq!(row.total, "123.45");
        assert_eq!(row.due, "-");
        assert_eq!(row.lines, 0);
    }
}

//! Account command handlers: login, owner profile and details.

use serde::Serialize;

use flowerhub_api::models::{AssetOwnerDetails, AssetOwnerProfile, PostalAddress};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{self, or_dash};

use super::util::{self, Connection};

// ── Login ───────────────────────────────────────────────────────────

#[derive(Serialize)]
struct LoginSummary {
    profile: String,
    asset_owner_id: Option<i64>,
    email: Option<String>,
    name: Option<String>,
    refresh_token_expires: Option<String>,
}

fn login_detail(s: &LoginSummary) -> String {
    [
        format!("Profile:        {}", s.profile),
        format!("Asset owner:    {}", or_dash(s.asset_owner_id)),
        format!("Email:          {}", s.email.as_deref().unwrap_or("-")),
        format!("Name:           {}", s.name.as_deref().unwrap_or("-")),
        format!(
            "Token expires:  {}",
            s.refresh_token_expires.as_deref().unwrap_or("-")
        ),
    ]
    .join("\n")
}

/// Report the login performed while connecting.
pub fn login(conn: &Connection, global: &GlobalOpts) -> Result<(), CliError> {
    let result = &conn.login;
    let user = result.login.as_ref().and_then(|l| l.user.as_ref());
    let summary = LoginSummary {
        profile: conn.profile_name.clone(),
        asset_owner_id: conn.client.owner_id(),
        email: user.and_then(|u| u.email.clone()),
        name: user.and_then(|u| u.name.clone()),
        refresh_token_expires: result
            .login
            .as_ref()
            .and_then(|l| l.refresh_token_expiration_date.clone()),
    };

    let out = output::render_single(&global.output, &summary, login_detail, |s| {
        or_dash(s.asset_owner_id)
    });
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Profile ─────────────────────────────────────────────────────────

fn address(a: &PostalAddress) -> String {
    let parts: Vec<&str> = [&a.street, &a.postal_code, &a.city]
        .into_iter()
        .filter_map(|p| p.as_deref())
        .collect();
    if parts.is_empty() {
        "-".into()
    } else {
        parts.join(", ")
    }
}

fn full_name(first: Option<&str>, last: Option<&str>) -> String {
    match (first, last) {
        (None, None) => "-".into(),
        (first, last) => [first, last].into_iter().flatten().collect::<Vec<_>>().join(" "),
    }
}

fn profile_detail(p: &AssetOwnerProfile) -> String {
    [
        format!("ID:         {}", or_dash(p.id)),
        format!(
            "Name:       {}",
            full_name(p.first_name.as_deref(), p.last_name.as_deref())
        ),
        format!("Email:      {}", p.main_email.as_deref().unwrap_or("-")),
        format!("Contact:    {}", p.contact_email.as_deref().unwrap_or("-")),
        format!("Phone:      {}", p.phone.as_deref().unwrap_or("-")),
        format!("Address:    {}", address(&p.address)),
        format!("Status:     {}", p.account_status.as_deref().unwrap_or("-")),
        format!("Installer:  {}", p.installer.name.as_deref().unwrap_or("-")),
    ]
    .join("\n")
}

pub async fn profile(conn: &Connection, global: &GlobalOpts) -> Result<(), CliError> {
    let result = conn
        .client
        .fetch_owner_profile(None, true)
        .await
        .map_err(|e| conn.api_err(e))?;
    let profile = util::into_data(result, "profile")?;

    let out = output::render_single(&global.output, &profile, profile_detail, |p| {
        or_dash(p.id)
    });
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Details ─────────────────────────────────────────────────────────

fn details_detail(d: &AssetOwnerDetails) -> String {
    let model = &d.asset.asset_model;
    let model_name = match (model.manufacturer.as_deref(), model.name.as_deref()) {
        (Some(m), Some(n)) => format!("{m} {n}"),
        (m, n) => m.or(n).unwrap_or("-").to_owned(),
    };
    [
        format!("ID:            {}", or_dash(d.id)),
        format!(
            "Name:          {}",
            full_name(d.first_name.as_deref(), d.last_name.as_deref())
        ),
        format!("Installer:     {}", d.installer.name.as_deref().unwrap_or("-")),
        format!("Distributor:   {}", d.distributor.name.as_deref().unwrap_or("-")),
        format!("Asset:         {}", or_dash(d.asset.id)),
        format!("Serial:        {}", d.asset.serial_number.as_deref().unwrap_or("-")),
        format!("Model:         {model_name}"),
        format!(
            "Compensation:  {}",
            d.compensation.status.as_deref().unwrap_or("-")
        ),
        format!(
            "Comp. start:   {}",
            d.bess_compensation_start_date.as_deref().unwrap_or("-")
        ),
    ]
    .join("\n")
}

pub async fn details(conn: &Connection, global: &GlobalOpts) -> Result<(), CliError> {
    let result = conn
        .client
        .fetch_owner_details(None, true)
        .await
        .map_err(|e| conn.api_err(e))?;
    let details = util::into_data(result, "owner details")?;

    let out = output::render_single(&global.output, &details, details_detail, |d| {
        or_dash(d.id)
    });
    output::print_output(&out, global.quiet);
    Ok(())
}

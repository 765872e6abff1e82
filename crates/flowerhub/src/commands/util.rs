//! Shared helpers for command handlers: profile resolution, client
//! construction, and login.

use std::io::IsTerminal;
use std::time::Duration;

use dialoguer::Input;
use secrecy::SecretString;

use flowerhub_api::{ClientConfig, Credentials, FlowerhubClient, LoginResult};
use flowerhub_config::{self as config, Config, ConfigError, Profile};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// A logged-in client plus the profile it was built from.
pub struct Connection {
    pub client: FlowerhubClient,
    pub credentials: Credentials,
    pub config: Config,
    pub profile_name: String,
    pub profile: Profile,
    /// Response of the initial login.
    pub login: LoginResult,
}

impl Connection {
    /// Owner id learned at login.
    pub fn owner_id(&self) -> Result<i64, CliError> {
        self.client.owner_id().ok_or_else(|| CliError::MissingId {
            what: "asset owner id".into(),
        })
    }

    /// Resolve the asset id through discovery (once per process).
    pub async fn asset_id(&self) -> Result<i64, CliError> {
        if let Some(id) = self.client.asset_id() {
            return Ok(id);
        }
        self.client
            .fetch_asset_id(None, true)
            .await
            .map_err(|e| self.api_err(e))?;
        self.client.asset_id().ok_or_else(|| CliError::MissingId {
            what: "asset id".into(),
        })
    }

    /// Convert an API error, naming the active profile on auth failures.
    pub fn api_err(&self, err: flowerhub_api::Error) -> CliError {
        CliError::from(err).with_profile(&self.profile_name)
    }
}

// ── Profile resolution ───────────────────────────────────────────────

/// Load config and pick the active profile.
pub fn load_profile(global: &GlobalOpts) -> Result<(Config, String, Profile), CliError> {
    let cfg = config::load_config()?;
    let name = cfg.active_profile_name(global.profile.as_deref());
    let profile = cfg.profile(&name).map_err(|e| match e {
        ConfigError::UnknownProfile { profile } => {
            let mut names: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
            names.sort_unstable();
            CliError::ProfileNotFound {
                name: profile,
                available: if names.is_empty() {
                    "(none)".into()
                } else {
                    names.join(", ")
                },
            }
        }
        other => other.into(),
    })?;
    Ok((cfg, name, profile))
}

/// Profile translated to a `ClientConfig`, with CLI flag overrides.
pub fn client_config(
    cfg: &Config,
    profile: &Profile,
    global: &GlobalOpts,
) -> Result<ClientConfig, CliError> {
    let mut profile = profile.clone();
    if let Some(ref url) = global.base_url {
        profile.base_url = Some(url.clone());
    }
    let mut client_config = config::profile_to_client_config(&profile, &cfg.defaults)?;
    if let Some(secs) = global.timeout {
        client_config.timeout = Duration::from_secs(secs);
    }
    Ok(client_config)
}

// ── Credentials ──────────────────────────────────────────────────────

/// Resolve credentials: `--username`, the profile chain, then an
/// interactive prompt when stdin is a terminal.
pub fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<Credentials, CliError> {
    let interactive = std::io::stdin().is_terminal();
    let no_credentials = || CliError::NoCredentials {
        profile: profile_name.into(),
    };

    let username = match global
        .username
        .clone()
        .or_else(|| config::resolve_username(profile))
    {
        Some(username) => username,
        None if interactive => Input::<String>::new()
            .with_prompt("Flowerhub username")
            .interact_text()
            .map_err(prompt_err)?,
        None => return Err(no_credentials()),
    };

    let password = match config::resolve_password(profile, profile_name) {
        Some(password) => password,
        None if interactive => {
            let pw = rpassword::prompt_password("Flowerhub password: ").map_err(prompt_err)?;
            SecretString::from(pw)
        }
        None => return Err(no_credentials()),
    };

    Ok(Credentials { username, password })
}

/// Map an interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

// ── Connect ──────────────────────────────────────────────────────────

/// Build a client for the active profile and log in.
pub async fn connect(global: &GlobalOpts) -> Result<Connection, CliError> {
    let (cfg, profile_name, profile) = load_profile(global)?;
    let client_config = client_config(&cfg, &profile, global)?;
    let credentials = resolve_credentials(&profile, &profile_name, global)?;

    let client = FlowerhubClient::new(&client_config)?;
    tracing::debug!(base_url = %client_config.base_url, profile = %profile_name, "connecting");

    let login = login(&client, &credentials, &profile_name).await?;
    Ok(Connection {
        client,
        credentials,
        config: cfg,
        profile_name,
        profile,
        login,
    })
}

/// Log in; a rejected login is an authentication error.
pub async fn login(
    client: &FlowerhubClient,
    credentials: &Credentials,
    profile_name: &str,
) -> Result<LoginResult, CliError> {
    let result = client
        .login(credentials)
        .await
        .map_err(|e| CliError::from(e).with_profile(profile_name))?;

    if !result.is_success() {
        return Err(CliError::AuthFailed {
            profile: profile_name.into(),
            message: format!("login rejected (HTTP {})", result.status_code),
        });
    }
    if result.owner_id().is_none() && client.owner_id().is_none() {
        tracing::warn!("login response carried no asset owner id");
    }
    Ok(result)
}

/// Parsed payload of a raising fetch; an unexpected body shape is an API error.
pub fn into_data<T>(result: flowerhub_api::FetchResult<T>, what: &str) -> Result<T, CliError> {
    let status = result.status_code;
    result.data.ok_or_else(|| CliError::ApiError {
        status,
        message: format!("unexpected {what} response body"),
    })
}

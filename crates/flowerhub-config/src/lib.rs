//! Shared configuration for Flowerhub tools.
//!
//! TOML profiles, credential resolution (env + keyring + secrets file +
//! plaintext), and translation to `flowerhub_api::ClientConfig`. The CLI
//! layers its flag overrides and interactive prompts on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::{BaseDirs, ProjectDirs};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use flowerhub_api::{
    ClientConfig, Credentials, DEFAULT_BASE_URL, DEFAULT_ORIGIN, MIN_POLL_INTERVAL, TlsMode,
};

/// Keyring service name; entries are keyed `<profile>/password`.
pub const KEYRING_SERVICE: &str = "flowerhub";

/// Overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "FLOWERHUB_CONFIG";
pub const USERNAME_ENV: &str = "FLOWERHUB_USERNAME";
pub const PASSWORD_ENV: &str = "FLOWERHUB_PASSWORD";

const SECRETS_FILE_NAME: &str = ".flowerhub_secrets.json";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("unknown profile '{profile}'")]
    UnknownProfile { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named account profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Profile name to use: explicit choice, then `default_profile`, then
    /// `"default"`.
    pub fn active_profile_name(&self, requested: Option<&str>) -> String {
        requested
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }

    /// Look up a profile. A missing `default` profile resolves to an empty
    /// one so the tool works from environment variables alone.
    pub fn profile(&self, name: &str) -> Result<Profile, ConfigError> {
        match self.profiles.get(name) {
            Some(profile) => Ok(profile.clone()),
            None if name == "default" => Ok(Profile::default()),
            None => Err(ConfigError::UnknownProfile {
                profile: name.into(),
            }),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// `watch` interval in seconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
            poll_interval: default_poll_interval(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_poll_interval() -> u64 {
    60
}

/// A named account profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// API root; defaults to the production portal.
    pub base_url: Option<String>,

    /// Origin header override.
    pub origin: Option<String>,

    /// Portal login (email).
    pub username: Option<String>,

    /// Password (plaintext, prefer keyring).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// JSON file with `username`/`password`; defaults to
    /// `~/.flowerhub_secrets.json`.
    pub secrets_file: Option<PathBuf>,

    /// Path to an extra CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Override `watch` interval (seconds).
    pub poll_interval: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `FLOWERHUB_CONFIG`, then platform
/// conventions.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    ProjectDirs::from("se", "flowerhub", "flowerhub").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("flowerhub");
    p
}

/// Default secrets file in the home directory.
pub fn default_secrets_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(SECRETS_FILE_NAME))
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load defaults, then `path` (if present), then `FLOWERHUB_*` variables
/// (`__` separates nesting, e.g. `FLOWERHUB_DEFAULTS__TIMEOUT`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("FLOWERHUB_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Secrets file ────────────────────────────────────────────────────

/// Contents of a `{"username": ..., "password": ...}` secrets file.
#[derive(Debug, Default, Deserialize)]
pub struct SecretsFile {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Read a secrets file. Missing or malformed files yield `None`.
pub fn read_secrets_file(path: &Path) -> Option<SecretsFile> {
    let text = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&text).ok()
}

fn profile_secrets(profile: &Profile) -> Option<SecretsFile> {
    let path = profile.secrets_file.clone().or_else(default_secrets_path)?;
    read_secrets_file(&path)
}

// ── Credential resolution (without CLI flags) ───────────────────────

/// Resolve the username: profile, `FLOWERHUB_USERNAME`, secrets file.
pub fn resolve_username(profile: &Profile) -> Option<String> {
    profile
        .username
        .clone()
        .or_else(|| std::env::var(USERNAME_ENV).ok())
        .or_else(|| profile_secrets(profile)?.username)
        .filter(|u| !u.is_empty())
}

/// Resolve the password from the credential chain (no prompt step).
pub fn resolve_password(profile: &Profile, profile_name: &str) -> Option<SecretString> {
    // 1. Profile's password_env → env var lookup
    if let Some(ref env_name) = profile.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Some(SecretString::from(val));
        }
    }

    // 2. Global env var
    if let Ok(val) = std::env::var(PASSWORD_ENV) {
        return Some(SecretString::from(val));
    }

    // 3. System keyring
    if let Some(pw) = keyring_password(profile_name) {
        return Some(SecretString::from(pw));
    }

    // 4. Secrets file
    if let Some(pw) = profile_secrets(profile).and_then(|s| s.password) {
        return Some(SecretString::from(pw));
    }

    // 5. Plaintext in config
    profile.password.clone().map(SecretString::from)
}

/// Resolve a full credential pair without prompting.
pub fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
) -> Result<Credentials, ConfigError> {
    let no_credentials = || ConfigError::NoCredentials {
        profile: profile_name.into(),
    };
    let username = resolve_username(profile).ok_or_else(no_credentials)?;
    let password = resolve_password(profile, profile_name).ok_or_else(no_credentials)?;
    Ok(Credentials { username, password })
}

fn keyring_password(profile_name: &str) -> Option<String> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password")).ok()?;
    entry.get_password().ok()
}

/// Store a password in the system keyring for `profile_name`.
pub fn store_password(profile_name: &str, password: &SecretString) -> Result<(), ConfigError> {
    use secrecy::ExposeSecret;

    let entry = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password"))?;
    entry.set_password(password.expose_secret())?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

/// Build a `ClientConfig` from a profile, no CLI flag overrides.
pub fn profile_to_client_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<ClientConfig, ConfigError> {
    let raw_url = profile.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
    let base_url: url::Url = raw_url.parse().map_err(|_| ConfigError::Validation {
        field: "base_url".into(),
        reason: format!("invalid URL: {raw_url}"),
    })?;
    if !matches!(base_url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("expected an http(s) URL, got: {raw_url}"),
        });
    }

    let tls = profile
        .ca_cert
        .clone()
        .map_or(TlsMode::System, TlsMode::CustomCa);

    Ok(ClientConfig {
        base_url,
        origin: profile
            .origin
            .clone()
            .unwrap_or_else(|| DEFAULT_ORIGIN.into()),
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        tls,
    })
}

/// `watch` interval for a profile, validated against the polling floor.
pub fn poll_interval(profile: &Profile, defaults: &Defaults) -> Result<Duration, ConfigError> {
    let interval = Duration::from_secs(profile.poll_interval.unwrap_or(defaults.poll_interval));
    if interval < MIN_POLL_INTERVAL {
        return Err(ConfigError::Validation {
            field: "poll_interval".into(),
            reason: format!(
                "must be at least {} seconds, got {}",
                MIN_POLL_INTERVAL.as_secs(),
                interval.as_secs()
            ),
        });
    }
    Ok(interval)
}

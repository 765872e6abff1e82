//! CLI error types with miette diagnostics.
//!
//! Maps `flowerhub_api::Error` and `ConfigError` into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use flowerhub_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the Flowerhub portal")]
    #[diagnostic(
        code(flowerhub::connection_failed),
        help(
            "Check your network connection and the API root.\n\
             Override it with --base-url or `base_url` in your profile."
        )
    )]
    ConnectionFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("TLS setup failed: {message}")]
    #[diagnostic(
        code(flowerhub::tls_error),
        help("Check the `ca_cert` path configured in your profile.")
    )]
    TlsError { message: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(flowerhub::timeout),
        help("Increase timeout with --timeout or try again later.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(flowerhub::auth_failed),
        help(
            "Verify your username and password.\n\
             Run: flowerhub config set-password --profile {profile}"
        )
    )]
    AuthFailed { profile: String, message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(flowerhub::no_credentials),
        help(
            "Configure credentials with: flowerhub config init\n\
             Or set FLOWERHUB_USERNAME and FLOWERHUB_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("API error (HTTP {status}): {message}")]
    #[diagnostic(code(flowerhub::api_error))]
    ApiError { status: u16, message: String },

    #[error("{what} is not available for this account")]
    #[diagnostic(
        code(flowerhub::missing_id),
        help("The portal did not report an {what}; run `flowerhub readout -v` to inspect.")
    )]
    MissingId { what: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(flowerhub::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(flowerhub::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: flowerhub config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(flowerhub::config))]
    Config(ConfigError),

    #[error("Keyring error: {message}")]
    #[diagnostic(
        code(flowerhub::keyring),
        help("Store the password in the config file or FLOWERHUB_PASSWORD instead.")
    )]
    Keyring { message: String },

    // ── Internal ─────────────────────────────────────────────────────

    #[error("{0}")]
    #[diagnostic(code(flowerhub::internal))]
    Internal(String),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Validation { .. } | Self::ProfileNotFound { .. } | Self::Config(_) => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }

    /// Attach the active profile name to authentication failures.
    pub fn with_profile(self, name: &str) -> Self {
        match self {
            Self::AuthFailed { message, .. } => Self::AuthFailed {
                profile: name.into(),
                message,
            },
            other => other,
        }
    }
}

// ── flowerhub_api::Error → CliError mapping ─────────────────────────

impl From<flowerhub_api::Error> for CliError {
    fn from(err: flowerhub_api::Error) -> Self {
        use flowerhub_api::Error as ApiErr;

        match err {
            ApiErr::Configuration { message } => CliError::Validation {
                field: "request".into(),
                reason: message,
            },
            ApiErr::Authentication { message } => CliError::AuthFailed {
                profile: "default".into(),
                message,
            },
            ApiErr::Api { status, message } => CliError::ApiError { status, message },
            ApiErr::Transport(e) if e.is_timeout() => CliError::Timeout,
            ApiErr::Transport(e) => CliError::ConnectionFailed {
                source: Box::new(e),
            },
            ApiErr::InvalidUrl(e) => CliError::Validation {
                field: "base_url".into(),
                reason: e.to_string(),
            },
            ApiErr::Tls(message) => CliError::TlsError { message },
            ApiErr::AlreadyRunning => {
                CliError::Internal("status polling is already running".into())
            }
        }
    }
}

// ── ConfigError → CliError mapping ──────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::UnknownProfile { profile } => CliError::ProfileNotFound {
                name: profile,
                available: "(none)".into(),
            },
            ConfigError::Keyring(e) => CliError::Keyring {
                message: e.to_string(),
            },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config(other),
        }
    }
}

use thiserror::Error;

/// Top-level error type for the `flowerhub-api` crate.
///
/// Covers every failure mode of the portal client: unresolved identifiers,
/// authentication that survived the refresh-and-retry, non-success API
/// statuses, and transport failures. The CLI maps these into diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Configuration ───────────────────────────────────────────────
    /// A required identifier is missing and cannot be resolved from the
    /// session, or a caller-supplied argument is out of range.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    // ── Authentication ──────────────────────────────────────────────
    /// The portal still answered 401 after one token refresh and one retry.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── API ─────────────────────────────────────────────────────────
    /// Non-success, non-401 status when the caller asked for raising mode.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or HTTP client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Polling ─────────────────────────────────────────────────────
    /// The periodic asset fetch is already running on this client.
    #[error("Periodic asset fetch is already running")]
    AlreadyRunning,
}

impl Error {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns `true` if re-authenticating (a fresh login) might resolve it.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is a transient error worth retrying later.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// HTTP status associated with the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { .. } => Some(401),
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

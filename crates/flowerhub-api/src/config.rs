// ── Runtime client configuration ──
//
// Describes *where* and *how* to reach the portal. Carries no credentials
// and never touches disk; `flowerhub-config` builds one from a profile.

use std::time::Duration;

use url::Url;

use crate::transport::TlsMode;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.portal.flowerhub.se";

/// Origin header value the portal requires on every request.
pub const DEFAULT_ORIGIN: &str = "https://portal.flowerhub.se";

/// Configuration for a single [`FlowerhubClient`](crate::FlowerhubClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, e.g. `https://api.portal.flowerhub.se`.
    pub base_url: Url,
    /// Value sent as the mandatory `Origin` header.
    pub origin: String,
    /// Per-request timeout enforced by the transport.
    pub timeout: Duration,
    pub tls: TlsMode,
}

impl ClientConfig {
    /// Config pointing at a custom API root, other settings defaulted.
    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            base_url,
            ..Self::default()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            #[allow(clippy::unwrap_used)]
            base_url: Url::parse(DEFAULT_BASE_URL).unwrap(),
            origin: DEFAULT_ORIGIN.into(),
            timeout: Duration::from_secs(30),
            tls: TlsMode::System,
        }
    }
}

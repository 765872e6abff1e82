// Portal HTTP client
//
// Wraps `reqwest::Client` with URL construction, the mandatory Origin
// header, and the authenticated dispatch path: a 401 triggers exactly one
// token refresh and one retry of the original request. Endpoint groups
// (auth, assets, owner, system) are inherent methods in sibling modules.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, trace, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::Error;
use crate::models::{FetchResult, FromPayload, LoginResponse};
use crate::poller::PollHandle;
use crate::session::{Session, StatusSnapshot};
use crate::transport::TransportConfig;

pub(crate) const REFRESH_PATH: &str = "/auth/refresh-token";

/// Called when a request is still unauthorized after refresh-and-retry.
pub type AuthFailedHook = Arc<dyn Fn() + Send + Sync>;

/// A fully-read response: status, raw text, and best-effort parsed JSON.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    /// `None` when the body is empty or not valid JSON.
    pub json: Option<Value>,
    pub text: String,
}

impl RawResponse {
    async fn read(resp: reqwest::Response) -> Result<Self, Error> {
        let status = resp.status();
        let text = resp.text().await?;
        let json = serde_json::from_str(&text).ok();
        Ok(Self { status, json, text })
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED
    }
}

/// Async client for the Flowerhub portal API.
///
/// Cheaply cloneable; clones share the HTTP client, cookie jar and
/// session state. Holds at most one session (one owner, one asset).
#[derive(Clone)]
pub struct FlowerhubClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    http: reqwest::Client,
    base_url: Url,
    origin: HeaderValue,
    pub(crate) session: Session,
    on_auth_failed: RwLock<Option<AuthFailedHook>>,
    pub(crate) poller: Mutex<Option<PollHandle>>,
}

impl FlowerhubClient {
    /// Build a client (with its own cookie jar) from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let transport = TransportConfig::new(config.tls.clone(), config.timeout);
        let http = transport.build_client()?;
        Self::with_client(http, config.base_url.clone(), &config.origin)
    }

    /// Wrap a pre-built `reqwest::Client`.
    ///
    /// The client must keep cookies (`cookie_store(true)` or a jar) for the
    /// session tokens to survive between calls.
    pub fn with_client(http: reqwest::Client, base_url: Url, origin: &str) -> Result<Self, Error> {
        let origin = HeaderValue::from_str(origin).map_err(|e| Error::Configuration {
            message: format!("invalid origin header value: {e}"),
        })?;
        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                origin,
                session: Session::default(),
                on_auth_failed: RwLock::new(None),
                poller: Mutex::new(None),
            }),
        })
    }

    /// The API root.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    // ── Session accessors ────────────────────────────────────────────

    /// Owner id learned from login/refresh (or set by the host).
    pub fn owner_id(&self) -> Option<i64> {
        self.inner.session.owner_id()
    }

    /// Asset id learned from discovery (or set by the host).
    pub fn asset_id(&self) -> Option<i64> {
        self.inner.session.asset_id()
    }

    /// Raw payload of the last successful asset fetch.
    pub fn asset_info(&self) -> Option<Arc<Value>> {
        self.inner.session.asset_info()
    }

    /// Last stored status snapshot.
    pub fn last_status(&self) -> Option<Arc<StatusSnapshot>> {
        self.inner.session.last_status()
    }

    /// Seed the owner id, e.g. when restoring a persisted session.
    pub fn set_owner_id(&self, owner_id: Option<i64>) {
        self.inner.session.set_owner_id(owner_id);
    }

    pub fn set_asset_id(&self, asset_id: Option<i64>) {
        self.inner.session.set_asset_id(asset_id);
    }

    /// Forget identifiers and cached status. Cookies are left untouched.
    pub fn clear_session(&self) {
        self.inner.session.clear();
    }

    /// Register the hook fired when authentication ultimately fails.
    pub fn set_on_auth_failed(&self, hook: impl Fn() + Send + Sync + 'static) {
        *self
            .inner
            .on_auth_failed
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(hook));
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// `{base}/{path}`, tolerant of slashes on either side.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        let base = self.inner.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    fn headers(&self, extra: Option<&HeaderMap>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(extra) = extra {
            for (name, value) in extra {
                headers.insert(name, value.clone());
            }
        }
        // Origin is mandatory and not overridable.
        headers.insert(header::ORIGIN, self.inner.origin.clone());
        headers
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    /// Perform one request with automatic one-shot re-authentication.
    ///
    /// On 401 the refresh endpoint is called once (its outcome is ignored
    /// apart from picking up an owner id) and the original request is
    /// re-issued once; the second response is returned as-is, even if it
    /// is again 401. Non-success statuses are never turned into errors
    /// here. Transport failures of the original request propagate.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        headers: Option<&HeaderMap>,
    ) -> Result<RawResponse, Error> {
        let url = self.url(path)?;
        let headers = self.headers(headers);

        let first = self.send(&method, &url, &headers, body).await?;
        if !first.is_unauthorized() {
            return Ok(first);
        }

        debug!(%method, path, "unauthorized, refreshing session token");
        self.refresh_token(&headers).await;

        let retry = self.send(&method, &url, &headers, body).await?;
        if retry.is_unauthorized() {
            debug!(%method, path, "still unauthorized after token refresh");
        }
        Ok(retry)
    }

    async fn send(
        &self,
        method: &Method,
        url: &Url,
        headers: &HeaderMap,
        body: Option<&Value>,
    ) -> Result<RawResponse, Error> {
        debug!("{method} {url}");
        let mut builder = self
            .inner
            .http
            .request(method.clone(), url.clone())
            .headers(headers.clone());
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let resp = builder.send().await?;
        let raw = RawResponse::read(resp).await?;
        trace!(status = raw.status.as_u16(), "response received");
        Ok(raw)
    }

    /// Opportunistic token refresh. Never fails; errors are logged.
    async fn refresh_token(&self, headers: &HeaderMap) {
        let url = match self.url(REFRESH_PATH) {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, "cannot build refresh URL");
                return;
            }
        };

        match self.send(&Method::GET, &url, headers, None).await {
            Ok(resp) => {
                let owner_id = resp
                    .json
                    .as_ref()
                    .and_then(LoginResponse::from_payload)
                    .and_then(|login| login.owner_id());
                if let Some(owner_id) = owner_id {
                    self.inner.session.set_owner_id(Some(owner_id));
                }
                debug!(status = resp.status.as_u16(), "token refresh completed");
            }
            Err(e) => warn!(error = %e, "token refresh request failed"),
        }
    }

    // ── Response classification ──────────────────────────────────────

    /// Turn a dispatched response into a [`FetchResult`].
    ///
    /// 401 (after the dispatcher's retry) always raises
    /// [`Error::Authentication`] and fires the auth-failed hook. Other
    /// failures raise [`Error::Api`] or are carried in `error`, depending
    /// on `raise_on_error`. `parse` only runs on success.
    pub(crate) fn finish<T>(
        &self,
        path: &str,
        resp: RawResponse,
        raise_on_error: bool,
        parse: impl FnOnce(&Value) -> Option<T>,
    ) -> Result<FetchResult<T>, Error> {
        let RawResponse { status, json, text } = resp;

        if status == StatusCode::UNAUTHORIZED {
            return Err(self.auth_failure(path));
        }

        if status.is_success() {
            let data = json.as_ref().and_then(parse);
            return Ok(FetchResult {
                status_code: status.as_u16(),
                data,
                json,
                text,
                error: None,
            });
        }

        let message = error_message(status, &text);
        if raise_on_error {
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }
        debug!(path, %status, "request failed (non-raising mode)");
        Ok(FetchResult {
            status_code: status.as_u16(),
            data: None,
            json,
            text,
            error: Some(message),
        })
    }

    pub(crate) fn auth_failure(&self, path: &str) -> Error {
        warn!(path, "authentication failed after token refresh");
        let hook = self
            .inner
            .on_auth_failed
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(hook) = hook {
            hook();
        }
        Error::Authentication {
            message: format!("{path} is still unauthorized after token refresh"),
        }
    }

    /// Owner id argument, falling back to the session.
    pub(crate) fn require_owner_id(&self, owner_id: Option<i64>) -> Result<i64, Error> {
        owner_id
            .or_else(|| self.owner_id())
            .ok_or_else(|| Error::config("asset owner id is required; log in first or pass one"))
    }

    /// Asset id argument, falling back to the session.
    pub(crate) fn require_asset_id(&self, asset_id: Option<i64>) -> Result<i64, Error> {
        asset_id
            .or_else(|| self.asset_id())
            .ok_or_else(|| Error::config("asset id is required; run asset discovery first or pass one"))
    }
}

impl std::fmt::Debug for FlowerhubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowerhubClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("owner_id", &self.owner_id())
            .field("asset_id", &self.asset_id())
            .finish_non_exhaustive()
    }
}

fn error_message(status: StatusCode, body: &str) -> String {
    let preview: String = body.chars().take(200).collect();
    if preview.is_empty() {
        format!("HTTP {status}")
    } else {
        format!("HTTP {status}: {preview}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> FlowerhubClient {
        FlowerhubClient::with_client(
            reqwest::Client::new(),
            Url::parse(base).unwrap_or_else(|e| panic!("bad url {base}: {e}")),
            "https://portal.flowerhub.se",
        )
        .unwrap_or_else(|e| panic!("client: {e}"))
    }

    #[test]
    fn url_joins_without_double_slashes() {
        let c = client("https://api.example.test/");
        let url = c.url("/asset/99").map(|u| u.to_string()).unwrap_or_default();
        assert_eq!(url, "https://api.example.test/asset/99");

        let c = client("https://api.example.test/v1");
        let url = c.url("auth/login").map(|u| u.to_string()).unwrap_or_default();
        assert_eq!(url, "https://api.example.test/v1/auth/login");
    }

    #[test]
    fn caller_headers_cannot_override_origin() {
        let c = client("https://api.example.test");
        let mut extra = HeaderMap::new();
        extra.insert(header::ORIGIN, HeaderValue::from_static("https://evil.test"));
        extra.insert(header::ACCEPT, HeaderValue::from_static("text/plain"));
        extra.insert("x-trace", HeaderValue::from_static("1"));

        let headers = c.headers(Some(&extra));
        assert_eq!(headers[header::ORIGIN], "https://portal.flowerhub.se");
        assert_eq!(headers[header::ACCEPT], "text/plain");
        assert_eq!(headers["x-trace"], "1");
    }

    #[test]
    fn missing_ids_fail_fast() {
        let c = client("https://api.example.test");
        assert!(matches!(
            c.require_owner_id(None),
            Err(Error::Configuration { .. })
        ));
        assert_eq!(c.require_owner_id(Some(5)).ok(), Some(5));
        c.set_asset_id(Some(99));
        assert_eq!(c.require_asset_id(None).ok(), Some(99));
    }

    #[test]
    fn finish_non_raising_carries_error() {
        let c = client("https://api.example.test");
        let resp = RawResponse {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            json: None,
            text: "boom".into(),
        };
        let result = c
            .finish::<()>("/x", resp, false, |_| Some(()))
            .unwrap_or_else(|e| panic!("unexpected error: {e}"));
        assert_eq!(result.status_code, 500);
        assert_eq!(result.error.as_deref(), Some("HTTP 500 Internal Server Error: boom"));
        assert!(result.data.is_none());
    }

    #[test]
    fn finish_raising_returns_api_error() {
        let c = client("https://api.example.test");
        let resp = RawResponse {
            status: StatusCode::NOT_FOUND,
            json: None,
            text: String::new(),
        };
        let err = c.finish::<()>("/x", resp, true, |_| Some(())).err();
        assert!(matches!(err, Some(Error::Api { status: 404, .. })));
    }

    #[test]
    fn finish_unauthorized_fires_hook() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let c = client("https://api.example.test");
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        c.set_on_auth_failed(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let resp = RawResponse {
            status: StatusCode::UNAUTHORIZED,
            json: None,
            text: String::new(),
        };
        let err = c.finish::<()>("/x", resp, false, |_| Some(())).err();
        assert!(matches!(err, Some(Error::Authentication { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

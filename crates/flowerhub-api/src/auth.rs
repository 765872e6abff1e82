// Portal authentication
//
// Credential login. The portal answers with access/refresh cookies that the
// client's jar keeps; the body carries the user record with the owner id.

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::client::FlowerhubClient;
use crate::error::Error;
use crate::models::{FromPayload, LoginResponse};

pub(crate) const LOGIN_PATH: &str = "/auth/login";

/// Username/password pair for [`FlowerhubClient::login`].
///
/// The password is never logged or retained by the client; it is exposed
/// only while serializing the login body.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Outcome of a login attempt that was not rejected as unauthorized.
///
/// A non-2xx status other than 401 is reported here rather than raised;
/// check [`is_success`](Self::is_success).
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub status_code: u16,
    pub json: Option<Value>,
    /// Parsed body, present for 2xx object payloads.
    pub login: Option<LoginResponse>,
}

impl LoginResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Owner id carried by the response, if any.
    pub fn owner_id(&self) -> Option<i64> {
        self.login.as_ref()?.owner_id()
    }
}

impl FlowerhubClient {
    /// Log in with username and password.
    ///
    /// On a 2xx body with a numeric `user.assetOwnerId` the session's owner
    /// id is updated; otherwise the previous value is kept. A response that
    /// is still 401 after the refresh-and-retry raises
    /// [`Error::Authentication`] and fires the auth-failed hook.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResult, Error> {
        self.login_with(&credentials.username, &credentials.password)
            .await
    }

    /// [`login`](Self::login) taking the parts separately.
    pub async fn login_with(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<LoginResult, Error> {
        debug!(username, "logging in");

        let body = json!({
            "username": username,
            "password": password.expose_secret(),
        });
        let resp = self
            .request(Method::POST, LOGIN_PATH, Some(&body), None)
            .await?;

        if resp.is_unauthorized() {
            return Err(self.auth_failure(LOGIN_PATH));
        }

        let status_code = resp.status.as_u16();
        let login = if resp.status.is_success() {
            resp.json.as_ref().and_then(LoginResponse::from_payload)
        } else {
            debug!(status_code, "login rejected");
            None
        };

        if let Some(owner_id) = login.as_ref().and_then(LoginResponse::owner_id) {
            self.inner.session.set_owner_id(Some(owner_id));
            info!(owner_id, "logged in");
        }

        Ok(LoginResult {
            status_code,
            json: resp.json,
            login,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_debug_redacts_password() {
        let creds = Credentials::new("user@example.se", "hunter2");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("user@example.se"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn login_result_success_range() {
        let result = LoginResult {
            status_code: 204,
            json: None,
            login: None,
        };
        assert!(result.is_success());
        assert_eq!(result.owner_id(), None);
        assert!(!LoginResult { status_code: 403, ..result }.is_success());
    }
}

// System notifications (portal banners such as `active-flower`).

use reqwest::Method;
use serde_json::Value;

use crate::client::FlowerhubClient;
use crate::error::Error;
use crate::models::FetchResult;

/// Slug used by the portal for the Flower banner.
pub const DEFAULT_NOTIFICATION_SLUG: &str = "active-flower";

impl FlowerhubClient {
    /// `GET /system-notification/{slug}`, e.g. `active-flower` or
    /// `active-zavann`. The payload is returned as-is.
    pub async fn fetch_system_notification(
        &self,
        slug: Option<&str>,
        raise_on_error: bool,
    ) -> Result<FetchResult<Value>, Error> {
        let slug = slug.unwrap_or(DEFAULT_NOTIFICATION_SLUG);
        if slug.is_empty() || slug.contains('/') {
            return Err(Error::config(format!("invalid notification slug '{slug}'")));
        }
        let path = format!("/system-notification/{slug}");
        let resp = self.request(Method::GET, &path, None, None).await?;
        self.finish(&path, resp, raise_on_error, |v| Some(v.clone()))
    }
}

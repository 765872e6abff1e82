// Asset endpoints
//
// Discovery (owner -> asset id), asset status, revenue and uptime, plus the
// composite readout. Discovery and status fetches update the session.

use std::sync::Arc;

use chrono::NaiveDate;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::client::FlowerhubClient;
use crate::error::Error;
use crate::models::{
    Asset, FetchResult, FromPayload, Revenue, UptimeHistoryEntry, UptimeMonth, UptimePie, as_int,
};
use crate::session::StatusSnapshot;

/// Result of [`FlowerhubClient::readout_sequence`].
#[derive(Debug, Clone, Serialize)]
pub struct ReadoutResult {
    pub asset_owner_id: i64,
    /// Asset id known to the session after discovery.
    pub asset_id: Option<i64>,
    pub with_asset: FetchResult<i64>,
    /// `None` when no asset id could be resolved.
    pub asset: Option<FetchResult<Asset>>,
    /// Snapshot stored by this readout's status fetch.
    pub status: Option<Arc<StatusSnapshot>>,
}

impl FlowerhubClient {
    /// `GET /asset-owner/{ownerId}/withAssetId`
    ///
    /// Stores the discovered asset id: a parsable `assetId` replaces the
    /// stored one, an unparsable value clears it, and a body without the
    /// key leaves it untouched.
    pub async fn fetch_asset_id(
        &self,
        owner_id: Option<i64>,
        raise_on_error: bool,
    ) -> Result<FetchResult<i64>, Error> {
        let owner_id = self.require_owner_id(owner_id)?;
        let path = format!("/asset-owner/{owner_id}/withAssetId");
        let resp = self.request(Method::GET, &path, None, None).await?;
        let result = self.finish(&path, resp, raise_on_error, |v| {
            v.get("assetId").and_then(as_int)
        })?;

        if result.is_success() {
            if let Some(raw) = result.json.as_ref().and_then(|v| v.get("assetId")) {
                let asset_id = as_int(raw);
                debug!(owner_id, ?asset_id, "asset discovery");
                self.inner.session.set_asset_id(asset_id);
            }
        }
        Ok(result)
    }

    /// `GET /asset/{assetId}`
    ///
    /// On success stores the raw payload as asset info and, when it carries
    /// a `flowerHubStatus` object, a new [`StatusSnapshot`] stamped with
    /// the local clock.
    pub async fn fetch_asset(
        &self,
        asset_id: Option<i64>,
        raise_on_error: bool,
    ) -> Result<FetchResult<Asset>, Error> {
        self.fetch_asset_snapshot(asset_id, raise_on_error)
            .await
            .map(|(result, _)| result)
    }

    /// [`fetch_asset`](Self::fetch_asset), also returning the snapshot this
    /// call stored (if any).
    pub(crate) async fn fetch_asset_snapshot(
        &self,
        asset_id: Option<i64>,
        raise_on_error: bool,
    ) -> Result<(FetchResult<Asset>, Option<Arc<StatusSnapshot>>), Error> {
        let asset_id = self.require_asset_id(asset_id)?;
        let path = format!("/asset/{asset_id}");
        let resp = self.request(Method::GET, &path, None, None).await?;
        let result = self.finish(&path, resp, raise_on_error, Asset::from_payload)?;

        let mut snapshot = None;
        if result.is_success() {
            if let Some(body) = result.json.as_ref().filter(|v| v.is_object()) {
                self.inner.session.set_asset_info(body.clone());
                if let Some(fhs) = body.get("flowerHubStatus").filter(|v| v.is_object()) {
                    let stored = self.inner.session.store_status(StatusSnapshot::observed_now(
                        fhs.get("status").and_then(Value::as_str).map(str::to_owned),
                        fhs.get("message").and_then(Value::as_str).map(str::to_owned),
                    ));
                    debug!(asset_id, status = ?stored.status, "asset status updated");
                    snapshot = Some(stored);
                }
            }
        }
        Ok((result, snapshot))
    }

    /// Discover the asset for an owner, then fetch its status.
    ///
    /// Both steps run in non-raising mode; only a persistent 401 or a
    /// transport failure aborts the sequence. The chain is not retried as
    /// a unit.
    pub async fn readout_sequence(&self, owner_id: Option<i64>) -> Result<ReadoutResult, Error> {
        let asset_owner_id = self.require_owner_id(owner_id)?;
        let with_asset = self.fetch_asset_id(Some(asset_owner_id), false).await?;

        let (asset, status) = match self.asset_id() {
            Some(asset_id) => {
                let (result, snapshot) = self.fetch_asset_snapshot(Some(asset_id), false).await?;
                (Some(result), snapshot)
            }
            None => (None, None),
        };

        Ok(ReadoutResult {
            asset_owner_id,
            asset_id: self.asset_id(),
            with_asset,
            asset,
            status,
        })
    }

    /// `GET /asset/{assetId}/revenue`
    pub async fn fetch_revenue(
        &self,
        asset_id: Option<i64>,
        raise_on_error: bool,
    ) -> Result<FetchResult<Revenue>, Error> {
        let asset_id = self.require_asset_id(asset_id)?;
        let path = format!("/asset/{asset_id}/revenue");
        let resp = self.request(Method::GET, &path, None, None).await?;
        self.finish(&path, resp, raise_on_error, Revenue::from_payload)
    }

    /// `GET /asset/{assetId}/uptime/available-months`
    pub async fn fetch_uptime_months(
        &self,
        asset_id: Option<i64>,
        raise_on_error: bool,
    ) -> Result<FetchResult<Vec<UptimeMonth>>, Error> {
        let asset_id = self.require_asset_id(asset_id)?;
        let path = format!("/asset/{asset_id}/uptime/available-months");
        let resp = self.request(Method::GET, &path, None, None).await?;
        self.finish(&path, resp, raise_on_error, Vec::<UptimeMonth>::from_payload)
    }

    /// `GET /asset/{assetId}/uptime/history`
    pub async fn fetch_uptime_history(
        &self,
        asset_id: Option<i64>,
        raise_on_error: bool,
    ) -> Result<FetchResult<Vec<UptimeHistoryEntry>>, Error> {
        let asset_id = self.require_asset_id(asset_id)?;
        let path = format!("/asset/{asset_id}/uptime/history");
        let resp = self.request(Method::GET, &path, None, None).await?;
        self.finish(&path, resp, raise_on_error, Vec::<UptimeHistoryEntry>::from_payload)
    }

    /// `GET /asset/{assetId}/uptime/pie?period=YYYY-MM`
    ///
    /// The derived [`UptimePie::uptime_ratio`] is computed client-side.
    pub async fn fetch_uptime_pie(
        &self,
        period: &str,
        asset_id: Option<i64>,
        raise_on_error: bool,
    ) -> Result<FetchResult<UptimePie>, Error> {
        validate_period(period)?;
        let asset_id = self.require_asset_id(asset_id)?;
        let path = format!("/asset/{asset_id}/uptime/pie?period={period}");
        let resp = self.request(Method::GET, &path, None, None).await?;
        self.finish(&path, resp, raise_on_error, UptimePie::from_payload)
    }
}

/// Uptime periods are calendar months, `YYYY-MM`.
fn validate_period(period: &str) -> Result<(), Error> {
    let valid = period.len() == 7
        && NaiveDate::parse_from_str(&format!("{period}-01"), "%Y-%m-%d").is_ok();
    if valid {
        Ok(())
    } else {
        Err(Error::config(format!(
            "invalid uptime period '{period}', expected YYYY-MM"
        )))
    }
}

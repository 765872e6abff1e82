// Asset-owner endpoints: details, profile and billing data.

use reqwest::Method;

use crate::client::FlowerhubClient;
use crate::error::Error;
use crate::models::{
    AssetOwnerDetails, AssetOwnerProfile, ConsumptionRecord, ElectricityAgreement, FetchResult,
    FromPayload, Invoice,
};

impl FlowerhubClient {
    /// `GET /asset-owner/{ownerId}`
    pub async fn fetch_owner_details(
        &self,
        owner_id: Option<i64>,
        raise_on_error: bool,
    ) -> Result<FetchResult<AssetOwnerDetails>, Error> {
        let path = self.owner_path(owner_id, "")?;
        let resp = self.request(Method::GET, &path, None, None).await?;
        self.finish(&path, resp, raise_on_error, AssetOwnerDetails::from_payload)
    }

    /// `GET /asset-owner/{ownerId}/profile`
    pub async fn fetch_owner_profile(
        &self,
        owner_id: Option<i64>,
        raise_on_error: bool,
    ) -> Result<FetchResult<AssetOwnerProfile>, Error> {
        let path = self.owner_path(owner_id, "/profile")?;
        let resp = self.request(Method::GET, &path, None, None).await?;
        self.finish(&path, resp, raise_on_error, AssetOwnerProfile::from_payload)
    }

    /// `GET /asset-owner/{ownerId}/electricity-agreement`
    pub async fn fetch_electricity_agreement(
        &self,
        owner_id: Option<i64>,
        raise_on_error: bool,
    ) -> Result<FetchResult<ElectricityAgreement>, Error> {
        let path = self.owner_path(owner_id, "/electricity-agreement")?;
        let resp = self.request(Method::GET, &path, None, None).await?;
        self.finish(&path, resp, raise_on_error, ElectricityAgreement::from_payload)
    }

    /// `GET /asset-owner/{ownerId}/invoice`
    ///
    /// `data` is `None` unless the body is a list; non-object entries are
    /// skipped.
    pub async fn fetch_invoices(
        &self,
        owner_id: Option<i64>,
        raise_on_error: bool,
    ) -> Result<FetchResult<Vec<Invoice>>, Error> {
        let path = self.owner_path(owner_id, "/invoice")?;
        let resp = self.request(Method::GET, &path, None, None).await?;
        self.finish(&path, resp, raise_on_error, Vec::<Invoice>::from_payload)
    }

    /// `GET /asset-owner/{ownerId}/consumption`
    pub async fn fetch_consumption(
        &self,
        owner_id: Option<i64>,
        raise_on_error: bool,
    ) -> Result<FetchResult<Vec<ConsumptionRecord>>, Error> {
        let path = self.owner_path(owner_id, "/consumption")?;
        let resp = self.request(Method::GET, &path, None, None).await?;
        self.finish(&path, resp, raise_on_error, Vec::<ConsumptionRecord>::from_payload)
    }

    fn owner_path(&self, owner_id: Option<i64>, suffix: &str) -> Result<String, Error> {
        let owner_id = self.require_owner_id(owner_id)?;
        Ok(format!("/asset-owner/{owner_id}{suffix}"))
    }
}

// Account-level records: login user, owner details and profile.

use serde::Serialize;
use serde_json::Value;

use super::{FromPayload, int_field, object_field, str_field};

/// User returned by the login and refresh endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: Option<i64>,
    pub email: Option<String>,
    pub role: Option<i64>,
    pub name: Option<String>,
    pub distributor_id: Option<i64>,
    pub installer_id: Option<i64>,
    pub asset_owner_id: Option<i64>,
}

impl FromPayload for User {
    fn from_payload(value: &Value) -> Option<Self> {
        value.as_object()?;
        Some(Self {
            id: int_field(value, "id"),
            email: str_field(value, "email"),
            role: int_field(value, "role"),
            name: str_field(value, "name"),
            distributor_id: int_field(value, "distributorId"),
            installer_id: int_field(value, "installerId"),
            asset_owner_id: int_field(value, "assetOwnerId"),
        })
    }
}

/// `POST /auth/login` (and `GET /auth/refresh-token`) body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoginResponse {
    pub user: Option<User>,
    pub refresh_token_expiration_date: Option<String>,
}

impl LoginResponse {
    /// `user.assetOwnerId`, if present and numeric.
    pub fn owner_id(&self) -> Option<i64> {
        self.user.as_ref()?.asset_owner_id
    }
}

impl FromPayload for LoginResponse {
    fn from_payload(value: &Value) -> Option<Self> {
        value.as_object()?;
        Some(Self {
            user: object_field(value, "user"),
            refresh_token_expiration_date: str_field(value, "refreshTokenExpirationDate"),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimpleInstaller {
    pub id: Option<i64>,
    pub name: Option<String>,
}

impl FromPayload for SimpleInstaller {
    fn from_payload(value: &Value) -> Option<Self> {
        value.as_object()?;
        Some(Self {
            id: int_field(value, "id"),
            name: str_field(value, "name"),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimpleDistributor {
    pub id: Option<i64>,
    pub name: Option<String>,
}

impl FromPayload for SimpleDistributor {
    fn from_payload(value: &Value) -> Option<Self> {
        value.as_object()?;
        Some(Self {
            id: int_field(value, "id"),
            name: str_field(value, "name"),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssetModel {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub manufacturer: Option<String>,
}

impl FromPayload for AssetModel {
    fn from_payload(value: &Value) -> Option<Self> {
        value.as_object()?;
        Some(Self {
            id: int_field(value, "id"),
            name: str_field(value, "name"),
            manufacturer: str_field(value, "manufacturer"),
        })
    }
}

/// The owner's asset as embedded in the owner details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssetSummary {
    pub id: Option<i64>,
    pub serial_number: Option<String>,
    pub asset_model: AssetModel,
}

impl FromPayload for AssetSummary {
    fn from_payload(value: &Value) -> Option<Self> {
        value.as_object()?;
        Some(Self {
            id: int_field(value, "id"),
            serial_number: str_field(value, "serialNumber"),
            asset_model: object_field(value, "assetModel").unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Compensation {
    pub status: Option<String>,
    pub message: Option<String>,
}

impl FromPayload for Compensation {
    fn from_payload(value: &Value) -> Option<Self> {
        value.as_object()?;
        Some(Self {
            status: str_field(value, "status"),
            message: str_field(value, "message"),
        })
    }
}

/// `GET /asset-owner/{ownerId}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssetOwnerDetails {
    pub id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub installer: SimpleInstaller,
    pub distributor: SimpleDistributor,
    pub asset: AssetSummary,
    pub compensation: Compensation,
    pub bess_compensation_start_date: Option<String>,
}

impl FromPayload for AssetOwnerDetails {
    fn from_payload(value: &Value) -> Option<Self> {
        value.as_object()?;
        Some(Self {
            id: int_field(value, "id"),
            first_name: str_field(value, "firstName"),
            last_name: str_field(value, "lastName"),
            installer: object_field(value, "installer").unwrap_or_default(),
            distributor: object_field(value, "distributor").unwrap_or_default(),
            asset: object_field(value, "asset").unwrap_or_default(),
            compensation: object_field(value, "compensation").unwrap_or_default(),
            bess_compensation_start_date: str_field(value, "bessCompensationStartDate"),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostalAddress {
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
}

impl FromPayload for PostalAddress {
    fn from_payload(value: &Value) -> Option<Self> {
        value.as_object()?;
        Some(Self {
            street: str_field(value, "street"),
            postal_code: str_field(value, "postalCode"),
            city: str_field(value, "city"),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallerInfo {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub address: PostalAddress,
}

impl FromPayload for InstallerInfo {
    fn from_payload(value: &Value) -> Option<Self> {
        value.as_object()?;
        Some(Self {
            id: int_field(value, "id"),
            name: str_field(value, "name"),
            address: object_field(value, "address").unwrap_or_default(),
        })
    }
}

/// `GET /asset-owner/{ownerId}/profile`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssetOwnerProfile {
    pub id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub main_email: Option<String>,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub address: PostalAddress,
    pub account_status: Option<String>,
    pub installer: InstallerInfo,
}

impl FromPayload for AssetOwnerProfile {
    fn from_payload(value: &Value) -> Option<Self> {
        value.as_object()?;
        Some(Self {
            id: int_field(value, "id"),
            first_name: str_field(value, "firstName"),
            last_name: str_field(value, "lastName"),
            main_email: str_field(value, "mainEmail"),
            contact_email: str_field(value, "contactEmail"),
            phone: str_field(value, "phone"),
            address: object_field(value, "address").unwrap_or_default(),
            account_status: str_field(value, "accountStatus"),
            installer: object_field(value, "installer").unwrap_or_default(),
        })
    }
}

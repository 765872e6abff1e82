// Portal response records
//
// The portal is loose about field presence and types (ids arrive as numbers
// or numeric strings, lists may be missing). Every record is parsed from a
// `serde_json::Value` field by field; a missing or mistyped field degrades
// to `None`/default instead of failing the whole record.

mod account;
mod asset;
mod billing;

pub use account::{
    AssetModel, AssetOwnerDetails, AssetOwnerProfile, AssetSummary, Compensation, InstallerInfo,
    LoginResponse, PostalAddress, SimpleDistributor, SimpleInstaller, User,
};
pub use asset::{
    Asset, Battery, FlowerHubStatus, Inverter, Revenue, UptimeHistoryEntry, UptimeMonth,
    UptimePie, UptimePieSlice,
};
pub use billing::{AgreementState, ConsumptionRecord, ElectricityAgreement, Invoice, InvoiceLine};

use serde::Serialize;
use serde_json::Value;

/// Best-effort conversion from a JSON payload.
///
/// Returns `None` only when the payload has the wrong overall shape
/// (e.g. an array where an object is expected).
pub trait FromPayload: Sized {
    fn from_payload(value: &Value) -> Option<Self>;
}

impl<T: FromPayload> FromPayload for Vec<T> {
    fn from_payload(value: &Value) -> Option<Self> {
        Some(
            value
                .as_array()?
                .iter()
                .filter_map(T::from_payload)
                .collect(),
        )
    }
}

/// Outcome of a single resource fetch.
///
/// `data` is the parsed record on success. In non-raising mode a failed
/// status leaves `data` empty and describes the failure in `error`.
#[derive(Debug, Clone, Serialize)]
pub struct FetchResult<T> {
    pub status_code: u16,
    pub data: Option<T>,
    /// Parsed response body, `None` if it was not valid JSON.
    pub json: Option<Value>,
    /// Raw response body.
    pub text: String,
    pub error: Option<String>,
}

impl<T> FetchResult<T> {
    pub fn is_success(&self) -> bool {
        self.error.is_none() && (200..300).contains(&self.status_code)
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

// ── Field helpers ────────────────────────────────────────────────────

/// Integer field; accepts JSON numbers and numeric strings.
pub(crate) fn int_field(value: &Value, key: &str) -> Option<i64> {
    as_int(value.get(key)?)
}

/// Largest magnitude at which every whole `f64` is exact (2^53).
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Whole-valued floats (`99.0`) count as integers.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= MAX_EXACT_FLOAT)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Float field; accepts JSON numbers and numeric strings.
pub(crate) fn float_field(value: &Value, key: &str) -> Option<f64> {
    match value.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// String field; scalars are rendered as text, `null`/objects are `None`.
pub(crate) fn str_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Like [`str_field`] but empty when missing.
pub(crate) fn text_field(value: &Value, key: &str) -> String {
    str_field(value, key).unwrap_or_default()
}

pub(crate) fn bool_field(value: &Value, key: &str) -> Option<bool> {
    value.get(key)?.as_bool()
}

/// Nested record; `None` when the key is missing or not an object.
pub(crate) fn object_field<T: FromPayload>(value: &Value, key: &str) -> Option<T> {
    value.get(key).filter(|v| v.is_object()).and_then(T::from_payload)
}

/// Nested list; empty when missing or not an array.
pub(crate) fn list_field<T: FromPayload>(value: &Value, key: &str) -> Vec<T> {
    value
        .get(key)
        .and_then(Vec::<T>::from_payload)
        .unwrap_or_default()
}

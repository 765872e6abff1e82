// Session state held by a client instance.
//
// Identifiers are plain assignments behind a short-lived lock; the asset
// payload and status snapshot are swapped wholesale. Concurrent writers
// (manual calls racing the poll task) are last-write-wins.

use std::sync::{Arc, PoisonError, RwLock};

use arc_swap::ArcSwapOption;
use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

/// Last-known device status as observed by this client.
///
/// `observed_at` is the client's clock at the moment the response was
/// accepted, never a server-supplied timestamp. Snapshots are immutable;
/// each successful status fetch replaces the stored one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    pub status: Option<String>,
    pub message: Option<String>,
    pub observed_at: Option<DateTime<Utc>>,
}

impl StatusSnapshot {
    /// Snapshot stamped with the current time.
    pub fn observed_now(status: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            message,
            observed_at: Some(Utc::now()),
        }
    }

    /// Time elapsed since the observation, `None` without a timestamp.
    pub fn age(&self) -> Option<TimeDelta> {
        self.age_at(Utc::now())
    }

    /// [`age`](Self::age) measured against an explicit clock reading.
    pub fn age_at(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        self.observed_at.map(|at| now - at)
    }

    /// Age in fractional seconds.
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    pub fn age_secs(&self) -> Option<f64> {
        self.age().map(|d| d.num_milliseconds() as f64 / 1000.0)
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Ids {
    owner_id: Option<i64>,
    asset_id: Option<i64>,
}

#[derive(Debug, Default)]
pub(crate) struct Session {
    ids: RwLock<Ids>,
    asset_info: ArcSwapOption<serde_json::Value>,
    last_status: ArcSwapOption<StatusSnapshot>,
}

impl Session {
    pub(crate) fn owner_id(&self) -> Option<i64> {
        self.ids.read().unwrap_or_else(PoisonError::into_inner).owner_id
    }

    pub(crate) fn asset_id(&self) -> Option<i64> {
        self.ids.read().unwrap_or_else(PoisonError::into_inner).asset_id
    }

    pub(crate) fn set_owner_id(&self, owner_id: Option<i64>) {
        self.ids.write().unwrap_or_else(PoisonError::into_inner).owner_id = owner_id;
    }

    pub(crate) fn set_asset_id(&self, asset_id: Option<i64>) {
        self.ids.write().unwrap_or_else(PoisonError::into_inner).asset_id = asset_id;
    }

    pub(crate) fn asset_info(&self) -> Option<Arc<serde_json::Value>> {
        self.asset_info.load_full()
    }

    pub(crate) fn set_asset_info(&self, info: serde_json::Value) {
        self.asset_info.store(Some(Arc::new(info)));
    }

    pub(crate) fn last_status(&self) -> Option<Arc<StatusSnapshot>> {
        self.last_status.load_full()
    }

    pub(crate) fn store_status(&self, snapshot: StatusSnapshot) -> Arc<StatusSnapshot> {
        let snapshot = Arc::new(snapshot);
        self.last_status.store(Some(Arc::clone(&snapshot)));
        snapshot
    }

    pub(crate) fn clear(&self) {
        *self.ids.write().unwrap_or_else(PoisonError::into_inner) = Ids::default();
        self.asset_info.store(None);
        self.last_status.store(None);
    }
}

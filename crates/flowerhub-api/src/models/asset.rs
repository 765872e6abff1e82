// Asset-level records: hardware, connection status, revenue, uptime.

use serde::Serialize;
use serde_json::Value;

use super::{FromPayload, bool_field, float_field, int_field, object_field, str_field, text_field};

/// `flowerHubStatus` as reported inside the asset payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlowerHubStatus {
    pub status: Option<String>,
    pub message: Option<String>,
}

impl FromPayload for FlowerHubStatus {
    fn from_payload(value: &Value) -> Option<Self> {
        value.as_object()?;
        Some(Self {
            status: str_field(value, "status"),
            message: str_field(value, "message"),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Inverter {
    pub manufacturer_id: Option<i64>,
    pub manufacturer_name: Option<String>,
    pub inverter_model_id: Option<i64>,
    pub name: Option<String>,
    pub number_of_battery_stacks_supported: Option<i64>,
    pub capacity_id: Option<i64>,
    pub power_capacity: Option<i64>,
}

impl FromPayload for Inverter {
    fn from_payload(value: &Value) -> Option<Self> {
        value.as_object()?;
        Some(Self {
            manufacturer_id: int_field(value, "manufacturerId"),
            manufacturer_name: str_field(value, "manufacturerName"),
            inverter_model_id: int_field(value, "inverterModelId"),
            name: str_field(value, "name"),
            number_of_battery_stacks_supported: int_field(value, "numberOfBatteryStacksSupported"),
            capacity_id: int_field(value, "capacityId"),
            power_capacity: int_field(value, "powerCapacity"),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Battery {
    pub manufacturer_id: Option<i64>,
    pub manufacturer_name: Option<String>,
    pub battery_model_id: Option<i64>,
    pub name: Option<String>,
    pub min_number_of_battery_modules: Option<i64>,
    pub max_number_of_battery_modules: Option<i64>,
    pub capacity_id: Option<i64>,
    pub energy_capacity: Option<i64>,
    pub power_capacity: Option<i64>,
}

impl FromPayload for Battery {
    fn from_payload(value: &Value) -> Option<Self> {
        value.as_object()?;
        Some(Self {
            manufacturer_id: int_field(value, "manufacturerId"),
            manufacturer_name: str_field(value, "manufacturerName"),
            battery_model_id: int_field(value, "batteryModelId"),
            name: str_field(value, "name"),
            min_number_of_battery_modules: int_field(value, "minNumberOfBatteryModules"),
            max_number_of_battery_modules: int_field(value, "maxNumberOfBatteryModules"),
            capacity_id: int_field(value, "capacityId"),
            energy_capacity: int_field(value, "energyCapacity"),
            power_capacity: int_field(value, "powerCapacity"),
        })
    }
}

/// `GET /asset/{assetId}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Asset {
    pub id: Option<i64>,
    pub inverter: Option<Inverter>,
    pub battery: Option<Battery>,
    pub fuse_size: Option<i64>,
    pub flower_hub_status: Option<FlowerHubStatus>,
    pub is_installed: Option<bool>,
}

impl FromPayload for Asset {
    fn from_payload(value: &Value) -> Option<Self> {
        value.as_object()?;
        Some(Self {
            id: int_field(value, "id"),
            inverter: object_field(value, "inverter"),
            battery: object_field(value, "battery"),
            fuse_size: int_field(value, "fuseSize"),
            flower_hub_status: object_field(value, "flowerHubStatus"),
            is_installed: bool_field(value, "isInstalled"),
        })
    }
}

/// `GET /asset/{assetId}/revenue`: summary for the last invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Revenue {
    pub id: Option<i64>,
    pub min_available_power: Option<f64>,
    pub compensation: Option<f64>,
    pub compensation_per_kw: Option<f64>,
}

impl FromPayload for Revenue {
    fn from_payload(value: &Value) -> Option<Self> {
        value.as_object()?;
        Some(Self {
            id: int_field(value, "id"),
            min_available_power: float_field(value, "minAvailablePower"),
            compensation: float_field(value, "compensation"),
            compensation_per_kw: float_field(value, "compensationPerKW"),
        })
    }
}

/// A month with uptime data: machine value (`2024-05`) and display label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UptimeMonth {
    pub value: String,
    pub label: String,
}

impl FromPayload for UptimeMonth {
    fn from_payload(value: &Value) -> Option<Self> {
        value.as_object()?;
        Some(Self {
            value: text_field(value, "value"),
            label: text_field(value, "label"),
        })
    }
}

/// Monthly uptime ratio, in percent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UptimeHistoryEntry {
    pub date: String,
    pub uptime: Option<f64>,
}

impl FromPayload for UptimeHistoryEntry {
    fn from_payload(value: &Value) -> Option<Self> {
        value.as_object()?;
        Some(Self {
            date: text_field(value, "date"),
            uptime: float_field(value, "uptime"),
        })
    }
}

/// One slice of the uptime distribution; `value` is seconds in the period.
///
/// Known names are `uptime`, `downtime` and `noData`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UptimePieSlice {
    pub name: String,
    pub value: Option<f64>,
}

impl FromPayload for UptimePieSlice {
    fn from_payload(value: &Value) -> Option<Self> {
        value.as_object()?;
        Some(Self {
            name: text_field(value, "name"),
            value: float_field(value, "value"),
        })
    }
}

/// Uptime distribution for a period plus the derived ratio.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UptimePie {
    pub slices: Vec<UptimePieSlice>,
    pub uptime_ratio: Option<f64>,
}

impl UptimePie {
    pub fn from_slices(slices: Vec<UptimePieSlice>) -> Self {
        let uptime_ratio = Self::ratio(&slices);
        Self {
            slices,
            uptime_ratio,
        }
    }

    /// Uptime percentage (0-100) over uptime + downtime + noData.
    ///
    /// `None` when there are no slices or the total is zero.
    pub fn ratio(slices: &[UptimePieSlice]) -> Option<f64> {
        let (mut uptime, mut downtime, mut no_data) = (0.0, 0.0, 0.0);
        for slice in slices {
            let Some(v) = slice.value else { continue };
            match slice.name.as_str() {
                "uptime" => uptime = v,
                "downtime" => downtime = v,
                "noData" => no_data = v,
                _ => {}
            }
        }
        let total = uptime + downtime + no_data;
        if total.abs() < f64::EPSILON {
            return None;
        }
        Some(uptime / total * 100.0)
    }

    /// Seconds recorded for the named slice.
    pub fn slice_value(&self, name: &str) -> Option<f64> {
        self.slices.iter().find(|s| s.name == name)?.value
    }
}

impl FromPayload for UptimePie {
    fn from_payload(value: &Value) -> Option<Self> {
        // Served either as a bare list or wrapped as `{ "data": [...] }`.
        let list = if value.is_array() {
            value
        } else {
            value.get("data").or_else(|| value.get("slices"))?
        };
        Vec::<UptimePieSlice>::from_payload(list).map(Self::from_slices)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn asset_parses_status_and_hardware() {
        let body = json!({
            "id": 99,
            "fuseSize": "25",
            "isInstalled": true,
            "inverter": { "name": "SH10RT", "powerCapacity": 10 },
            "battery": { "name": "SBR128", "energyCapacity": 12800 },
            "flowerHubStatus": { "status": "Connected", "message": "ok" }
        });
        let asset = Asset::from_payload(&body).unwrap_or_default();
        assert_eq!(asset.id, Some(99));
        assert_eq!(asset.fuse_size, Some(25));
        assert_eq!(asset.is_installed, Some(true));
        assert_eq!(asset.inverter.and_then(|i| i.power_capacity), Some(10));
        assert_eq!(asset.battery.and_then(|b| b.energy_capacity), Some(12800));
        assert_eq!(
            asset.flower_hub_status.and_then(|s| s.status).as_deref(),
            Some("Connected")
        );
    }

    #[test]
    fn asset_with_mistyped_fields_degrades() {
        let body = json!({ "id": "abc", "inverter": 5, "flowerHubStatus": null });
        let asset = Asset::from_payload(&body).unwrap_or_default();
        assert_eq!(asset.id, None);
        assert_eq!(asset.inverter, None);
        assert_eq!(asset.flower_hub_status, None);
    }

    #[test]
    fn uptime_ratio_over_all_slices() {
        let pie = UptimePie::from_payload(&json!([
            { "name": "uptime", "value": 2_592_000 },
            { "name": "downtime", "value": 86_400 },
            { "name": "noData", "value": 0 }
        ]))
        .unwrap_or_default();

        let ratio = pie.uptime_ratio.unwrap_or_default();
        assert!((ratio - 96.774_193).abs() < 1e-3, "ratio was {ratio}");
        assert_eq!(pie.slice_value("downtime"), Some(86_400.0));
        assert_eq!(pie.slice_value("other"), None);
    }

    #[test]
    fn uptime_ratio_is_none_without_data() {
        assert_eq!(UptimePie::ratio(&[]), None);
        let zeros = vec![UptimePieSlice {
            name: "uptime".into(),
            value: Some(0.0),
        }];
        assert_eq!(UptimePie::ratio(&zeros), None);
    }

    #[test]
    fn uptime_pie_accepts_wrapped_list() {
        let pie = UptimePie::from_payload(&json!({ "data": [{ "name": "uptime", "value": 10 }] }))
            .unwrap_or_default();
        assert_eq!(pie.uptime_ratio, Some(100.0));
    }

    #[test]
    fn revenue_accepts_string_numbers() {
        let revenue = Revenue::from_payload(&json!({
            "id": 1, "minAvailablePower": "4.5", "compensation": 1234.5, "compensationPerKW": 274.33
        }))
        .unwrap_or_default();
        assert_eq!(revenue.min_available_power, Some(4.5));
        assert_eq!(revenue.compensation, Some(1234.5));
    }
}

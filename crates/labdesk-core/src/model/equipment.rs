//! Laboratory equipment records.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

/// Operational state of a piece of equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
pub enum EquipmentStatus {
    /// Powered and idle.
    Online,
    /// Powered off or unreachable.
    Offline,
    /// Currently running a job.
    #[serde(rename = "In Use")]
    #[strum(serialize = "In Use")]
    InUse,
    /// Taken out of service for maintenance.
    Maintenance,
}

impl EquipmentStatus {
    /// Returns the wire spelling of this status.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Returns whether the equipment counts as online on the dashboard.
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Online | Self::InUse)
    }
}

/// A piece of laboratory equipment as reported by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentRecord {
    /// Equipment identifier (e.g. `EQ001`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Current operational state.
    pub status: EquipmentStatus,
    /// Date of the last completed maintenance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_maintenance: Option<Date>,
    /// Date of the next scheduled maintenance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_maintenance: Option<Date>,
    /// Utilisation in percent (0-100), kept as sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Number>,
    /// Temperature reading in degrees Celsius.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Location label (e.g. `Lab Room A`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Fields this type does not model, passed through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EquipmentRecord {
    /// Returns the utilisation as a float.
    pub fn usage_percent(&self) -> Option<f64> {
        self.usage.as_ref().and_then(Number::as_f64)
    }

    /// Returns whether maintenance is due on or before `today`.
    pub fn maintenance_due(&self, today: Date) -> bool {
        self.next_maintenance.is_some_and(|next| next <= today)
    }
}

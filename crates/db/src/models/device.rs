//! Device models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitals_core::types::Timestamp;

/// A row from the `devices` table, keyed by `device_id`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Device {
    pub device_id: String,
    pub device_name: Option<String>,
    pub device_type: Option<String>,
    pub last_seen: Option<Timestamp>,
    pub status: String,
    pub created_at: Timestamp,
}

/// DTO for registering (or re-registering) a device.
#[derive(Debug, Clone)]
pub struct RegisterDevice {
    pub device_id: String,
    pub device_name: Option<String>,
    pub device_type: Option<String>,
}

/// DTO for a partial device update. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDevice {
    pub device_name: Option<String>,
    pub device_type: Option<String>,
    pub status: Option<String>,
}

impl UpdateDevice {
    pub fn is_empty(&self) -> bool {
        self.device_name.is_none() && self.device_type.is_none() && self.status.is_none()
    }
}

/// Optional constraints for listing devices.
#[derive(Debug, Clone, Default)]
pub struct DeviceFilter {
    pub status: Option<String>,
    pub device_type: Option<String>,
}

//! Site and device types returned by `GET /site-info/{siteId}`.

use serde::{Deserialize, Serialize};

/// A device installed at a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Device identifier, matched against [`Outage::id`](super::Outage::id).
    pub id: String,
    /// Human-readable device name.
    pub name: String,
}

impl Device {
    /// Creates a new device.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A physical site and the devices it contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    /// Stable site identifier (e.g. `norwich-pear-tree`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Devices in upstream order.
    pub devices: Vec<Device>,
}

impl Site {
    /// Looks up the first device with the given id.
    pub fn device(&self, id: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.id == id)
    }
}

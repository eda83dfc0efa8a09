use std::fmt;

use crate::indi_client::DeviceHandle;
use crate::util::*;

use super::Coordinates;

/// The device currently treated as the telescope. Identity is the device name.
#[derive(Clone)]
pub struct ActiveTelescope {
    name: String,
    device: DeviceHandle,
}

impl ActiveTelescope {
    pub fn new(device: DeviceHandle) -> Self {
        ActiveTelescope {
            name: device.device_name().to_string(),
            device,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn device(&self) -> &DeviceHandle {
        &self.device
    }

    pub fn matches(&self, name: &str) -> bool {
        self.name == name
    }
}

impl fmt::Debug for ActiveTelescope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ActiveTelescope").field(&self.name).finish()
    }
}

#[derive(Debug, Default)]
pub struct AdapterState {
    pub telescope: Option<ActiveTelescope>,
    pub coordinates: Coordinates,
    pub devices: Vec<String>,
}

impl AdapterState {
    pub fn telescope(&self) -> AdapterResult<&ActiveTelescope> {
        self.telescope.as_ref().ok_or(AdapterError::NoDevice)
    }

    /// The active telescope, provided the client reports it connected
    pub async fn connected_telescope(&self) -> AdapterResult<&ActiveTelescope> {
        let telescope = self.telescope()?;
        if !telescope.device().is_connected().await {
            return Err(AdapterError::NotConnected(telescope.name().to_string()));
        }
        Ok(telescope)
    }

    pub fn add_device(&mut self, name: &str) {
        if !self.devices.iter().any(|d| d == name) {
            self.devices.push(name.to_string());
        }
    }

    pub fn remove_device(&mut self, name: &str) {
        self.devices.retain(|d| d != name);
        if self.telescope.as_ref().map_or(false, |t| t.matches(name)) {
            self.telescope = None;
        }
    }
}

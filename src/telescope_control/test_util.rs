use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use eyre::bail;
use tokio::sync::Mutex;

use super::TelescopeAdapter;
use crate::config::SimulatorSettings;
use crate::indi_client::{IndiClient, Property};
pub use crate::simulator::SimulatedDevice;

/// A connected mount with the default simulator property table
pub async fn mount(name: &str) -> Arc<SimulatedDevice> {
    let device = Arc::new(SimulatedDevice::new(name, &SimulatorSettings::default()));
    device.set_connected(true).await;
    device
}

/// Records every request and writes sent properties back to known devices
#[derive(Default)]
pub struct RecordingClient {
    devices: Mutex<HashMap<String, Arc<SimulatedDevice>>>,
    sent: Mutex<Vec<Property>>,
    attempts: Mutex<usize>,
    connects: Mutex<Vec<String>>,
    disconnects: Mutex<Vec<String>>,
    fail: Mutex<bool>,
}

impl RecordingClient {
    pub async fn mount(&self, name: &str) -> Arc<SimulatedDevice> {
        let device = mount(name).await;
        self.devices
            .lock()
            .await
            .insert(name.to_string(), device.clone());
        device
    }

    pub async fn sent(&self) -> Vec<Property> {
        self.sent.lock().await.clone()
    }

    pub async fn take_sent(&self) -> Vec<Property> {
        std::mem::take(&mut *self.sent.lock().await)
    }

    pub async fn attempts(&self) -> usize {
        *self.attempts.lock().await
    }

    pub async fn connect_requests(&self) -> Vec<String> {
        self.connects.lock().await.clone()
    }

    pub async fn disconnect_requests(&self) -> Vec<String> {
        self.disconnects.lock().await.clone()
    }

    pub async fn fail_sends(&self, fail: bool) {
        *self.fail.lock().await = fail;
    }
}

#[async_trait]
impl IndiClient for RecordingClient {
    async fn send_new_property(&self, property: Property) -> eyre::Result<()> {
        *self.attempts.lock().await += 1;
        if *self.fail.lock().await {
            bail!("send failed");
        }

        if let Some(device) = self.devices.lock().await.get(property.device_name()) {
            device.store(property.clone()).await;
        }
        self.sent.lock().await.push(property);
        Ok(())
    }

    async fn connect_device(&self, device: &str) -> eyre::Result<()> {
        self.connects.lock().await.push(device.to_string());
        Ok(())
    }

    async fn disconnect_device(&self, device: &str) -> eyre::Result<()> {
        self.disconnects.lock().await.push(device.to_string());
        Ok(())
    }
}

pub fn create_adapter() -> (Arc<TelescopeAdapter>, Arc<RecordingClient>) {
    let client = Arc::new(RecordingClient::default());
    let adapter = Arc::new(TelescopeAdapter::new(client.clone()));
    (adapter, client)
}

pub async fn active_name(adapter: &TelescopeAdapter) -> Option<String> {
    let state = adapter.state.lock().await;
    state.telescope.as_ref().map(|t| t.name().to_string())
}

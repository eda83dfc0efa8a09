use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};

use super::state::AdapterState;
use super::{Coordinates, TelescopeEvent};
use crate::indi_client::{IndiClient, Property};
use crate::util::*;

const EVENT_CAPACITY: usize = 64;

/// Bridges front-end telescope commands to INDI property updates and INDI
/// client notifications back to [`TelescopeEvent`]s.
pub struct TelescopeAdapter {
    pub(in crate::telescope_control) client: Arc<dyn IndiClient>,
    pub(in crate::telescope_control) state: Mutex<AdapterState>,
    events: broadcast::Sender<TelescopeEvent>,
}

impl TelescopeAdapter {
    pub fn new(client: Arc<dyn IndiClient>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        TelescopeAdapter {
            client,
            state: Mutex::new(AdapterState::default()),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TelescopeEvent> {
        self.events.subscribe()
    }

    /// Last equatorial position reported by the telescope
    pub async fn position(&self) -> Coordinates {
        self.state.lock().await.coordinates
    }

    pub async fn is_device_connected(&self) -> bool {
        let state = self.state.lock().await;
        match &state.telescope {
            Some(telescope) => telescope.device().is_connected().await,
            None => false,
        }
    }

    /// Names of all devices the server has announced
    pub async fn devices(&self) -> Vec<String> {
        self.state.lock().await.devices.clone()
    }

    pub(in crate::telescope_control) fn emit(&self, event: TelescopeEvent) {
        // No subscribers is not an error
        let _ = self.events.send(event);
    }

    /// Queues a property update. Failures are logged and otherwise ignored.
    pub(in crate::telescope_control) async fn send(&self, property: Property) {
        let name = property.name().to_string();
        if let Err(e) = self.client.send_new_property(property).await {
            tracing::error!("Failed to send {}: {}", name, e);
        }
    }

    pub(in crate::telescope_control) fn report(command: &str, result: AdapterResult<()>) {
        if let Err(e) = result {
            tracing::warn!("Skipping {}: {}", command, e);
        }
    }
}

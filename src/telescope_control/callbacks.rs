use std::sync::Arc;

use tokio::sync::mpsc;

use crate::indi_client::consts::*;
use crate::indi_client::{BaseDevice, ClientEvent, DeviceHandle, Property, SwitchVectorExt};
use crate::telescope_control::state::ActiveTelescope;
use crate::telescope_control::{Coordinates, TelescopeAdapter, TelescopeEvent};

impl TelescopeAdapter {
    /// Feeds client notifications into the adapter until the client drops its sender
    pub async fn run_event_loop(self: Arc<Self>, mut events: mpsc::UnboundedReceiver<ClientEvent>) {
        while let Some(event) = events.recv().await {
            self.handle_event(event).await;
        }
        tracing::debug!("Client event stream closed");
    }

    pub async fn handle_event(&self, event: ClientEvent) {
        tracing::trace!("{:?}", event);
        match event {
            ClientEvent::NewDevice(device) => self.new_device(device).await,
            ClientEvent::RemoveDevice(device) => self.remove_device(device).await,
            ClientEvent::NewProperty(property) => self.new_property(property).await,
            ClientEvent::UpdateProperty(property) => self.update_property(property).await,
            ClientEvent::RemoveProperty(property) => self.remove_property(property).await,
            ClientEvent::ServerConnected => self.server_connected().await,
            ClientEvent::ServerDisconnected(exit_code) => {
                self.server_disconnected(exit_code).await
            }
        }
    }

    /// The most recently announced device becomes the telescope
    pub async fn new_device(&self, device: DeviceHandle) {
        let mut state = self.state.lock().await;
        if !device.is_valid() {
            return;
        }

        let name = device.device_name().to_string();
        tracing::info!("New device {}", name);

        state.add_device(&name);
        state.telescope = Some(ActiveTelescope::new(device));

        self.emit(TelescopeEvent::DeviceDiscovered(name));
    }

    pub async fn remove_device(&self, device: DeviceHandle) {
        let mut state = self.state.lock().await;
        if !device.is_valid() {
            return;
        }

        let name = device.device_name().to_string();
        tracing::info!("Device {} removed", name);

        state.remove_device(&name);

        self.emit(TelescopeEvent::DeviceRemoved(name));
    }

    /// Only properties of the telescope are looked at. The first one seen
    /// while the telescope is disconnected triggers a connection request.
    pub async fn new_property(&self, property: Property) {
        let mut state = self.state.lock().await;
        let telescope = match &state.telescope {
            Some(t) if t.matches(property.device_name()) => t.clone(),
            _ => return,
        };

        tracing::debug!("New property {}", property.name());

        if property.is_name_match(EQUATORIAL_EOD_COORD) {
            match property.as_number().map(Coordinates::from_number_vector) {
                Some(Ok(coords)) => state.coordinates = coords,
                _ => tracing::warn!("Ignoring malformed {}", EQUATORIAL_EOD_COORD),
            }
        }

        if !telescope.device().is_connected().await {
            tracing::info!("Connecting to {}", telescope.name());
            if let Err(e) = self.client.connect_device(telescope.name()).await {
                tracing::error!("Failed to request connection to {}: {}", telescope.name(), e);
            }
        }
    }

    pub async fn update_property(&self, property: Property) {
        let mut state = self.state.lock().await;
        if property.is_name_match(TELESCOPE_SLEW_RATE) {
            if let Some(rates) = property.as_switch() {
                self.emit(TelescopeEvent::SpeedChanged(rates.on_index()));
            }
        } else if property.is_name_match(EQUATORIAL_EOD_COORD) {
            match property.as_number().map(Coordinates::from_number_vector) {
                Some(Ok(coords)) => {
                    state.coordinates = coords;
                    self.emit(TelescopeEvent::PositionChanged(coords));
                }
                _ => tracing::warn!("Ignoring malformed {}", EQUATORIAL_EOD_COORD),
            }
        }
    }

    pub async fn remove_property(&self, _property: Property) {}

    pub async fn server_connected(&self) {
        let _state = self.state.lock().await;
        tracing::info!("Server connected");
        self.emit(TelescopeEvent::ServerConnected);
    }

    pub async fn server_disconnected(&self, exit_code: i32) {
        let mut state = self.state.lock().await;
        tracing::info!("Server disconnected ({})", exit_code);
        state.devices.clear();
        state.telescope = None;
        self.emit(TelescopeEvent::ServerDisconnected(exit_code));
    }
}

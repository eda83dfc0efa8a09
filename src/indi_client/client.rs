use std::fmt;

use async_trait::async_trait;

use super::device::DeviceHandle;
use super::property::Property;

/// Outbound side of the device-control client.
///
/// Every call only queues work with the client. `send_new_property` also
/// replaces the client's local copy of the property, so later lookups on the
/// device see what was sent before the device answers.
#[async_trait]
pub trait IndiClient: Send + Sync {
    async fn send_new_property(&self, property: Property) -> eyre::Result<()>;

    async fn connect_device(&self, device: &str) -> eyre::Result<()>;

    async fn disconnect_device(&self, device: &str) -> eyre::Result<()>;
}

/// Notifications pushed by the client, in the order it received them
#[derive(Clone)]
pub enum ClientEvent {
    NewDevice(DeviceHandle),
    RemoveDevice(DeviceHandle),
    NewProperty(Property),
    UpdateProperty(Property),
    RemoveProperty(Property),
    ServerConnected,
    ServerDisconnected(i32),
}

impl fmt::Debug for ClientEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientEvent::NewDevice(d) => write!(f, "NewDevice({})", d.device_name()),
            ClientEvent::RemoveDevice(d) => write!(f, "RemoveDevice({})", d.device_name()),
            ClientEvent::NewProperty(p) => write!(f, "NewProperty({}.{})", p.device_name(), p.name()),
            ClientEvent::UpdateProperty(p) => {
                write!(f, "UpdateProperty({}.{})", p.device_name(), p.name())
            }
            ClientEvent::RemoveProperty(p) => {
                write!(f, "RemoveProperty({}.{})", p.device_name(), p.name())
            }
            ClientEvent::ServerConnected => write!(f, "ServerConnected"),
            ClientEvent::ServerDisconnected(code) => write!(f, "ServerDisconnected({})", code),
        }
    }
}

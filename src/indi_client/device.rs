use std::sync::Arc;

use async_trait::async_trait;

use super::property::*;
use super::{NumberVector, SwitchVector};

/// A device as known to the client. The client owns the device and its
/// property tables; lookups return copies of the client's current view.
#[async_trait]
pub trait BaseDevice: Send + Sync {
    /// An empty name marks a handle that refers to no device
    fn device_name(&self) -> &str;

    async fn is_connected(&self) -> bool;

    async fn get_property(&self, name: &str) -> Option<Property>;

    async fn get_switch(&self, name: &str) -> Option<SwitchVector> {
        self.get_property(name).await?.into_switch()
    }

    async fn get_number(&self, name: &str) -> Option<NumberVector> {
        self.get_property(name).await?.into_number()
    }

    fn is_valid(&self) -> bool {
        !self.device_name().is_empty()
    }
}

pub type DeviceHandle = Arc<dyn BaseDevice>;

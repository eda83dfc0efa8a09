use crate::indi_client::consts::*;
use crate::indi_client::{BaseDevice, Property, SwitchVectorExt};
use crate::telescope_control::state::AdapterState;
use crate::telescope_control::TelescopeAdapter;
use crate::util::*;

impl TelescopeAdapter {
    /// Moves the telescope to its park position and stops all motion
    pub async fn park_telescope(&self) {
        let state = self.state.lock().await;
        Self::report("park", self.select_park_member(&state, PARK).await);
    }

    /// Takes the telescope out of the parked state
    pub async fn un_park_telescope(&self) {
        let state = self.state.lock().await;
        Self::report("unpark", self.select_park_member(&state, UNPARK).await);
    }

    async fn select_park_member(
        &self,
        state: &AdapterState,
        member: &'static str,
    ) -> AdapterResult<()> {
        let device = state.connected_telescope().await?.device();

        let mut park = device
            .get_switch(TELESCOPE_PARK)
            .await
            .ok_or(AdapterError::MissingProperty(TELESCOPE_PARK))?;
        if !park.select(member) {
            return Err(AdapterError::MissingMember {
                property: TELESCOPE_PARK,
                member,
            });
        }

        self.send(Property::switch(device.device_name(), park)).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::indi_client::consts::*;
    use crate::indi_client::SwitchVectorExt;
    use crate::telescope_control::test_util::*;

    #[tokio::test]
    async fn test_unpark() {
        let (adapter, client) = create_adapter();
        let device = client.mount("Mount").await;
        adapter.new_device(device.clone()).await;

        adapter.park_telescope().await;
        adapter.un_park_telescope().await;

        let sent = client.sent().await;
        assert_eq!(sent.len(), 2);
        let park = sent[0].as_switch().unwrap();
        assert!(park.is_on(PARK));
        assert!(!park.is_on(UNPARK));
        let unpark = sent[1].as_switch().unwrap();
        assert!(unpark.is_on(UNPARK));
        assert!(!unpark.is_on(PARK));

        assert!(device.switch(TELESCOPE_PARK).await.unwrap().is_on(UNPARK));
    }

    #[tokio::test]
    async fn test_unpark_requires_park_property() {
        let (adapter, client) = create_adapter();
        let device = client.mount("Mount").await;
        device.remove(TELESCOPE_PARK).await;
        adapter.new_device(device).await;

        adapter.un_park_telescope().await;
        assert!(client.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_unpark_requires_connection() {
        let (adapter, client) = create_adapter();
        let device = client.mount("Mount").await;
        device.set_connected(false).await;
        adapter.new_device(device).await;

        adapter.un_park_telescope().await;
        assert!(client.sent().await.is_empty());
    }
}

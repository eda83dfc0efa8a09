use crate::indi_client::consts::*;
use crate::indi_client::{BaseDevice, Property, SwitchVectorExt};
use crate::telescope_control::state::AdapterState;
use crate::telescope_control::{Coordinates, TelescopeAdapter};
use crate::util::*;

impl TelescopeAdapter {
    /// Slews to the given coordinates and tracks them once there.
    /// Skipped, with a warning, if the telescope can't take the command.
    pub async fn set_position(&self, coords: Coordinates) {
        let state = self.state.lock().await;
        Self::report("set_position", self.slew_to(&state, coords).await);
    }

    async fn slew_to(&self, state: &AdapterState, coords: Coordinates) -> AdapterResult<()> {
        let device = state.connected_telescope().await?.device();

        let mut coord_set = device
            .get_switch(ON_COORD_SET)
            .await
            .ok_or(AdapterError::MissingProperty(ON_COORD_SET))?;
        let mut eod = device
            .get_number(EQUATORIAL_EOD_COORD)
            .await
            .ok_or(AdapterError::MissingProperty(EQUATORIAL_EOD_COORD))?;
        coords.write_to(&mut eod)?;

        if !coord_set.has_member(TRACK) {
            return Err(AdapterError::MissingMember {
                property: ON_COORD_SET,
                member: TRACK,
            });
        }

        // SLEW would stop at the target instead of tracking it
        if !coord_set.is_on(TRACK) {
            coord_set.select(TRACK);
            self.send(Property::switch(device.device_name(), coord_set))
                .await;
        }

        tracing::debug!("Slewing to {}", coords);
        self.send(Property::number(device.device_name(), eod)).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::indi_client::consts::*;
    use crate::indi_client::{NumberVectorExt, SwitchVectorExt};
    use crate::telescope_control::test_util::*;
    use crate::telescope_control::Coordinates;

    #[tokio::test]
    async fn test_set_position_without_device() {
        let (adapter, client) = create_adapter();
        adapter.set_position(Coordinates::new(3., 4.)).await;
        assert!(client.sent().await.is_empty());
        assert_eq!(adapter.position().await, Coordinates::default());
    }

    #[tokio::test]
    async fn test_set_position_when_disconnected() {
        let (adapter, client) = create_adapter();
        let device = client.mount("Mount").await;
        device.set_connected(false).await;
        adapter.new_device(device.clone()).await;

        adapter.set_position(Coordinates::new(3., 4.)).await;
        assert!(client.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_set_position_enables_track() {
        let (adapter, client) = create_adapter();
        let device = client.mount("Mount").await;
        device.set_coord_mode(SLEW).await;
        adapter.new_device(device.clone()).await;

        adapter.set_position(Coordinates::new(6.5, -12.)).await;

        let sent = client.sent().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].name(), ON_COORD_SET);
        let coord_set = sent[0].as_switch().unwrap();
        assert!(coord_set.is_on(TRACK));
        assert!(!coord_set.is_on(SLEW));
        let eod = sent[1].as_number().unwrap();
        assert_eq!(eod.value(RA), Some(6.5));
        assert_eq!(eod.value(DEC), Some(-12.));
    }

    #[tokio::test]
    async fn test_set_position_skips_redundant_track() {
        let (adapter, client) = create_adapter();
        let device = client.mount("Mount").await;
        adapter.new_device(device.clone()).await;

        adapter.set_position(Coordinates::new(1., 2.)).await;

        let sent = client.sent().await;
        assert_eq!(sent.len(), 1);
        assert!(sent[0].is_name_match(EQUATORIAL_EOD_COORD));
        assert!(sent[0].as_number().is_some());
    }

    #[tokio::test]
    async fn test_set_position_missing_coordinates() {
        let (adapter, client) = create_adapter();
        let device = client.mount("Mount").await;
        device.remove(EQUATORIAL_EOD_COORD).await;
        device.set_coord_mode(SLEW).await;
        adapter.new_device(device.clone()).await;

        adapter.set_position(Coordinates::new(1., 2.)).await;
        assert_eq!(client.attempts().await, 0);
    }

    #[tokio::test]
    async fn test_set_position_missing_coord_set() {
        let (adapter, client) = create_adapter();
        let device = client.mount("Mount").await;
        device.remove(ON_COORD_SET).await;
        adapter.new_device(device.clone()).await;

        adapter.set_position(Coordinates::new(1., 2.)).await;
        assert_eq!(client.attempts().await, 0);
        assert_eq!(device.coordinates().await, Some(Coordinates::new(0., 90.)));
    }

    #[tokio::test]
    async fn test_set_position_missing_track_member() {
        let (adapter, client) = create_adapter();
        let device = client.mount("Mount").await;
        device
            .update_switch(ON_COORD_SET, |svp| {
                svp.values.remove(TRACK);
                svp.select(SLEW);
            })
            .await
            .unwrap();
        adapter.new_device(device.clone()).await;

        adapter.set_position(Coordinates::new(1., 2.)).await;
        assert_eq!(client.attempts().await, 0);
    }
}

use crate::indi_client::consts::*;
use crate::indi_client::{BaseDevice, Property, SwitchVector, SwitchVectorExt};
use crate::telescope_control::state::AdapterState;
use crate::telescope_control::{Coordinates, TelescopeAdapter};
use crate::util::*;

fn select_coord_mode(coord_set: &mut SwitchVector, mode: &'static str) -> AdapterResult<()> {
    if !coord_set.has_member(mode) {
        return Err(AdapterError::MissingMember {
            property: ON_COORD_SET,
            member: mode,
        });
    }

    for member in [TRACK, SLEW, SYNC] {
        coord_set.set_member(member, member == mode);
    }
    Ok(())
}

impl TelescopeAdapter {
    /// Tells the mount it is pointing at the given coordinates without moving it
    pub async fn sync_position(&self, coords: Coordinates) {
        let state = self.state.lock().await;
        Self::report("sync_position", self.sync_to(&state, coords).await);
    }

    async fn sync_to(&self, state: &AdapterState, coords: Coordinates) -> AdapterResult<()> {
        let device = state.connected_telescope().await?.device();

        let coord_set = device
            .get_switch(ON_COORD_SET)
            .await
            .ok_or(AdapterError::MissingProperty(ON_COORD_SET))?;
        let mut eod = device
            .get_number(EQUATORIAL_EOD_COORD)
            .await
            .ok_or(AdapterError::MissingProperty(EQUATORIAL_EOD_COORD))?;
        coords.write_to(&mut eod)?;

        let mut sync_mode = coord_set.clone();
        select_coord_mode(&mut sync_mode, SYNC)?;
        let mut track_mode = coord_set;
        select_coord_mode(&mut track_mode, TRACK)?;

        // SYNC must not stay selected or the next goto would only sync
        tracing::debug!("Syncing to {}", coords);
        let name = device.device_name();
        self.send(Property::switch(name, sync_mode)).await;
        self.send(Property::number(name, eod)).await;
        self.send(Property::switch(name, track_mode)).await;
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
    async fn test_sync_sends_three_updates() {
        let (adapter, client) = create_adapter();
        adapter.new_device(client.mount("Mount").await).await;

        adapter.sync_position(Coordinates::new(18., 33.)).await;

        let sent = client.sent().await;
        assert_eq!(sent.len(), 3);

        assert_eq!(sent[0].name(), ON_COORD_SET);
        let first = sent[0].as_switch().unwrap();
        assert!(first.is_on(SYNC));
        assert!(!first.is_on(TRACK));
        assert!(!first.is_on(SLEW));

        let eod = sent[1].as_number().unwrap();
        assert_eq!(eod.value(RA), Some(18.));
        assert_eq!(eod.value(DEC), Some(33.));

        let last = sent[2].as_switch().unwrap();
        assert!(last.is_on(TRACK));
        assert!(!last.is_on(SYNC));
        assert!(!last.is_on(SLEW));
    }

    #[tokio::test]
    async fn test_sync_ignores_failed_sends() {
        let (adapter, client) = create_adapter();
        adapter.new_device(client.mount("Mount").await).await;
        client.fail_sends(true).await;

        adapter.sync_position(Coordinates::new(1., 1.)).await;

        assert_eq!(client.attempts().await, 3);
    }

    #[tokio::test]
    async fn test_sync_without_coord_set() {
        let (adapter, client) = create_adapter();
        let device = client.mount("Mount").await;
        device.remove(ON_COORD_SET).await;
        adapter.new_device(device).await;

        adapter.sync_position(Coordinates::new(1., 1.)).await;
        assert_eq!(client.attempts().await, 0);
    }
}

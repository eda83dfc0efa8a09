//! A loopback INDI mount: plays both the client and the device so the
//! adapter can be exercised without an INDI server.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use eyre::{bail, eyre};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

pub use device::{slew_rate_member, SimulatedDevice};

use crate::astro_math;
use crate::config::SimulatorSettings;
use crate::indi_client::consts::*;
use crate::indi_client::*;
use crate::telescope_control::{Coordinates, TelescopeEvent};
use crate::util::*;

mod device;

pub struct SimulatedMount {
    device: Arc<SimulatedDevice>,
    settings: SimulatorSettings,
    events: mpsc::UnboundedSender<ClientEvent>,
}

impl SimulatedMount {
    pub fn new(settings: &SimulatorSettings) -> (Arc<Self>, mpsc::UnboundedReceiver<ClientEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let mount = SimulatedMount {
            device: Arc::new(SimulatedDevice::new(&settings.device_name, settings)),
            settings: settings.clone(),
            events,
        };
        (Arc::new(mount), receiver)
    }

    pub fn device(&self) -> Arc<SimulatedDevice> {
        self.device.clone()
    }

    fn publish(&self, event: ClientEvent) -> eyre::Result<()> {
        self.events
            .send(event)
            .map_err(|_| eyre!("Client event receiver dropped"))
    }

    /// Announces the server, the device and each of its properties
    pub async fn start(&self) -> eyre::Result<()> {
        self.publish(ClientEvent::ServerConnected)?;
        self.publish(ClientEvent::NewDevice(self.device.clone()))?;
        for property in self.device.properties().await {
            self.publish(ClientEvent::NewProperty(property))?;
        }
        Ok(())
    }

    pub fn shutdown(&self, exit_code: i32) -> eyre::Result<()> {
        self.publish(ClientEvent::RemoveDevice(self.device.clone()))?;
        self.publish(ClientEvent::ServerDisconnected(exit_code))
    }

    /// Shuts down and waits, up to `limit`, for the adapter behind `events`
    /// to report the disconnect
    pub async fn shutdown_and_wait(
        &self,
        mut events: broadcast::Receiver<TelescopeEvent>,
        exit_code: i32,
        limit: Duration,
    ) -> eyre::Result<()> {
        self.shutdown(exit_code)?;
        tokio::time::timeout(limit, async {
            loop {
                match events.recv().await {
                    Ok(TelescopeEvent::ServerDisconnected(_)) => return Ok(()),
                    Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => {
                        bail!("Telescope events closed before the disconnect")
                    }
                }
            }
        })
        .await
        .map_err(|_| eyre!("Timed out waiting for the adapter to disconnect"))?
    }

    fn check_device(&self, device: &str) -> eyre::Result<()> {
        if device != self.device.device_name() {
            bail!("Unknown device {}", device);
        }
        Ok(())
    }

    /// Handles a coordinate write according to the selected `ON_COORD_SET` mode
    async fn set_target(&self, target: &NumberVector) -> eyre::Result<()> {
        let coords = Coordinates::from_number_vector(target)?;
        let sync = self
            .device
            .get_switch(ON_COORD_SET)
            .await
            .map_or(false, |svp| svp.is_on(SYNC));

        if self.device.is_parked().await {
            tracing::warn!("Simulated mount is parked, ignoring new coordinates");
            let mut current = self
                .device
                .get_number(EQUATORIAL_EOD_COORD)
                .await
                .ok_or_else(|| eyre!("{} missing", EQUATORIAL_EOD_COORD))?;
            current.state = PropertyState::Alert;
            let current = Property::number(self.device.device_name(), current);
            self.device.store(current.clone()).await;
            return self.publish(ClientEvent::UpdateProperty(current));
        }

        if sync {
            tracing::info!("Simulated mount synced to {}", coords);
        } else {
            tracing::info!("Simulated mount slewed to {}", coords);
        }
        self.move_to(coords).await
    }

    async fn move_to(&self, coords: Coordinates) -> eyre::Result<()> {
        let ra = astro_math::modulo(coords.ra(), 24.);
        let dec = coords.dec().clamp(-90., 90.);
        let eod = self
            .device
            .set_coordinates(ra, dec)
            .await
            .ok_or_else(|| eyre!("{} missing", EQUATORIAL_EOD_COORD))?;
        self.publish(ClientEvent::UpdateProperty(eod))
    }

    async fn stop_motion(&self) -> eyre::Result<()> {
        for name in [TELESCOPE_MOTION_NS, TELESCOPE_MOTION_WE] {
            if let Some(svp) = self.device.update_switch(name, |svp| svp.reset()).await {
                self.publish(ClientEvent::UpdateProperty(Property::switch(
                    self.device.device_name(),
                    svp,
                )))?;
            }
        }
        Ok(())
    }

    async fn selected_rate(&self) -> Option<Degrees> {
        let rates = self.device.get_switch(TELESCOPE_SLEW_RATE).await?;
        let index = rates.on_index()?;
        self.settings
            .slew_rates
            .get(index)
            .map(|r| r.degrees_per_second)
    }

    async fn axis_direction(&self, property: &str) -> Option<MotionDirection> {
        let svp = self.device.get_switch(property).await?;
        [
            MotionDirection::North,
            MotionDirection::South,
            MotionDirection::East,
            MotionDirection::West,
        ]
        .into_iter()
        .find(|d| d.property_name() == property && svp.is_on(d.member_name()))
    }

    /// Advances the position by `elapsed` seconds of manual motion
    pub async fn step_motion(&self, elapsed: f64) -> eyre::Result<()> {
        if self.device.is_parked().await {
            return Ok(());
        }

        let dec_motion = self.axis_direction(TELESCOPE_MOTION_NS).await;
        let ra_motion = self.axis_direction(TELESCOPE_MOTION_WE).await;
        if dec_motion.is_none() && ra_motion.is_none() {
            return Ok(());
        }

        let (rate, current) = match (self.selected_rate().await, self.device.coordinates().await) {
            (Some(rate), Some(current)) => (rate, current),
            _ => return Ok(()),
        };
        let distance = rate * elapsed;

        let dec = match dec_motion {
            Some(d) => current.dec() + d.sign() * distance,
            None => current.dec(),
        };
        let ra = match ra_motion {
            Some(d) => current.ra() + d.sign() * astro_math::deg_to_hours(distance),
            None => current.ra(),
        };
        self.move_to(Coordinates::new(ra, dec)).await
    }

    /// Runs manual motion on a fixed period until the event receiver goes away
    pub fn spawn_motion(self: &Arc<Self>) -> JoinHandle<()> {
        let mount = Arc::clone(self);
        let period = Duration::from_millis(mount.settings.motion_period_millis.max(1));
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            while !mount.events.is_closed() {
                interval.tick().await;
                if let Err(e) = mount.step_motion(period.as_secs_f64()).await {
                    tracing::debug!("Stopping simulated motion: {}", e);
                    break;
                }
            }
        })
    }
}

#[async_trait]
impl IndiClient for SimulatedMount {
    async fn send_new_property(&self, property: Property) -> eyre::Result<()> {
        self.check_device(property.device_name())?;

        // The position only changes once the mount has acted on the target
        if let Some(nvp) = property.as_number() {
            if property.is_name_match(EQUATORIAL_EOD_COORD) {
                return self.set_target(nvp).await;
            }
        }

        self.device.store(property.clone()).await;
        if property.is_name_match(TELESCOPE_PARK)
            && property.as_switch().map_or(false, |svp| svp.is_on(PARK))
        {
            tracing::info!("Simulated mount parking");
            self.stop_motion().await?;
            self.move_to(self.settings.park_position).await?;
        }
        self.publish(ClientEvent::UpdateProperty(property))
    }

    async fn connect_device(&self, device: &str) -> eyre::Result<()> {
        self.check_device(device)?;
        let connection = self
            .device
            .set_connected(true)
            .await
            .ok_or_else(|| eyre!("{} missing", CONNECTION))?;
        self.publish(ClientEvent::UpdateProperty(Property::switch(device, connection)))
    }

    async fn disconnect_device(&self, device: &str) -> eyre::Result<()> {
        self.check_device(device)?;
        let connection = self
            .device
            .set_connected(false)
            .await
            .ok_or_else(|| eyre!("{} missing", CONNECTION))?;
        self.publish(ClientEvent::UpdateProperty(Property::switch(device, connection)))
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::*;

    use super::*;

    async fn connected_mount() -> (Arc<SimulatedMount>, mpsc::UnboundedReceiver<ClientEvent>) {
        let (mount, events) = SimulatedMount::new(&SimulatorSettings::default());
        mount.connect_device("Telescope Simulator").await.unwrap();
        (mount, events)
    }

    #[tokio::test]
    async fn test_start_announces_properties() {
        let (mount, mut events) = SimulatedMount::new(&SimulatorSettings::default());
        mount.start().await.unwrap();

        assert!(matches!(events.recv().await, Some(ClientEvent::ServerConnected)));
        assert!(
            matches!(events.recv().await, Some(ClientEvent::NewDevice(d)) if d.device_name() == "Telescope Simulator")
        );
        let mut count = 0;
        while let Ok(ClientEvent::NewProperty(_)) = events.try_recv() {
            count += 1;
        }
        assert_eq!(count, 8);
    }

    #[tokio::test]
    async fn test_rejects_unknown_device() {
        let (mount, _events) = SimulatedMount::new(&SimulatorSettings::default());
        assert!(mount.connect_device("Other").await.is_err());
    }

    #[tokio::test]
    async fn test_connection() {
        let (mount, mut events) = connected_mount().await;
        let device = mount.device();
        assert!(device.is_connected().await);

        mount.disconnect_device("Telescope Simulator").await.unwrap();
        assert!(!device.is_connected().await);
        assert!(matches!(events.recv().await, Some(ClientEvent::UpdateProperty(p)) if p.is_name_match(CONNECTION)));

        let info = device.get_property(DRIVER_INFO).await.unwrap();
        let info = info.as_text().unwrap();
        assert_eq!(info.values[DRIVER_NAME].value, "Simulated Mount");
    }

    #[tokio::test]
    async fn test_goto_and_park() {
        let (mount, _events) = connected_mount().await;
        let device = mount.device();

        let mut eod = device.get_number(EQUATORIAL_EOD_COORD).await.unwrap();
        Coordinates::new(25., 45.).write_to(&mut eod).unwrap();
        mount
            .send_new_property(Property::number("Telescope Simulator", eod.clone()))
            .await
            .unwrap();
        assert_eq!(device.coordinates().await, Some(Coordinates::new(1., 45.)));

        let mut park = device.switch(TELESCOPE_PARK).await.unwrap();
        park.select(PARK);
        mount
            .send_new_property(Property::switch("Telescope Simulator", park))
            .await
            .unwrap();
        assert!(device.is_parked().await);
        assert_eq!(
            device.coordinates().await,
            Some(SimulatorSettings::default().park_position)
        );

        Coordinates::new(3., 3.).write_to(&mut eod).unwrap();
        mount
            .send_new_property(Property::number("Telescope Simulator", eod))
            .await
            .unwrap();
        assert_eq!(
            device.coordinates().await,
            Some(SimulatorSettings::default().park_position)
        );
    }

    #[tokio::test]
    async fn test_step_motion() {
        let (mount, _events) = connected_mount().await;
        let device = mount.device();
        device.set_coordinates(12., 0.).await.unwrap();

        device
            .update_switch(TELESCOPE_MOTION_NS, |svp| {
                svp.set_member(MOTION_NORTH, true);
            })
            .await
            .unwrap();
        device
            .update_switch(TELESCOPE_MOTION_WE, |svp| {
                svp.set_member(MOTION_WEST, true);
            })
            .await
            .unwrap();

        let rate = SimulatorSettings::default().slew_rates[0].degrees_per_second;
        mount.step_motion(10.).await.unwrap();

        let coords = device.coordinates().await.unwrap();
        assert_float_absolute_eq!(coords.dec(), rate * 10., 1e-9);
        assert_float_absolute_eq!(coords.ra(), 12. - rate * 10. / 15., 1e-9);
    }
}

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::config::SimulatorSettings;
use crate::indi_client::consts::*;
use crate::indi_client::*;
use crate::telescope_control::Coordinates;
use crate::util::*;

/// A telescope device whose property table lives in memory
pub struct SimulatedDevice {
    name: String,
    properties: RwLock<Vec<Property>>,
}

/// Slew rate members are named so that name order is rate order
pub fn slew_rate_member(index: usize) -> String {
    format!("SLEW_RATE_{:02}", index)
}

impl SimulatedDevice {
    pub fn new(name: &str, settings: &SimulatorSettings) -> Self {
        let position = settings.initial_position;
        let rate_names: Vec<String> = (0..settings.slew_rates.len())
            .map(slew_rate_member)
            .collect();
        let rates: Vec<(&str, &str, bool)> = rate_names
            .iter()
            .zip(&settings.slew_rates)
            .enumerate()
            .map(|(i, (member, rate))| (member.as_str(), rate.label.as_str(), i == 0))
            .collect();

        let properties = vec![
            Property::switch(
                name,
                new_switch_vector(
                    CONNECTION,
                    "Connection",
                    SwitchRule::OneOfMany,
                    &[(CONNECT, "Connect", false), (DISCONNECT, "Disconnect", true)],
                ),
            ),
            Property::text(
                name,
                new_text_vector(DRIVER_INFO, "Driver Info", &[(DRIVER_NAME, "Simulated Mount")]),
            ),
            Property::switch(
                name,
                new_switch_vector(
                    ON_COORD_SET,
                    "On Set",
                    SwitchRule::OneOfMany,
                    &[(TRACK, "Track", true), (SLEW, "Slew", false), (SYNC, "Sync", false)],
                ),
            ),
            Property::number(
                name,
                new_number_vector(
                    EQUATORIAL_EOD_COORD,
                    "Eq. Coordinates",
                    &[(RA, 0., 24., position.ra()), (DEC, -90., 90., position.dec())],
                ),
            ),
            Property::switch(
                name,
                new_switch_vector(
                    TELESCOPE_PARK,
                    "Parking",
                    SwitchRule::OneOfMany,
                    &[(PARK, "Park(ed)", false), (UNPARK, "UnPark(ed)", true)],
                ),
            ),
            Property::switch(
                name,
                new_switch_vector(
                    TELESCOPE_MOTION_NS,
                    "Motion N/S",
                    SwitchRule::AtMostOne,
                    &[(MOTION_NORTH, "North", false), (MOTION_SOUTH, "South", false)],
                ),
            ),
            Property::switch(
                name,
                new_switch_vector(
                    TELESCOPE_MOTION_WE,
                    "Motion W/E",
                    SwitchRule::AtMostOne,
                    &[(MOTION_WEST, "West", false), (MOTION_EAST, "East", false)],
                ),
            ),
            Property::switch(
                name,
                new_switch_vector(TELESCOPE_SLEW_RATE, "Slew Rate", SwitchRule::OneOfMany, &rates),
            ),
        ];

        SimulatedDevice {
            name: name.to_string(),
            properties: RwLock::new(properties),
        }
    }

    pub async fn properties(&self) -> Vec<Property> {
        self.properties.read().await.clone()
    }

    pub async fn property(&self, name: &str) -> Option<Property> {
        self.properties
            .read()
            .await
            .iter()
            .find(|p| p.is_name_match(name))
            .cloned()
    }

    pub async fn switch(&self, name: &str) -> Option<SwitchVector> {
        self.get_switch(name).await
    }

    /// Replaces the property with the same name, or adds it
    pub async fn store(&self, property: Property) {
        let mut properties = self.properties.write().await;
        match properties
            .iter_mut()
            .find(|p| p.is_name_match(property.name()))
        {
            Some(p) => *p = property,
            None => properties.push(property),
        }
    }

    pub async fn remove(&self, name: &str) -> Option<Property> {
        let mut properties = self.properties.write().await;
        let index = properties.iter().position(|p| p.is_name_match(name))?;
        Some(properties.remove(index))
    }

    /// Applies `f` to a stored switch vector and returns the updated copy
    pub async fn update_switch<F>(&self, name: &str, f: F) -> Option<SwitchVector>
    where
        F: FnOnce(&mut SwitchVector),
    {
        let mut properties = self.properties.write().await;
        let entry = properties.iter_mut().find(|p| p.is_name_match(name))?;
        let mut svp = entry.as_switch()?.clone();
        f(&mut svp);
        *entry = Property::switch(&self.name, svp.clone());
        Some(svp)
    }

    pub async fn set_connected(&self, connected: bool) -> Option<SwitchVector> {
        self.update_switch(CONNECTION, |svp| {
            svp.select(if connected { CONNECT } else { DISCONNECT });
            svp.state = PropertyState::Ok;
        })
        .await
    }

    pub async fn set_coord_mode(&self, mode: &str) -> Option<SwitchVector> {
        self.update_switch(ON_COORD_SET, |svp| {
            svp.select(mode);
        })
        .await
    }

    pub async fn coordinates(&self) -> Option<Coordinates> {
        let nvp = self.get_number(EQUATORIAL_EOD_COORD).await?;
        Coordinates::from_number_vector(&nvp).ok()
    }

    /// Stores new coordinates and returns the updated property
    pub async fn set_coordinates(&self, ra: Hours, dec: Degrees) -> Option<Property> {
        let mut properties = self.properties.write().await;
        let entry = properties
            .iter_mut()
            .find(|p| p.is_name_match(EQUATORIAL_EOD_COORD))?;
        let mut nvp = entry.as_number()?.clone();
        Coordinates::new(ra, dec).write_to(&mut nvp).ok()?;
        nvp.state = PropertyState::Ok;
        *entry = Property::number(&self.name, nvp);
        Some(entry.clone())
    }

    pub async fn is_parked(&self) -> bool {
        match self.get_switch(TELESCOPE_PARK).await {
            Some(svp) => svp.is_on(PARK),
            None => false,
        }
    }
}

#[async_trait]
impl BaseDevice for SimulatedDevice {
    fn device_name(&self) -> &str {
        &self.name
    }

    async fn is_connected(&self) -> bool {
        match self.get_switch(CONNECTION).await {
            Some(svp) => svp.is_on(CONNECT),
            None => false,
        }
    }

    async fn get_property(&self, name: &str) -> Option<Property> {
        self.property(name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_property_table() {
        let device = SimulatedDevice::new("Mount", &SimulatorSettings::default());
        assert!(!device.is_connected().await);
        assert_eq!(device.properties().await.len(), 8);
        assert!(device
            .properties()
            .await
            .iter()
            .all(|p| p.device_name() == "Mount"));

        device.set_connected(true).await.unwrap();
        assert!(device.is_connected().await);

        let rates = device.switch(TELESCOPE_SLEW_RATE).await.unwrap();
        assert_eq!(rates.on_index(), Some(0));
        assert_eq!(rates.member_names()[1], slew_rate_member(1));
        assert!(device.get_number(TELESCOPE_SLEW_RATE).await.is_none());

        device.set_coordinates(7., 8.).await.unwrap();
        assert_eq!(device.coordinates().await, Some(Coordinates::new(7., 8.)));

        assert!(device.remove(TELESCOPE_PARK).await.is_some());
        assert!(device.remove(TELESCOPE_PARK).await.is_none());
        assert!(!device.is_parked().await);
    }

    #[test]
    fn test_rate_members_sort_in_rate_order() {
        let names: Vec<String> = (0..12).map(slew_rate_member).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}

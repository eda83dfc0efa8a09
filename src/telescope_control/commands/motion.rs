use crate::indi_client::consts::*;
use crate::indi_client::{BaseDevice, Property, SwitchVectorExt};
use crate::telescope_control::state::AdapterState;
use crate::telescope_control::TelescopeAdapter;
use crate::util::*;

impl TelescopeAdapter {
    /// Starts moving north at slew rate `speed`, or stops if `speed` is [`SLEW_STOP`]
    pub async fn move_north(&self, speed: i32) {
        self.move_towards(MotionDirection::North, speed).await
    }

    pub async fn move_south(&self, speed: i32) {
        self.move_towards(MotionDirection::South, speed).await
    }

    pub async fn move_east(&self, speed: i32) {
        self.move_towards(MotionDirection::East, speed).await
    }

    pub async fn move_west(&self, speed: i32) {
        self.move_towards(MotionDirection::West, speed).await
    }

    /// The two axes are independent, so moving north and east together
    /// gives a diagonal motion.
    pub async fn move_towards(&self, direction: MotionDirection, speed: i32) {
        let state = self.state.lock().await;
        Self::report(
            &format!("move {}", direction),
            self.apply_motion(&state, direction, speed).await,
        );
    }

    /// Selects slew rate `speed` for manual motion
    pub async fn set_speed(&self, speed: i32) {
        let state = self.state.lock().await;
        Self::report("set_speed", self.apply_speed(&state, speed).await);
    }

    async fn apply_motion(
        &self,
        state: &AdapterState,
        direction: MotionDirection,
        speed: i32,
    ) -> AdapterResult<()> {
        let device = state.connected_telescope().await?.device();

        let property = direction.property_name();
        let member = direction.member_name();
        let mut motion = device
            .get_switch(property)
            .await
            .ok_or(AdapterError::MissingProperty(property))?;
        if !motion.has_member(member) {
            return Err(AdapterError::MissingMember { property, member });
        }

        let on = if SlewRate::is_stop(speed) {
            false
        } else {
            // A rejected rate leaves the current one in place
            Self::report("set_speed", self.apply_speed(state, speed).await);
            true
        };

        motion.set_member(member, on);
        self.send(Property::switch(device.device_name(), motion))
            .await;
        Ok(())
    }

    /// Expects the state lock to be held by the caller
    async fn apply_speed(&self, state: &AdapterState, speed: i32) -> AdapterResult<()> {
        let device = state.telescope()?.device();

        let mut rates = device
            .get_switch(TELESCOPE_SLEW_RATE)
            .await
            .ok_or(AdapterError::MissingProperty(TELESCOPE_SLEW_RATE))?;

        let count = rates.values.len();
        let index = usize::try_from(speed)
            .ok()
            .filter(|i| *i < count)
            .ok_or(AdapterError::SpeedOutOfRange { speed, count })?;

        rates.select_index(index);
        self.send(Property::switch(device.device_name(), rates))
            .await;
        Ok(())
    }
}

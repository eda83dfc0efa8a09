use super::Coordinates;

/// Notifications published to the front end
#[derive(Debug, Clone, PartialEq)]
pub enum TelescopeEvent {
    DeviceDiscovered(String),
    DeviceRemoved(String),
    /// Index of the selected slew rate, if any is selected
    SpeedChanged(Option<usize>),
    PositionChanged(Coordinates),
    ServerConnected,
    ServerDisconnected(i32),
}

pub use coordinates::Coordinates;
pub use events::TelescopeEvent;
pub use telescope_adapter::TelescopeAdapter;

mod callbacks;
mod commands {
    pub mod connection;
    pub mod motion;
    pub mod parking;
    pub mod pointing_pos;
    pub mod sync;
}
mod coordinates;
mod events;
mod state;
mod telescope_adapter;
#[cfg(test)]
pub(in crate::telescope_control) mod test_util;

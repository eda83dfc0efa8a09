pub mod astro_math;
pub mod config;
pub mod console;
pub mod indi_client;
pub mod simulator;
pub mod telescope_control;
pub mod util;

pub use config::Config;
pub use telescope_control::{Coordinates, TelescopeAdapter, TelescopeEvent};

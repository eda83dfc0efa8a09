pub mod motion_direction;
pub mod slew_rate;

pub use motion_direction::*;
pub use slew_rate::*;

pub use crate::astro_math::{Degrees, Hours};

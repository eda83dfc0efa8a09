use std::fmt::Formatter;

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// The standard telescope slew rate levels, lowest first.
/// Drivers may expose more levels than these in `TELESCOPE_SLEW_RATE`.
#[derive(Debug, Eq, PartialEq, Copy, Clone, IntoPrimitive, TryFromPrimitive)]
#[repr(i32)]
pub enum SlewRate {
    Guide = 0,
    Centering = 1,
    Find = 2,
    Max = 3,
}

/// Speed value that stops motion on an axis instead of selecting a rate
pub const SLEW_STOP: i32 = SlewRate::Guide as i32 - 1;

impl SlewRate {
    pub fn is_stop(speed: i32) -> bool {
        speed == SLEW_STOP
    }

    /// Describes a speed index, naming it when it is one of the standard levels
    pub fn describe(speed: i32) -> String {
        if Self::is_stop(speed) {
            return "stop".to_string();
        }
        match SlewRate::try_from(speed) {
            Ok(rate) => format!("{} ({})", speed, rate),
            Err(_) => speed.to_string(),
        }
    }
}

impl core::fmt::Display for SlewRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SlewRate::Guide => write!(f, "Guide"),
            SlewRate::Centering => write!(f, "Centering"),
            SlewRate::Find => write!(f, "Find"),
            SlewRate::Max => write!(f, "Max"),
        }
    }
}

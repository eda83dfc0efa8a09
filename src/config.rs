use serde::{Deserialize, Serialize};

use crate::telescope_control::Coordinates;
use crate::util::*;

/* Config */
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub simulator: SimulatorSettings,
    pub logging: LogSettings,
}

/* Simulated Mount */
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorSettings {
    pub device_name: String,
    pub initial_position: Coordinates,
    pub park_position: Coordinates,
    pub slew_rates: Vec<SlewRateSetting>,
    pub motion_period_millis: u64,
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            device_name: "Telescope Simulator".to_string(),
            initial_position: Coordinates::new(0., 90.),
            park_position: Coordinates::new(0., 90.),
            slew_rates: [1., 2., 8., 16., 64., 128., 256., 512.]
                .into_iter()
                .map(SlewRateSetting::sidereal_multiple)
                .collect(),
            motion_period_millis: 250,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlewRateSetting {
    pub label: String,
    pub degrees_per_second: Degrees,
}

impl SlewRateSetting {
    const SIDEREAL_DEGREES_PER_SECOND: Degrees = 0.00417809;

    pub fn sidereal_multiple(multiple: f64) -> Self {
        Self {
            label: format!("{}x", multiple),
            degrees_per_second: multiple * Self::SIDEREAL_DEGREES_PER_SECOND,
        }
    }
}

/* Logging */
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    /// Used when RUST_LOG is not set
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rates() {
        let settings = SimulatorSettings::default();
        assert_eq!(settings.slew_rates.len(), 8);
        assert_eq!(settings.slew_rates[0].label, "1x");
        assert!(settings.slew_rates[7].degrees_per_second > 2.);
    }
}

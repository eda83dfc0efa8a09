use serde::{Deserialize, Serialize};

use crate::indi_client::consts::*;
use crate::indi_client::{NumberVector, NumberVectorExt};
use crate::util::*;

/// Equatorial coordinates of date. Replaced as a whole, never edited in place.
#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize)]
pub struct Coordinates {
    ra: Hours,
    dec: Degrees,
}

impl Coordinates {
    pub fn new(ra: Hours, dec: Degrees) -> Self {
        Coordinates { ra, dec }
    }

    pub fn ra(&self) -> Hours {
        self.ra
    }

    pub fn dec(&self) -> Degrees {
        self.dec
    }

    /// Reads the RA and DEC members of `EQUATORIAL_EOD_COORD`
    pub fn from_number_vector(nvp: &NumberVector) -> AdapterResult<Self> {
        match (nvp.value(RA), nvp.value(DEC)) {
            (Some(ra), Some(dec)) => Ok(Coordinates { ra, dec }),
            _ => Err(AdapterError::MalformedProperty(EQUATORIAL_EOD_COORD)),
        }
    }

    /// Writes the RA and DEC members of `EQUATORIAL_EOD_COORD`
    pub fn write_to(&self, nvp: &mut NumberVector) -> AdapterResult<()> {
        if nvp.value(RA).is_none() || nvp.value(DEC).is_none() {
            return Err(AdapterError::MalformedProperty(EQUATORIAL_EOD_COORD));
        }
        nvp.set_value(RA, self.ra);
        nvp.set_value(DEC, self.dec);
        Ok(())
    }
}

// Tolerance is machine epsilon, not an astronomical one
impl PartialEq for Coordinates {
    fn eq(&self, other: &Self) -> bool {
        (self.ra - other.ra).abs() <= f64::EPSILON && (self.dec - other.dec).abs() <= f64::EPSILON
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RA {:.6}h DEC {:.6}°", self.ra, self.dec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indi_client::new_number_vector;

    #[test]
    fn test_equality_within_epsilon() {
        let origin = Coordinates::new(0., 0.);
        let nudged = Coordinates::new(f64::EPSILON, -f64::EPSILON);

        assert_eq!(origin, origin);
        assert_eq!(origin, nudged);
        assert_eq!(nudged, origin);
        assert_ne!(origin.ra(), nudged.ra());
    }

    #[test]
    fn test_inequality_past_epsilon() {
        let origin = Coordinates::new(0., 0.);
        let ra_off = Coordinates::new(2. * f64::EPSILON, 0.);
        let dec_off = Coordinates::new(0., -2. * f64::EPSILON);

        assert_ne!(origin, ra_off);
        assert_ne!(ra_off, origin);
        assert_ne!(origin, dec_off);
        assert_ne!(dec_off, origin);
        assert_ne!(Coordinates::new(5.5, -20.), Coordinates::new(5.6, -20.));
    }

    #[test]
    fn test_number_vector() {
        let mut nvp = new_number_vector(
            EQUATORIAL_EOD_COORD,
            "Eq. Coordinates",
            &[(RA, 0., 24., 0.), (DEC, -90., 90., 0.)],
        );
        Coordinates::new(12.25, 41.).write_to(&mut nvp).unwrap();
        assert_eq!(nvp.value(RA), Some(12.25));
        assert_eq!(nvp.value(DEC), Some(41.));
        assert_eq!(
            Coordinates::from_number_vector(&nvp).unwrap(),
            Coordinates::new(12.25, 41.)
        );

        let mut short =
            new_number_vector(EQUATORIAL_EOD_COORD, "Eq. Coordinates", &[(RA, 0., 24., 3.)]);
        assert!(Coordinates::from_number_vector(&short).is_err());
        assert!(Coordinates::new(1., 1.).write_to(&mut short).is_err());
        assert_eq!(short.value(RA), Some(3.));
    }
}

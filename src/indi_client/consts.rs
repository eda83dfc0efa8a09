//! Standard INDI telescope property and member names

pub const CONNECTION: &str = "CONNECTION";
pub const CONNECT: &str = "CONNECT";
pub const DISCONNECT: &str = "DISCONNECT";

pub const DRIVER_INFO: &str = "DRIVER_INFO";
pub const DRIVER_NAME: &str = "DRIVER_NAME";

pub const ON_COORD_SET: &str = "ON_COORD_SET";
pub const TRACK: &str = "TRACK";
pub const SLEW: &str = "SLEW";
pub const SYNC: &str = "SYNC";

/// Number vector holding RA (hours) then DEC (degrees)
pub const EQUATORIAL_EOD_COORD: &str = "EQUATORIAL_EOD_COORD";
pub const RA: &str = "RA";
pub const DEC: &str = "DEC";

pub const TELESCOPE_PARK: &str = "TELESCOPE_PARK";
pub const PARK: &str = "PARK";
pub const UNPARK: &str = "UNPARK";

pub const TELESCOPE_MOTION_NS: &str = "TELESCOPE_MOTION_NS";
pub const MOTION_NORTH: &str = "MOTION_NORTH";
pub const MOTION_SOUTH: &str = "MOTION_SOUTH";

pub const TELESCOPE_MOTION_WE: &str = "TELESCOPE_MOTION_WE";
pub const MOTION_WEST: &str = "MOTION_WEST";
pub const MOTION_EAST: &str = "MOTION_EAST";

pub const TELESCOPE_SLEW_RATE: &str = "TELESCOPE_SLEW_RATE";

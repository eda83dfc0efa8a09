use std::fmt::Formatter;

use crate::indi_client::consts::*;

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum MotionDirection {
    North,
    South,
    East,
    West,
}

impl MotionDirection {
    /// The motion switch vector controlling this direction's axis
    pub fn property_name(&self) -> &'static str {
        match self {
            MotionDirection::North | MotionDirection::South => TELESCOPE_MOTION_NS,
            MotionDirection::East | MotionDirection::West => TELESCOPE_MOTION_WE,
        }
    }

    pub fn member_name(&self) -> &'static str {
        match self {
            MotionDirection::North => MOTION_NORTH,
            MotionDirection::South => MOTION_SOUTH,
            MotionDirection::East => MOTION_EAST,
            MotionDirection::West => MOTION_WEST,
        }
    }

    /// Sign of the coordinate change while moving this way
    pub fn sign(&self) -> f64 {
        match self {
            MotionDirection::North | MotionDirection::East => 1.,
            MotionDirection::South | MotionDirection::West => -1.,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "n" | "north" => Some(MotionDirection::North),
            "s" | "south" => Some(MotionDirection::South),
            "e" | "east" => Some(MotionDirection::East),
            "w" | "west" => Some(MotionDirection::West),
            _ => None,
        }
    }
}

impl core::fmt::Display for MotionDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MotionDirection::North => write!(f, "North"),
            MotionDirection::South => write!(f, "South"),
            MotionDirection::East => write!(f, "East"),
            MotionDirection::West => write!(f, "West"),
        }
    }
}

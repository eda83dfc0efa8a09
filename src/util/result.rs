use std::error::Error;
use std::fmt::{Display, Formatter};
use std::{fmt, result};

pub type AdapterResult<T> = result::Result<T, AdapterError>;

/// Reasons a telescope command is skipped before anything is sent
#[derive(Debug, Clone, PartialEq)]
pub enum AdapterError {
    NoDevice,
    NotConnected(String),
    MissingProperty(&'static str),
    MissingMember {
        property: &'static str,
        member: &'static str,
    },
    MalformedProperty(&'static str),
    SpeedOutOfRange {
        speed: i32,
        count: usize,
    },
}

impl Display for AdapterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AdapterError::NoDevice => write!(f, "No telescope device available"),
            AdapterError::NotConnected(device) => write!(f, "Telescope {} not connected", device),
            AdapterError::MissingProperty(property) => {
                write!(f, "Unable to find Telescope or {} property", property)
            }
            AdapterError::MissingMember { property, member } => {
                write!(f, "Property {} has no {} member", property, member)
            }
            AdapterError::MalformedProperty(property) => {
                write!(f, "Property {} does not have the expected members", property)
            }
            AdapterError::SpeedOutOfRange { speed, count } => {
                write!(f, "Speed {} is outside the {} available slew rates", speed, count)
            }
        }
    }
}

impl Error for AdapterError {}

//! The slice of an INDI client the telescope adapter talks to, built on the
//! `indi` crate's parameter types

pub use client::*;
pub use device::*;
pub use indi::{NumberVector, PropertyState, SwitchRule, SwitchState, SwitchVector, TextVector};
pub use property::*;

mod client;
pub mod consts;
mod device;
mod property;

//! Hardware abstraction traits for the weather station
//!
//! This crate defines the traits the station logic needs from the board:
//! a calendar clock, an environmental sensor, a network link and a stream
//! transport. BSPs implement these traits; `weather-core` consumes them.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod clock;
pub mod link;
pub mod network;
pub mod sensor;

pub use clock::{CalendarTime, Clock, TimeSource};
pub use link::{Link, LinkStatus};
pub use network::{Connection, Connector, Endpoint, EndpointError, MAX_HOST_LEN};
pub use sensor::{EnvironmentSensor, RawMeasurement};

//! Weather station logic
//!
//! Samples an environmental sensor on every ten-minute boundary of the wall
//! clock and delivers each sample to a remote collector as one ASCII record,
//! confirmed by a byte-exact echo. Board support supplies the clock, sensor,
//! link and transport through the `weather-hal` traits; nothing here touches
//! hardware.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod config;
pub mod connection;
pub mod error;
pub mod indicator;
pub mod link;
pub mod record;
pub mod sampler;
pub mod schedule;
pub mod sender;
pub mod station;

#[cfg(test)]
mod mock;

pub use config::{RetryPolicy, StationConfig};
pub use connection::ConnectionManager;
pub use error::{AttemptFailure, ConnectError};
pub use link::{StartupError, EXIT_LINK_DOWN};
pub use record::{Reading, Record, Sample, Stamp};
pub use schedule::{Bucket, Scheduler};
pub use sender::{DeliveryReport, EchoSender};
pub use station::WeatherStation;

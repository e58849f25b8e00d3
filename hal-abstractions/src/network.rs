//! Stream transport to the remote collector
//!
//! Connections are plain byte streams built on the `embedded-io` traits so
//! any TCP stack (or a test double) can stand behind them.

use core::fmt;

use embedded_io::{Read, Write};
use heapless::String;

/// Longest host name or address accepted for the collector endpoint
pub const MAX_HOST_LEN: usize = 64;

/// Remote collector address, resolved once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    host: String<MAX_HOST_LEN>,
    port: u16,
}

/// Endpoint construction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EndpointError {
    /// Host does not fit in [`MAX_HOST_LEN`] bytes
    HostTooLong,
    /// Host is empty
    EmptyHost,
}

impl fmt::Display for EndpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HostTooLong => write!(f, "Host name too long"),
            Self::EmptyHost => write!(f, "Host name is empty"),
        }
    }
}

impl core::error::Error for EndpointError {}

impl Endpoint {
    pub fn new(host: &str, port: u16) -> Result<Self, EndpointError> {
        if host.is_empty() {
            return Err(EndpointError::EmptyHost);
        }
        let mut owned = String::new();
        owned
            .push_str(host)
            .map_err(|_| EndpointError::HostTooLong)?;
        Ok(Self { host: owned, port })
    }

    pub fn host(&self) -> &str {
        self.host.as_str()
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Endpoint {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}:{}", self.host.as_str(), self.port)
    }
}

/// An open, bidirectional connection to the collector
///
/// The owner must call [`Connection::close`] on every exit path; it consumes
/// the connection so a closed socket cannot be reused.
pub trait Connection: Read + Write {
    fn close(self);
}

/// Factory for connections to a fixed endpoint
///
/// Errors are classified through [`embedded_io::Error::kind`]; refused,
/// timed-out and unreachable all count as retryable.
pub trait Connector {
    type Error: embedded_io::Error;
    type Connection: Connection;

    fn connect(&mut self, endpoint: &Endpoint) -> Result<Self::Connection, Self::Error>;
}

//! Delivery error types
//!
//! Transport failures are classified by `embedded_io::ErrorKind` so every
//! stack (and every test double) reports them the same way.

use core::fmt;

use embedded_io::ErrorKind;

/// Short human-readable name for a transport error kind
pub fn describe(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::TimedOut => "timed out",
        ErrorKind::Interrupted => "interrupted",
        ErrorKind::ConnectionRefused => "connection refused",
        ErrorKind::ConnectionReset => "connection reset",
        ErrorKind::ConnectionAborted => "connection aborted",
        ErrorKind::NotConnected => "not connected",
        ErrorKind::AddrNotAvailable => "address not available",
        ErrorKind::BrokenPipe => "broken pipe",
        ErrorKind::OutOfMemory => "out of socket memory",
        _ => "transport error",
    }
}

/// Every connection attempt failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectError {
    /// Attempts made before giving up
    pub attempts: u8,
    /// Kind of the last failure
    pub kind: ErrorKind,
}

impl fmt::Display for ConnectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Connect failed after {} attempts: {}",
            self.attempts,
            describe(self.kind)
        )
    }
}

impl core::error::Error for ConnectError {}

#[cfg(feature = "defmt")]
impl defmt::Format for ConnectError {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "connect failed after {} attempts: {}",
            self.attempts,
            describe(self.kind)
        )
    }
}

/// Why one delivery attempt did not end in a matching echo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptFailure {
    /// No connection could be opened
    Connect(ConnectError),
    /// Writing the record failed; the attempt still read back a response
    Send(ErrorKind),
    /// Reading the response failed
    Receive(ErrorKind),
    /// The collector answered with different bytes (or closed early)
    Mismatch,
}

impl AttemptFailure {
    /// Transport error kind behind this failure, if it was a transport error
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Connect(e) => Some(e.kind),
            Self::Send(kind) | Self::Receive(kind) => Some(*kind),
            Self::Mismatch => None,
        }
    }
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connect(e) => write!(f, "{}", e),
            Self::Send(kind) => write!(f, "Send failed: {}", describe(*kind)),
            Self::Receive(kind) => write!(f, "Receive failed: {}", describe(*kind)),
            Self::Mismatch => write!(f, "Echo mismatch"),
        }
    }
}

impl core::error::Error for AttemptFailure {}

#[cfg(feature = "defmt")]
impl defmt::Format for AttemptFailure {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Connect(e) => defmt::write!(f, "{}", e),
            Self::Send(kind) => defmt::write!(f, "send failed: {}", describe(*kind)),
            Self::Receive(kind) => defmt::write!(f, "receive failed: {}", describe(*kind)),
            Self::Mismatch => defmt::write!(f, "echo mismatch"),
        }
    }
}

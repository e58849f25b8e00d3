//! Echo-verified sender
//!
//! Delivers one record and proves receipt by reading back the identical
//! bytes. Each attempt is a full connect / send / receive / compare / close
//! cycle; the whole cycle is retried with a fixed backoff.
//!
//! A failed send does not end the attempt early: the response is still read
//! and compared, and a matching echo still counts as delivered. The send
//! error is reported as the cause only when the attempt fails.

use embedded_hal::delay::DelayNs;
use embedded_io::{Error as _, ErrorKind, Read, Write};
use weather_hal::{Connection, Connector};

use crate::config::RetryPolicy;
use crate::connection::ConnectionManager;
use crate::error::{describe, AttemptFailure};
use crate::record::Record;

/// Largest response buffered while waiting for the echo
pub const RESPONSE_CAPACITY: usize = 1024;

/// Outcome of one [`EchoSender::deliver`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Some attempt got a byte-exact echo
    pub delivered: bool,
    /// Attempts made (0 if nothing was sent)
    pub attempts: u8,
    /// Cause of the last failed attempt; `None` once delivered
    pub last_failure: Option<AttemptFailure>,
}

impl DeliveryReport {
    fn delivered(attempts: u8) -> Self {
        Self {
            delivered: true,
            attempts,
            last_failure: None,
        }
    }

    /// Nothing was sent (the record could not be built)
    pub fn skipped() -> Self {
        Self {
            delivered: false,
            attempts: 0,
            last_failure: None,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DeliveryReport {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "delivered={} attempts={} last_failure={}",
            self.delivered,
            self.attempts,
            self.last_failure
        )
    }
}

pub struct EchoSender<C> {
    connections: ConnectionManager<C>,
    policy: RetryPolicy,
}

impl<C: Connector> EchoSender<C> {
    pub fn new(connections: ConnectionManager<C>, policy: RetryPolicy) -> Self {
        Self {
            connections,
            policy,
        }
    }

    pub fn connections(&self) -> &ConnectionManager<C> {
        &self.connections
    }

    /// Deliver `record`, retrying the full cycle until an echo matches
    ///
    /// Never fails loudly: the worst outcome is `delivered == false`.
    pub fn deliver<D: DelayNs>(&mut self, record: &Record, delay: &mut D) -> DeliveryReport {
        let attempts = self.policy.attempts();
        let mut last_failure = None;

        for attempt in 1..=attempts {
            match self.attempt(record.as_bytes(), delay) {
                Ok(()) => {
                    info!("Record echoed by collector (attempt {}/{})", attempt, attempts);
                    return DeliveryReport::delivered(attempt);
                }
                Err(failure) => {
                    log_failure(&failure, attempt, attempts);
                    last_failure = Some(failure);
                }
            }
            if attempt < attempts {
                delay.delay_ms(self.policy.backoff_ms);
            }
        }

        error!("Record not delivered after {} attempts", attempts);
        DeliveryReport {
            delivered: false,
            attempts,
            last_failure,
        }
    }

    fn attempt<D: DelayNs>(&mut self, record: &[u8], delay: &mut D) -> Result<(), AttemptFailure> {
        let mut connection = self
            .connections
            .open(delay)
            .map_err(AttemptFailure::Connect)?;

        let sent = send(&mut connection, record);
        if let Err(kind) = sent {
            warn!("Send failed ({}), still reading the response", describe(kind));
        }
        let echoed = receive_echo(&mut connection, record);
        connection.close();

        match (echoed, sent) {
            (Ok(true), _) => Ok(()),
            (_, Err(kind)) => Err(AttemptFailure::Send(kind)),
            (Err(kind), Ok(())) => Err(AttemptFailure::Receive(kind)),
            (Ok(false), Ok(())) => Err(AttemptFailure::Mismatch),
        }
    }
}

fn log_failure(failure: &AttemptFailure, attempt: u8, attempts: u8) {
    match failure.kind() {
        Some(ErrorKind::Interrupted) => {
            warn!("Socket operation interrupted (attempt {}/{})", attempt, attempts)
        }
        Some(ErrorKind::TimedOut) => {
            warn!("Timeout on socket operation (attempt {}/{})", attempt, attempts)
        }
        _ => warn!(
            "Delivery attempt {}/{} failed: {}",
            attempt,
            attempts,
            failure
        ),
    }
}

/// Write the whole record and flush it
fn send<T: Write>(connection: &mut T, mut buf: &[u8]) -> Result<(), ErrorKind> {
    while !buf.is_empty() {
        match connection.write(buf) {
            // The stack accepted nothing; treat it like a closed pipe
            Ok(0) => return Err(ErrorKind::BrokenPipe),
            Ok(n) => buf = &buf[n..],
            Err(e) => return Err(e.kind()),
        }
    }
    connection.flush().map_err(|e| e.kind())
}

/// Read until the response is as long as `expected`, diverges from it, or the
/// peer closes; then compare byte for byte
fn receive_echo<T: Read>(connection: &mut T, expected: &[u8]) -> Result<bool, ErrorKind> {
    let mut buf = [0u8; RESPONSE_CAPACITY];
    let mut filled = 0;

    while filled < expected.len() && filled < buf.len() {
        let n = connection.read(&mut buf[filled..]).map_err(|e| e.kind())?;
        if n == 0 {
            break;
        }
        filled += n;
        if !expected.starts_with(&buf[..filled]) {
            return Ok(false);
        }
    }

    Ok(&buf[..filled] == expected)
}

//! Connection Manager
//!
//! Opens a connection to the fixed collector endpoint with bounded,
//! fixed-delay retry. Exhaustion is reported to the caller, never raised.

use embedded_hal::delay::DelayNs;
use embedded_io::{Error as _, ErrorKind};
use weather_hal::{Connector, Endpoint};

use crate::config::RetryPolicy;
use crate::error::{describe, ConnectError};

pub struct ConnectionManager<C> {
    connector: C,
    endpoint: Endpoint,
    policy: RetryPolicy,
}

impl<C: Connector> ConnectionManager<C> {
    pub fn new(connector: C, endpoint: Endpoint, policy: RetryPolicy) -> Self {
        Self {
            connector,
            endpoint,
            policy,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Open a connection, retrying up to the policy's attempt budget
    ///
    /// Every transport error (refused, timed out, unreachable) is treated as
    /// retryable. On success the caller owns the connection and must close it.
    pub fn open<D: DelayNs>(&mut self, delay: &mut D) -> Result<C::Connection, ConnectError> {
        let attempts = self.policy.attempts();
        let mut last = ErrorKind::Other;

        for attempt in 1..=attempts {
            match self.connector.connect(&self.endpoint) {
                Ok(connection) => {
                    trace!("Connected to {} (attempt {})", self.endpoint, attempt);
                    return Ok(connection);
                }
                Err(e) => {
                    last = e.kind();
                    warn!(
                        "Connect to {} failed (attempt {}/{}): {}",
                        self.endpoint,
                        attempt,
                        attempts,
                        describe(last)
                    );
                }
            }
            if attempt < attempts {
                delay.delay_ms(self.policy.backoff_ms);
            }
        }

        Err(ConnectError {
            attempts,
            kind: last,
        })
    }
}

//! Station configuration structures

use weather_hal::{Endpoint, EndpointError};

/// Fixed-delay retry policy (no growth, no jitter)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RetryPolicy {
    /// Total attempts including the first (at least 1 is always made)
    pub max_attempts: u8,
    /// Delay between two consecutive attempts in milliseconds
    pub backoff_ms: u32,
}

impl RetryPolicy {
    pub const fn new(max_attempts: u8, backoff_ms: u32) -> Self {
        Self {
            max_attempts,
            backoff_ms,
        }
    }

    /// Attempts actually made; a zero budget still gets one try
    pub(crate) fn attempts(&self) -> u8 {
        self.max_attempts.max(1)
    }
}

/// Connection Manager policy: 5 attempts, 1 s apart
pub const CONNECT_POLICY: RetryPolicy = RetryPolicy::new(5, 1_000);

/// Echo-verified sender policy: 5 attempts, 5 s apart
pub const DELIVERY_POLICY: RetryPolicy = RetryPolicy::new(5, 5_000);

/// Default collector address
pub const DEFAULT_COLLECTOR_HOST: &str = "192.168.1.1";
pub const DEFAULT_COLLECTOR_PORT: u16 = 65432;

/// Status LED timing and counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndicatorConfig {
    /// Flashes emitted once at power-up
    pub startup_flashes: u8,
    /// Flashes emitted on every firing
    pub firing_flashes: u8,
    /// On time and off time of one flash, in milliseconds
    pub half_period_ms: u32,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            startup_flashes: 10,
            firing_flashes: 2,
            half_period_ms: 200,
        }
    }
}

/// Link bring-up timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkConfig {
    /// Pause before asking the interface to associate
    pub settle_ms: u32,
    /// Status polls while the link is still connecting
    pub max_polls: u8,
    /// Delay between status polls
    pub poll_interval_ms: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            settle_ms: 2_000,
            max_polls: 10,
            poll_interval_ms: 1_000,
        }
    }
}

/// Everything the station needs to run
#[derive(Debug, Clone, PartialEq)]
pub struct StationConfig {
    /// Collector address
    pub endpoint: Endpoint,
    /// Retry policy for opening one connection
    pub connect: RetryPolicy,
    /// Retry policy for one echo-verified delivery
    pub delivery: RetryPolicy,
    /// Idle sleep between clock polls
    ///
    /// Must stay under a minute so every minute-of-hour is observed at
    /// least once.
    pub poll_interval_ms: u32,
    /// Pause after a firing's delivery, before the idle sleep
    pub post_delivery_pause_ms: u32,
    /// Sensor warm-up after link bring-up
    pub sensor_warmup_ms: u32,
    pub indicator: IndicatorConfig,
    pub link: LinkConfig,
}

impl StationConfig {
    /// Default timings with a custom collector address
    pub fn new(host: &str, port: u16) -> Result<Self, EndpointError> {
        Ok(Self::with_endpoint(Endpoint::new(host, port)?))
    }

    pub fn with_endpoint(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            connect: CONNECT_POLICY,
            delivery: DELIVERY_POLICY,
            poll_interval_ms: 25_000,
            post_delivery_pause_ms: 2_000,
            sensor_warmup_ms: 1_000,
            indicator: IndicatorConfig::default(),
            link: LinkConfig::default(),
        }
    }
}

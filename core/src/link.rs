//! Link bring-up and fatal startup errors

use core::fmt;

use embedded_hal::delay::DelayNs;
use weather_hal::{Link, LinkStatus};

use crate::config::LinkConfig;

/// Process exit status when the link never came up
pub const EXIT_LINK_DOWN: i32 = 2;

/// Failures that keep the station from entering its main loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartupError {
    /// The link was not up after the bring-up wait; carries the last status
    LinkDown(LinkStatus),
}

impl StartupError {
    /// Distinct non-zero exit status for the board's bootstrap
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::LinkDown(_) => EXIT_LINK_DOWN,
        }
    }
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LinkDown(status) => write!(f, "Link did not come up (status {:?})", status),
        }
    }
}

impl core::error::Error for StartupError {}

/// Wait for the link to come up
///
/// Waits `settle_ms`, requests association, then polls the status while it
/// is still connecting. An association error is only logged: the interface
/// may still come up, and the status poll decides.
pub fn bring_up<L: Link, D: DelayNs>(
    link: &mut L,
    delay: &mut D,
    config: &LinkConfig,
) -> Result<(), StartupError> {
    delay.delay_ms(config.settle_ms);

    info!("Associating network link...");
    if link.associate().is_err() {
        warn!("Link association request failed, waiting for status anyway");
    }

    let mut status = link.status();
    let mut polls = 0;
    while status == LinkStatus::Connecting && polls < config.max_polls {
        delay.delay_ms(config.poll_interval_ms);
        polls += 1;
        status = link.status();
    }

    match status {
        LinkStatus::Up => {
            info!("Link is UP after {} polls", polls);
            Ok(())
        }
        other => {
            error!("Link bring-up failed: {}", other);
            Err(StartupError::LinkDown(other))
        }
    }
}

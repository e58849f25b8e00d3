//! Network link bring-up (radio association, address assignment)

/// Coarse link state as reported by the board's network interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkStatus {
    /// Association or address assignment still in progress
    Connecting,
    /// Associated and addressed; sockets may be opened
    Up,
    /// The interface gave up (bad credentials, no access point, ...)
    Failed,
}

/// A network link that must be up before any transport connection is made
pub trait Link {
    type Error: core::fmt::Debug;

    /// Reset the interface and start joining the configured network
    ///
    /// Returns as soon as the join has been requested; completion is observed
    /// through [`Link::status`].
    fn associate(&mut self) -> Result<(), Self::Error>;

    /// Current link state
    fn status(&mut self) -> LinkStatus;
}

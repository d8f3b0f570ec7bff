//! Unified error types for media-remote.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` (behind the `defmt` feature) for efficient
//! on-target logging.
//!
//! "No link" is deliberately not in here: the dispatcher reports it as
//! [`Delivery::NotConnected`], an expected outcome the UI handles by
//! dimming its controls.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Link
    /// A report was handed to the link but could not be sent.
    Transport(TransportError),

    // BLE bring-up
    /// The SoftDevice returned a BLE-level error.
    Ble(BleError),

    // UI / Display
    /// I²C transaction to the display failed.
    Display,
}

/// Why a transmission attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Raw error code from the BLE stack.
    Raw(u32),
    /// The host has not enabled notifications on the input report.
    Notify,
}

/// Subset of BLE bring-up errors we propagate (keeps the enum `Copy`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BleError {
    /// Advertising could not be started.
    AdvertiseFailed,
    /// GATT server registration failed.
    ServerFailed,
}

/// Result of `HidLink::transmit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// No peer is connected; nothing to deliver to.
    NotConnected,
    /// A peer is connected but the send failed.
    Transport(TransportError),
}

/// Successful outcome of a dispatched command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Delivery {
    /// The press report reached the link.
    Sent,
    /// No link was up, so nothing was transmitted. Not a failure.
    NotConnected,
}

// Convenience conversions

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Error::Transport(e)
    }
}

impl From<BleError> for Error {
    fn from(e: BleError) -> Self {
        Error::Ble(e)
    }
}

impl From<TransportError> for LinkError {
    fn from(e: TransportError) -> Self {
        LinkError::Transport(e)
    }
}

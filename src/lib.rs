//! media-remote - BLE media remote panel for nRF52840.
//!
//! The interaction core (gestures, crossfade sequencing, volume hold,
//! HID command dispatch, playback clock) is plain `no_std` logic and runs
//! on the host with `cargo test`. The `embedded` feature adds the SoftDevice
//! HID-over-GATT peripheral, the SSD1306 renderer, the buttons, and the
//! tasks wired together by `main.rs`.
//!
//! ```text
//!   buttons / touch ──▶ PanelEvent ──▶ MusicPanel ──▶ HidLink ──▶ BLE host
//!                                         │   ▲
//!                              start_fade │   │ frames, completions, ticks
//!                                         ▼   │
//!                                       EventPump ──▶ PanelView (OLED)
//! ```

#![cfg_attr(not(test), no_std)]

// Must come first so every module sees the logging macros.
#[macro_use]
mod fmt;

pub mod config;
pub mod control;
pub mod error;
pub mod hid;
pub mod panel;
pub mod runtime;
pub mod ui;

#[cfg(feature = "embedded")]
pub mod ble;

pub use error::{Delivery, Error, LinkError, TransportError};
pub use panel::{MusicPanel, PanelEvent, PanelView, Toolkit};

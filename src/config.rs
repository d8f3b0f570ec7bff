//! Application-wide constants and compile-time configuration.
//!
//! All timing parameters, layout thresholds, and protocol constants
//! live here so they can be tuned in one place. `control::PanelConfig`
//! picks up its defaults from these values.

// Music panel timing

/// Duration of each half (fade-out / fade-in) of a track crossfade (ms).
pub const SONG_FADE_MS: u32 = 160;

/// Period of the playback progress tick (ms).
pub const PROGRESS_TICK_MS: u32 = 1000;

/// Upper bound of the progress arc.
pub const PROGRESS_MAX: u8 = 100;

/// Delay after screen entry before a long press may arm the volume hold (ms).
/// Keeps the touch that opened the screen from being read as a hold.
pub const VOLUME_HOLD_ARM_DELAY_MS: u64 = 1200;

/// Minimum spacing between two volume commands (ms).
pub const VOLUME_CMD_INTERVAL_MS: u64 = 140;

/// Vertical drag per volume step at the base layout size (px).
pub const VOLUME_STEP_BASE_PX: i32 = 8;

/// Minimum spacing between two accepted skip swipes (ms).
pub const GESTURE_RATE_LIMIT_MS: u64 = 350;

// Layout

/// Edge length of the reference layout; everything scales from this (px).
pub const UI_BASE_SIZE_PX: u32 = 240;

/// Opacity values driven by the crossfade.
pub const OPA_COVER: u8 = 255;
pub const OPA_TRANSP: u8 = 0;

// BLE

/// Advertised GAP device name.
pub const BLE_DEVICE_NAME: &str = "Media Remote";

/// GAP appearance: generic HID (0x03C0).
pub const BLE_APPEARANCE: u16 = 0x03C0;

/// Fast advertising interval (in 0.625 ms units). 48 = 30 ms.
pub const BLE_ADV_INTERVAL: u32 = 48;

/// Bonded hosts remembered in RAM; the oldest is forgotten first.
pub const MAX_BONDS: usize = 4;

/// Report ID of the consumer-control input report in the report map.
pub const HID_INPUT_REPORT_ID: u8 = 1;

/// Length of the consumer-control input report (one 16-bit usage).
pub const HID_INPUT_REPORT_LEN: usize = 2;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Button PREV    → P0.11
//   Button PLAY    → P0.12
//   Button NEXT    → P0.24
//   I²C SDA        → P0.26
//   I²C SCL        → P0.27

/// Button debounce time (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 50;

/// Animation frame period used by the target event pump (ms).
pub const ANIMATION_FRAME_MS: u64 = 16;

/// Display resolution of the SSD1306 panel (px).
pub const DISPLAY_WIDTH_PX: u32 = 128;
pub const DISPLAY_HEIGHT_PX: u32 = 64;

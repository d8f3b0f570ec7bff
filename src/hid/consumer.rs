//! Consumer Control HID support - media keys and volume.
//!
//! Consumer Control is HID usage page 0x0C. The remote exposes a single
//! input report carrying one 16-bit usage, little-endian. Every command
//! goes out as the usage followed by [`ConsumerUsage::Release`] so the
//! host sees a momentary button press.

use crate::config::{HID_INPUT_REPORT_ID, HID_INPUT_REPORT_LEN};

/// Consumer control report size (2 bytes for usage ID).
pub const CONSUMER_REPORT_SIZE: usize = HID_INPUT_REPORT_LEN;

/// Consumer control usage codes (Usage Page 0x0C) the remote sends or
/// recognises.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum ConsumerUsage {
    /// Neutral report - all controls released.
    Release = 0x0000,
    /// Play.
    Play = 0x00B0,
    /// Pause.
    Pause = 0x00B1,
    /// Scan next track.
    ScanNext = 0x00B5,
    /// Scan previous track.
    ScanPrevious = 0x00B6,
    /// Stop.
    Stop = 0x00B7,
    /// Play/Pause toggle.
    PlayPause = 0x00CD,
    /// Mute toggle.
    Mute = 0x00E2,
    /// Volume increment.
    VolumeUp = 0x00E9,
    /// Volume decrement.
    VolumeDown = 0x00EA,
}

impl ConsumerUsage {
    /// Raw 16-bit usage code.
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Play or Pause depending on the state being requested.
    pub const fn play_pause(play: bool) -> Self {
        if play {
            ConsumerUsage::Play
        } else {
            ConsumerUsage::Pause
        }
    }

    /// Short name for log lines.
    pub const fn name(self) -> &'static str {
        match self {
            ConsumerUsage::Release => "release",
            ConsumerUsage::Play => "play",
            ConsumerUsage::Pause => "pause",
            ConsumerUsage::ScanNext => "next",
            ConsumerUsage::ScanPrevious => "previous",
            ConsumerUsage::Stop => "stop",
            ConsumerUsage::PlayPause => "play_pause",
            ConsumerUsage::Mute => "mute",
            ConsumerUsage::VolumeUp => "vol_up",
            ConsumerUsage::VolumeDown => "vol_down",
        }
    }
}

impl TryFrom<u16> for ConsumerUsage {
    type Error = u16;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            0x0000 => Ok(ConsumerUsage::Release),
            0x00B0 => Ok(ConsumerUsage::Play),
            0x00B1 => Ok(ConsumerUsage::Pause),
            0x00B5 => Ok(ConsumerUsage::ScanNext),
            0x00B6 => Ok(ConsumerUsage::ScanPrevious),
            0x00B7 => Ok(ConsumerUsage::Stop),
            0x00CD => Ok(ConsumerUsage::PlayPause),
            0x00E2 => Ok(ConsumerUsage::Mute),
            0x00E9 => Ok(ConsumerUsage::VolumeUp),
            0x00EA => Ok(ConsumerUsage::VolumeDown),
            other => Err(other),
        }
    }
}

/// Consumer Control HID report.
///
/// Simple 2-byte report containing a single usage code.
/// Multiple simultaneous keys are not supported in this implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConsumerReport {
    /// Active consumer control usage (little-endian u16 on the wire).
    pub usage: u16,
}

impl ConsumerReport {
    /// The release (no keys pressed) report.
    pub const fn release() -> Self {
        Self { usage: 0 }
    }

    /// Create a report with a single usage.
    pub const fn new(usage: ConsumerUsage) -> Self {
        Self {
            usage: usage as u16,
        }
    }

    /// Create a report from a raw usage code.
    pub const fn from_code(usage: u16) -> Self {
        Self { usage }
    }

    /// Parse from raw report bytes.
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < CONSUMER_REPORT_SIZE {
            return None;
        }
        let usage = u16::from_le_bytes([data[0], data[1]]);
        Some(Self { usage })
    }

    /// Wire form: byte0 = low byte, byte1 = high byte.
    pub const fn to_bytes(&self) -> [u8; CONSUMER_REPORT_SIZE] {
        self.usage.to_le_bytes()
    }

    /// Serialize into a caller buffer, returning the number of bytes written.
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < CONSUMER_REPORT_SIZE {
            return 0;
        }
        buf[..CONSUMER_REPORT_SIZE].copy_from_slice(&self.to_bytes());
        CONSUMER_REPORT_SIZE
    }

    /// True for the all-keys-up report.
    pub fn is_release(&self) -> bool {
        self.usage == 0
    }

    /// Get the usage as an enum, if it is one we know.
    pub fn get_usage(&self) -> Option<ConsumerUsage> {
        ConsumerUsage::try_from(self.usage).ok()
    }
}

/// HID Report Map for the consumer-control input report.
///
/// One 16-bit array usage (0..=1023) under report ID
/// [`HID_INPUT_REPORT_ID`].
pub const CONSUMER_REPORT_MAP: &[u8] = &[
    0x05, 0x0C, // Usage Page (Consumer)
    0x09, 0x01, // Usage (Consumer Control)
    0xA1, 0x01, // Collection (Application)
    0x85, HID_INPUT_REPORT_ID, //   Report ID
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x03, //   Logical Maximum (1023)
    0x19, 0x00, //   Usage Minimum (0)
    0x2A, 0xFF, 0x03, //   Usage Maximum (1023)
    0x75, 0x10, //   Report Size (16)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x00, //   Input (Data, Array, Absolute)
    0xC0, // End Collection
];

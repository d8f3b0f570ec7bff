//! HID report types served over the BLE HID-over-GATT service.

pub mod consumer;

pub use consumer::{ConsumerReport, ConsumerUsage, CONSUMER_REPORT_MAP, CONSUMER_REPORT_SIZE};

/// HID Information characteristic value.
///
/// bcdHID 1.01, country code 0, flags RemoteWake | NormallyConnectable.
pub const HID_INFORMATION: [u8; 4] = [0x01, 0x01, 0x00, 0x03];

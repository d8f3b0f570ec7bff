//! BLE GATT HID server - the consumer-control side of HID-over-GATT.
//!
//! Registers the HID Service (UUID 0x1812) with:
//! 1. HID Information (0x2A4A) - bcdHID, country code, flags.
//! 2. Report Map (0x2A4B) - the consumer-control report descriptor.
//! 3. HID Control Point (0x2A4C) - host suspend / exit suspend.
//! 4. Report (0x2A4D) - the input report, notified per command, with its
//!    Report Reference descriptor (report id, input).
//!
//! All attributes require an encrypted link, so hosts pair before the
//! report map is readable.

use embassy_time::{Duration, Timer};
use nrf_softdevice::ble::advertisement_builder::{
    AdvertisementDataType, Flag, LegacyAdvertisementBuilder, LegacyAdvertisementPayload,
    ServiceList, ServiceUuid16,
};
use nrf_softdevice::ble::gatt_server::builder::ServiceBuilder;
use nrf_softdevice::ble::gatt_server::characteristic::{Attribute, Metadata, Properties};
use nrf_softdevice::ble::gatt_server::{self, CharacteristicHandles, RegisterError, WriteOp};
use nrf_softdevice::ble::{peripheral, Connection, SecurityMode, Uuid};
use nrf_softdevice::Softdevice;

use super::security;
use crate::config::{BLE_ADV_INTERVAL, BLE_APPEARANCE, BLE_DEVICE_NAME, HID_INPUT_REPORT_ID};
use crate::error::{BleError, Error};
use crate::hid::{CONSUMER_REPORT_MAP, CONSUMER_REPORT_SIZE, HID_INFORMATION};

const HID_SERVICE: Uuid = Uuid::new_16(0x1812);
const HID_INFO: Uuid = Uuid::new_16(0x2a4a);
const REPORT_MAP: Uuid = Uuid::new_16(0x2a4b);
const HID_CONTROL_POINT: Uuid = Uuid::new_16(0x2a4c);
const HID_REPORT: Uuid = Uuid::new_16(0x2a4d);
const REPORT_REFERENCE: Uuid = Uuid::new_16(0x2908);

/// Report Reference value: report id, report type (1 = input).
const INPUT_REPORT_REFERENCE: [u8; 2] = [HID_INPUT_REPORT_ID, 0x01];

const APPEARANCE: [u8; 2] = BLE_APPEARANCE.to_le_bytes();

static ADV_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .flags(&[Flag::GeneralDiscovery, Flag::LE_Only])
    .services_16(ServiceList::Incomplete, &[ServiceUuid16::HUMAN_INTERFACE_DEVICE])
    .raw(AdvertisementDataType::APPEARANCE, &APPEARANCE)
    .full_name(BLE_DEVICE_NAME)
    .build();

static SCAN_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .services_16(ServiceList::Complete, &[ServiceUuid16::HUMAN_INTERFACE_DEVICE])
    .build();

/// Attribute handles of the registered HID service.
pub struct Server {
    input_report: CharacteristicHandles,
    control_point: u16,
}

impl Server {
    /// Register the HID service. Must run before the SoftDevice task starts.
    pub fn new(sd: &mut Softdevice) -> Result<Self, Error> {
        Self::register(sd).map_err(|_| Error::from(BleError::ServerFailed))
    }

    fn register(sd: &mut Softdevice) -> Result<Self, RegisterError> {
        let mut service = ServiceBuilder::new(sd, HID_SERVICE)?;

        service
            .add_characteristic(
                HID_INFO,
                Attribute::new(HID_INFORMATION).security(SecurityMode::JustWorks),
                Metadata::new(Properties::new().read()),
            )?
            .build();

        service
            .add_characteristic(
                REPORT_MAP,
                Attribute::new(CONSUMER_REPORT_MAP).security(SecurityMode::JustWorks),
                Metadata::new(Properties::new().read()),
            )?
            .build();

        let control_point = service
            .add_characteristic(
                HID_CONTROL_POINT,
                Attribute::new([0u8]).security(SecurityMode::JustWorks),
                Metadata::new(Properties::new().write_without_response()),
            )?
            .build();

        let mut input = service.add_characteristic(
            HID_REPORT,
            Attribute::new([0u8; CONSUMER_REPORT_SIZE]).security(SecurityMode::JustWorks),
            Metadata::new(Properties::new().read().notify()),
        )?;
        input.add_descriptor(
            REPORT_REFERENCE,
            Attribute::new(INPUT_REPORT_REFERENCE).security(SecurityMode::JustWorks),
        )?;
        let input_report = input.build();

        let _service = service.build();

        Ok(Self {
            input_report,
            control_point: control_point.value_handle,
        })
    }

    pub fn input_report_handle(&self) -> u16 {
        self.input_report.value_handle
    }
}

impl gatt_server::Server for Server {
    type Event = ();

    fn on_write(
        &self,
        _conn: &Connection,
        handle: u16,
        _op: WriteOp,
        _offset: usize,
        data: &[u8],
    ) -> Option<Self::Event> {
        if handle == self.input_report.cccd_handle {
            let enabled = data.first().is_some_and(|b| b & 0x01 != 0);
            info!("ble: input report notifications {}", if enabled { "on" } else { "off" });
            super::set_notifications(enabled);
        } else if handle == self.control_point {
            // 0 = suspend, 1 = exit suspend.
            let suspended = data.first() == Some(&0);
            debug!("ble: host {}", if suspended { "suspended" } else { "resumed" });
        }
        None
    }
}

/// Advertise, serve one host until it disconnects, repeat.
///
/// Must be spawned as a dedicated Embassy task.
pub async fn ble_task(sd: &'static Softdevice, server: &'static Server) -> ! {
    let bonder = security::bonder();
    let config = peripheral::Config {
        interval: BLE_ADV_INTERVAL,
        ..Default::default()
    };

    loop {
        let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
            adv_data: &ADV_DATA,
            scan_data: &SCAN_DATA,
        };

        info!("ble: advertising as {}", BLE_DEVICE_NAME);
        let conn = match peripheral::advertise_pairable(sd, adv, &config, bonder).await {
            Ok(conn) => conn,
            Err(_) => {
                warn!("ble: {}", Error::from(BleError::AdvertiseFailed));
                Timer::after(Duration::from_secs(1)).await;
                continue;
            }
        };

        info!("ble: host connected");
        super::set_connection(Some(conn.clone()));

        let _ = gatt_server::run(&conn, server, |_| {}).await;

        super::set_connection(None);
        info!("ble: host disconnected");
    }
}

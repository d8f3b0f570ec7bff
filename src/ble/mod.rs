//! Bluetooth Low Energy subsystem.
//!
//! This module drives the Nordic SoftDevice S140 in **Peripheral** role:
//!
//! 1. **HID server** - registers the HID-over-GATT service (report map,
//!    HID information, input report, control point) and advertises as a
//!    connectable HID device, re-advertising after every disconnect.
//! 2. **Security** - Just Works pairing with in-RAM bonds.
//! 3. **Link** - [`BleHidLink`], the panel's view of the connection: "is a
//!    host listening" and "send this input report".
//!
//! The advertising task and the panel task share the current connection
//! through a critical-section mutex; notifications are synchronous, so the
//! panel never awaits the radio.

pub mod hid_server;
pub mod security;

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use nrf_softdevice::ble::gatt_server::{self, NotifyValueError};
use nrf_softdevice::ble::Connection;

use crate::control::HidLink;
use crate::error::{LinkError, TransportError};
use crate::hid::CONSUMER_REPORT_SIZE;
use hid_server::Server;

struct LinkState {
    conn: Option<Connection>,
    /// Host enabled notifications on the input report.
    notifications: bool,
}

static LINK: Mutex<CriticalSectionRawMutex, RefCell<LinkState>> =
    Mutex::new(RefCell::new(LinkState {
        conn: None,
        notifications: false,
    }));

pub(crate) fn set_connection(conn: Option<Connection>) {
    LINK.lock(|state| {
        let mut state = state.borrow_mut();
        state.conn = conn;
        state.notifications = false;
    });
}

pub(crate) fn set_notifications(enabled: bool) {
    LINK.lock(|state| state.borrow_mut().notifications = enabled);
}

/// [`HidLink`] over the input report characteristic.
pub struct BleHidLink {
    server: &'static Server,
}

impl BleHidLink {
    pub const fn new(server: &'static Server) -> Self {
        Self { server }
    }
}

impl HidLink for BleHidLink {
    fn is_connected(&self) -> bool {
        LINK.lock(|state| {
            let state = state.borrow();
            state.conn.is_some() && state.notifications
        })
    }

    fn transmit(&mut self, report: [u8; CONSUMER_REPORT_SIZE]) -> Result<(), LinkError> {
        let (conn, notifications) = LINK.lock(|state| {
            let state = state.borrow();
            (state.conn.clone(), state.notifications)
        });
        let conn = conn.ok_or(LinkError::NotConnected)?;
        if !notifications {
            return Err(TransportError::Notify.into());
        }

        gatt_server::notify_value(&conn, self.server.input_report_handle(), &report).map_err(
            |e| match e {
                NotifyValueError::Disconnected => LinkError::NotConnected,
                NotifyValueError::Raw(code) => TransportError::Raw(code as u32).into(),
            },
        )
    }
}

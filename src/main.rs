//! media-remote firmware entry point (nRF52840 + SoftDevice S140).
//!
//! Task layout:
//!
//! ```text
//!   softdevice_task ── SoftDevice event loop
//!   ble_task ───────── advertise / serve one HID host at a time
//!   button_task ×3 ─── PREV / PLAY / NEXT ──▶ PANEL_EVENTS
//!   panel_task ─────── MusicPanel + EventPump + OLED
//! ```

#![no_std]
#![no_main]

use core::mem;

use defmt::{info, unwrap};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_nrf::gpio::{AnyPin, Pin};
use embassy_nrf::interrupt::{self, InterruptExt, Priority};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use nrf_softdevice::{raw, Softdevice};
use panic_probe as _;
use static_cell::StaticCell;

use media_remote::ble::hid_server::{self, Server};
use media_remote::ble::BleHidLink;
use media_remote::config;
use media_remote::control::{PanelConfig, DEMO_CATALOG};
use media_remote::panel::MusicPanel;
use media_remote::runtime::task::{self, PANEL_EVENTS};
use media_remote::ui::display::OledView;
use media_remote::ui::scale::UiScale;
use media_remote::ui::{buttons, ButtonEvent};

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

type I2cBus = Twim<'static, peripherals::TWISPI0>;

static SERVER: StaticCell<Server> = StaticCell::new();

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

#[embassy_executor::task]
async fn ble_task(sd: &'static Softdevice, server: &'static Server) -> ! {
    hid_server::ble_task(sd, server).await
}

#[embassy_executor::task(pool_size = 3)]
async fn button_task(pin: AnyPin, button: ButtonEvent) -> ! {
    buttons::button_task(pin, button, &PANEL_EVENTS.sender()).await
}

#[embassy_executor::task]
async fn panel_task(panel: MusicPanel<BleHidLink>, view: OledView<I2cBus>) -> ! {
    task::panel_task(panel, view, PANEL_EVENTS.receiver()).await
}

fn softdevice_config() -> nrf_softdevice::Config {
    nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 128 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: raw::BLE_GATTS_ATTR_TAB_SIZE_DEFAULT,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
            central_role_count: 0,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: config::BLE_DEVICE_NAME.as_ptr() as *const u8 as _,
            current_len: config::BLE_DEVICE_NAME.len() as u16,
            max_len: config::BLE_DEVICE_NAME.len() as u16,
            write_perm: unsafe { mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("media-remote starting");

    // The SoftDevice owns interrupt priorities 0, 1 and 4.
    let mut nrf_config = embassy_nrf::config::Config::default();
    nrf_config.gpiote_interrupt_priority = Priority::P2;
    nrf_config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(nrf_config);
    interrupt::SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0.set_priority(Priority::P3);

    // BLE
    let sd = Softdevice::enable(&softdevice_config());
    let server: &'static Server = SERVER.init(unwrap!(Server::new(sd)));
    unwrap!(spawner.spawn(softdevice_task(sd)));
    unwrap!(spawner.spawn(ble_task(sd, server)));

    // Display
    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let view = unwrap!(OledView::new(i2c));

    // Buttons
    unwrap!(spawner.spawn(button_task(p.P0_11.degrade(), ButtonEvent::Prev)));
    unwrap!(spawner.spawn(button_task(p.P0_12.degrade(), ButtonEvent::PlayPause)));
    unwrap!(spawner.spawn(button_task(p.P0_24.degrade(), ButtonEvent::Next)));

    // Panel
    let scale = UiScale::from_resolution(config::DISPLAY_WIDTH_PX, config::DISPLAY_HEIGHT_PX);
    let panel = MusicPanel::new(
        &DEMO_CATALOG,
        PanelConfig::for_scale(scale),
        BleHidLink::new(server),
    );
    unwrap!(spawner.spawn(panel_task(panel, view)));

    info!("media-remote running");
}

//! GPIO button input with async debouncing.
//!
//! Three physical buttons (active-low with internal pull-up):
//!   - PREV - skip to the previous track
//!   - PLAY - toggle play / pause
//!   - NEXT - skip to the next track
//!
//! Each button is handled by an async task that waits for a GPIO edge,
//! debounces it, and queues the matching tap for the panel task.

use crate::config::BUTTON_DEBOUNCE_MS;
use crate::panel::PanelEvent;
use crate::runtime::task::PANEL_EVENT_QUEUE;
use crate::ui::ButtonEvent;
use embassy_nrf::gpio::{AnyPin, Input, Pull};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use embassy_time::{Duration, Timer};

/// Run a single button polling loop.
///
/// Waits for the pin to go low (pressed), debounces, sends the event,
/// then waits for release before repeating.
pub async fn button_task(
    pin: AnyPin,
    button: ButtonEvent,
    tx: &Sender<'static, CriticalSectionRawMutex, PanelEvent, PANEL_EVENT_QUEUE>,
) -> ! {
    let mut btn = Input::new(pin, Pull::Up);

    loop {
        // Wait for falling edge (button press, active-low).
        btn.wait_for_falling_edge().await;

        // Debounce: wait and re-check.
        Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;

        if btn.is_low() {
            info!("button: {}", button);
            // A full queue drops the press instead of stalling the button.
            if tx.try_send(button.into()).is_err() {
                warn!("button: input queue full, {} dropped", button);
            }

            // Wait for release to avoid repeat triggers.
            btn.wait_for_rising_edge().await;
            Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
        }
    }
}

//! Firmware side of the event pump: one task owns the panel and the
//! display and serializes input, animation frames, and ticks.

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver};
use embassy_time::{Instant, Timer};

use super::EventPump;
use crate::control::HidLink;
use crate::panel::{MusicPanel, PanelEvent};
use crate::ui::display::OledView;

/// Depth of the input queue feeding the panel task.
pub const PANEL_EVENT_QUEUE: usize = 8;

/// Input events for the panel (buttons today).
pub static PANEL_EVENTS: Channel<CriticalSectionRawMutex, PanelEvent, PANEL_EVENT_QUEUE> =
    Channel::new();

fn now_ms() -> u64 {
    Instant::now().as_millis()
}

/// Run the panel forever - must be spawned as a dedicated Embassy task.
///
/// Sleeps until the next input event or the pump's next deadline, whichever
/// comes first, and redraws after every round.
pub async fn panel_task<I2C, L>(
    mut panel: MusicPanel<L>,
    view: OledView<I2C>,
    rx: Receiver<'static, CriticalSectionRawMutex, PanelEvent, PANEL_EVENT_QUEUE>,
) -> !
where
    I2C: embedded_hal::i2c::I2c,
    L: HidLink,
{
    let mut pump = EventPump::new(view, now_ms());
    pump.show(&mut panel, now_ms());

    loop {
        if let Err(e) = pump.view_mut().render() {
            warn!("ui: render failed: {}", e);
        }

        let deadline = pump
            .next_deadline_ms()
            .map(Instant::from_millis)
            .unwrap_or(Instant::MAX);

        match select(rx.receive(), Timer::at(deadline)).await {
            Either::First(event) => {
                debug!("ui: event {}", event);
                pump.dispatch(&mut panel, event, now_ms());
            }
            Either::Second(()) => {}
        }

        pump.advance(&mut panel, now_ms());
    }
}

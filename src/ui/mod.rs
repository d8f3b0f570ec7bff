//! User interface - layout scale, labels, input mapping, OLED and buttons.
//!
//! ## Components
//!
//! - **Scale**: reference-layout pixel values → active display
//! - **Format**: `m:ss` time labels
//! - **Input logic**: swipe directions → skip steps
//! - **Display**: SSD1306 128×64 OLED via I²C (embedded)
//! - **Buttons**: 3 tactile switches with debouncing (PREV, PLAY, NEXT) (embedded)

pub mod format;
pub mod input_logic;
pub mod scale;

#[cfg(feature = "embedded")]
pub mod buttons;
#[cfg(feature = "embedded")]
pub mod display;

use crate::control::StepDirection;
use crate::panel::PanelEvent;

/// Physical button events (after debouncing).
///
/// The remote has no touch controller, so each button stands in for one
/// tap target of the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    Prev,
    PlayPause,
    Next,
}

impl From<ButtonEvent> for PanelEvent {
    fn from(button: ButtonEvent) -> Self {
        match button {
            ButtonEvent::Prev => PanelEvent::SkipTap(StepDirection::Previous),
            ButtonEvent::PlayPause => PanelEvent::PlayPauseTap,
            ButtonEvent::Next => PanelEvent::SkipTap(StepDirection::Next),
        }
    }
}

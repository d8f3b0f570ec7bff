//! Interaction core - gestures in, track transitions and HID commands out.
//!
//! ## Components
//!
//! - **Gesture gate**: rate limit for skip swipes
//! - **Navigation sequencer**: one crossfade at a time, steps queued
//! - **Volume hold decoder**: long press + vertical drag → volume notches
//! - **Command dispatcher**: usage → press/release reports, gated by link
//! - **Playback clock**: elapsed time and progress while playing
//!
//! Nothing in here blocks or owns a timer; the toolkit collaborators in
//! [`toolkit`] start animations and timers and report back by id.

pub mod catalog;
pub mod dispatcher;
pub mod gesture_gate;
pub mod navigation;
pub mod playback_clock;
pub mod toolkit;
pub mod volume_hold;

pub use catalog::{StepDirection, Track, DEMO_CATALOG};
pub use dispatcher::{CommandDispatcher, HidLink};
pub use gesture_gate::GestureGate;
pub use navigation::{NavigationSequencer, Phase};
pub use playback_clock::{PlaybackState, Progress};
pub use toolkit::{AnimationId, Animator, Fade, Scheduler, TimerId};
pub use volume_hold::{HoldState, VolumeHoldDecoder, VolumeStep};

use crate::config;
use crate::ui::scale::UiScale;

/// Runtime-tunable timing and thresholds for the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelConfig {
    pub fade_ms: u32,
    pub tick_period_ms: u32,
    pub arm_delay_ms: u64,
    pub volume_interval_ms: u64,
    /// Vertical travel per volume notch, already scaled (px, >= 1).
    pub volume_step_px: i32,
    pub gesture_interval_ms: u64,
}

impl PanelConfig {
    /// Defaults with the volume step scaled to the display.
    pub fn for_scale(scale: UiScale) -> Self {
        Self {
            volume_step_px: scale.px(config::VOLUME_STEP_BASE_PX).max(1),
            ..Self::default()
        }
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            fade_ms: config::SONG_FADE_MS,
            tick_period_ms: config::PROGRESS_TICK_MS,
            arm_delay_ms: config::VOLUME_HOLD_ARM_DELAY_MS,
            volume_interval_ms: config::VOLUME_CMD_INTERVAL_MS,
            volume_step_px: config::VOLUME_STEP_BASE_PX,
            gesture_interval_ms: config::GESTURE_RATE_LIMIT_MS,
        }
    }
}

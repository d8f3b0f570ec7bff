//! Playback state and the once-a-second progress clock.

use super::catalog::{wrap_step, StepDirection, Track};
use crate::config::PROGRESS_MAX;

/// Position in the catalog and in the current track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlaybackState {
    pub current_index: usize,
    /// In `[0, duration_secs]`.
    pub elapsed_secs: u32,
    pub is_playing: bool,
}

impl PlaybackState {
    pub const fn new() -> Self {
        Self {
            current_index: 0,
            elapsed_secs: 0,
            is_playing: false,
        }
    }

    /// Rewind and pause, keeping the current track.
    pub fn reset(&mut self) {
        self.elapsed_secs = 0;
        self.is_playing = false;
    }

    /// Move one track; elapsed time restarts at zero.
    pub fn apply_step(&mut self, step: StepDirection, catalog_len: usize) {
        self.current_index = wrap_step(self.current_index, step, catalog_len);
        self.elapsed_secs = 0;
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new()
    }
}

/// What one tick produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Progress {
    pub elapsed_secs: u32,
    /// `0..=100`, truncated.
    pub percent: u8,
}

/// Integer progress, no rounding.
pub fn progress_percent(elapsed_secs: u32, duration_secs: u16) -> u8 {
    if duration_secs == 0 {
        return 0;
    }
    let pct = elapsed_secs.saturating_mul(u32::from(PROGRESS_MAX)) / u32::from(duration_secs);
    pct.min(u32::from(PROGRESS_MAX)) as u8
}

/// Advance `state` by one second of `track`. No-op while paused.
///
/// The modulus is `duration + 1`, so `elapsed == duration` is shown for one
/// tick before wrapping to zero.
pub fn tick(state: &mut PlaybackState, track: &Track) -> Option<Progress> {
    if !state.is_playing {
        return None;
    }

    let duration = u32::from(track.duration_secs);
    state.elapsed_secs = (state.elapsed_secs + 1) % (duration + 1);
    Some(Progress {
        elapsed_secs: state.elapsed_secs,
        percent: progress_percent(state.elapsed_secs, track.duration_secs),
    })
}

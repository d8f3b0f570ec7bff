//! The music control screen.
//!
//! [`MusicPanel`] owns every piece of interaction state and is handed the
//! toolkit by reference on each call. The event pump feeds it serially:
//! input events, animation frames and completions, timer ticks. Each call
//! runs to completion before the next one, so a skip arriving mid-crossfade
//! always sees the running animation and only queues.

use crate::config::OPA_COVER;
use crate::control::{
    playback_clock, AnimationId, Animator, CommandDispatcher, GestureGate, HidLink,
    NavigationSequencer, PanelConfig, PlaybackState, Scheduler, StepDirection, TimerId, Track,
    VolumeHoldDecoder, VolumeStep,
};
use crate::error::{Delivery, Error};
use crate::hid::ConsumerUsage;
use crate::ui::format::time_label;
use crate::ui::input_logic::{swipe_step, GestureDir};

#[cfg(test)]
mod tests;

/// Widgets the panel draws into. Implemented by the display layer.
pub trait PanelView {
    /// False once the screen's widgets have been torn down.
    fn is_alive(&self) -> bool;
    /// Title, artist and duration label of `track`.
    fn show_track(&mut self, track: &Track);
    /// Opacity of the title and artist labels.
    fn set_text_opacity(&mut self, opa: u8);
    fn set_progress(&mut self, percent: u8, elapsed: &str);
    fn set_play_icon(&mut self, playing: bool);
    /// Play/next/prev clickable and bright, or dimmed.
    fn set_controls_enabled(&mut self, enabled: bool);
    fn show_volume_overlay(&mut self, symbol: char);
    fn hide_volume_overlay(&mut self);
}

/// Everything the panel needs from the graphics toolkit.
pub trait Toolkit: PanelView + Animator + Scheduler {}

impl<T: PanelView + Animator + Scheduler> Toolkit for T {}

/// Input delivered to the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelEvent {
    PlayPauseTap,
    SkipTap(StepDirection),
    Swipe(GestureDir),
    LongPress { y: i32 },
    /// Pointer moved while pressed.
    Pressing { y: i32 },
    Released,
    /// `still_pressed` is the pointer state read back when the loss arrived.
    PressLost { still_pressed: bool },
}

pub struct MusicPanel<L> {
    catalog: &'static [Track],
    config: PanelConfig,
    playback: PlaybackState,
    nav: NavigationSequencer,
    volume: VolumeHoldDecoder,
    gate: GestureGate,
    dispatcher: CommandDispatcher<L>,
    tick_timer: Option<TimerId>,
    link_up: Option<bool>,
}

impl<L: HidLink> MusicPanel<L> {
    pub fn new(catalog: &'static [Track], config: PanelConfig, link: L) -> Self {
        assert!(!catalog.is_empty(), "catalog must not be empty");
        Self {
            catalog,
            config,
            playback: PlaybackState::new(),
            nav: NavigationSequencer::new(config.fade_ms),
            volume: VolumeHoldDecoder::new(config.volume_step_px, config.volume_interval_ms),
            gate: GestureGate::new(config.gesture_interval_ms),
            dispatcher: CommandDispatcher::new(link),
            tick_timer: None,
            link_up: None,
        }
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    pub fn navigation(&self) -> &NavigationSequencer {
        &self.nav
    }

    pub fn volume(&self) -> &VolumeHoldDecoder {
        &self.volume
    }

    pub fn link(&self) -> &L {
        self.dispatcher.link()
    }

    pub fn link_mut(&mut self) -> &mut L {
        self.dispatcher.link_mut()
    }

    pub fn tick_timer(&self) -> Option<TimerId> {
        self.tick_timer
    }

    pub fn current_track(&self) -> &Track {
        &self.catalog[self.playback.current_index]
    }

    /// Screen entry. Everything but the current track index starts over.
    pub fn show<T: Toolkit>(&mut self, ui: &mut T, now_ms: u64) {
        self.playback.reset();
        self.nav.reset();
        self.volume.reset(now_ms + self.config.arm_delay_ms);
        self.gate.reset();

        ui.set_text_opacity(OPA_COVER);
        ui.show_track(self.current_track());
        ui.set_play_icon(false);
        ui.hide_volume_overlay();
        self.reset_progress(ui);
        self.refresh_controls(ui);

        if let Some(old) = self.tick_timer.take() {
            ui.cancel(old);
        }
        self.tick_timer = Some(ui.schedule_periodic(self.config.tick_period_ms));

        info!(
            "panel: shown, track {} of {}",
            self.playback.current_index,
            self.catalog.len()
        );
    }

    /// Screen exit. Stops the clock; in-flight animations are left to finish
    /// against a dead view and their completions are dropped.
    pub fn teardown<T: Toolkit>(&mut self, ui: &mut T) {
        if let Some(timer) = self.tick_timer.take() {
            ui.cancel(timer);
        }
        self.nav.reset();
        self.volume.on_release();
        info!("panel: torn down");
    }

    pub fn handle_event<T: Toolkit>(&mut self, ui: &mut T, event: PanelEvent, now_ms: u64) {
        if !ui.is_alive() {
            self.volume.on_release();
            return;
        }

        match event {
            PanelEvent::PlayPauseTap => self.toggle_play_pause(ui),
            PanelEvent::SkipTap(direction) => self.skip(ui, direction),
            PanelEvent::Swipe(dir) => {
                let Some(direction) = swipe_step(dir) else {
                    return;
                };
                if !self.dispatcher.is_link_connected() {
                    return;
                }
                if self.gate.try_accept(now_ms) {
                    self.skip(ui, direction);
                } else {
                    debug!("panel: swipe rate limited");
                }
            }
            PanelEvent::LongPress { y } => {
                if self.volume.on_long_press(y, now_ms) {
                    ui.show_volume_overlay(' ');
                }
            }
            PanelEvent::Pressing { y } => self.drag_volume(ui, y, now_ms),
            PanelEvent::Released => {
                self.volume.on_release();
                ui.hide_volume_overlay();
            }
            PanelEvent::PressLost { still_pressed } => {
                self.volume.on_press_lost(still_pressed);
                if !still_pressed {
                    ui.hide_volume_overlay();
                }
            }
        }
    }

    /// Queue one track step behind the crossfade. Sends nothing.
    pub fn request_step<T: Toolkit>(&mut self, ui: &mut T, direction: StepDirection) {
        self.nav.request_step(direction, ui);
    }

    pub fn on_animation_step<T: Toolkit>(&mut self, ui: &mut T, id: AnimationId, value: u8) {
        if ui.is_alive() && self.nav.owns(id) {
            ui.set_text_opacity(value);
        }
    }

    pub fn on_animation_complete<T: Toolkit>(&mut self, ui: &mut T, id: AnimationId) {
        if !ui.is_alive() {
            debug!("panel: animation {} finished after teardown", id.0);
            return;
        }

        if let Some(step) = self.nav.on_animation_complete(id, ui) {
            self.playback.apply_step(step, self.catalog.len());
            ui.show_track(self.current_track());
            self.reset_progress(ui);
            self.nav.begin_fade_in(ui);
        }
    }

    pub fn on_tick<T: Toolkit>(&mut self, ui: &mut T, timer: TimerId) {
        if self.tick_timer != Some(timer) {
            return;
        }

        // The screen can be rebuilt while the timer is still armed.
        if !ui.is_alive() {
            ui.cancel(timer);
            self.tick_timer = None;
            info!("panel: view gone, progress timer cancelled");
            return;
        }

        self.refresh_controls(ui);

        let track = self.catalog[self.playback.current_index];
        if let Some(progress) = playback_clock::tick(&mut self.playback, &track) {
            ui.set_progress(progress.percent, time_label(progress.elapsed_secs).as_str());
        }
    }

    fn toggle_play_pause<T: Toolkit>(&mut self, ui: &mut T) {
        if !self.dispatcher.is_link_connected() {
            return;
        }

        self.playback.is_playing = !self.playback.is_playing;
        ui.set_play_icon(self.playback.is_playing);

        let usage = ConsumerUsage::play_pause(self.playback.is_playing);
        report(usage, self.dispatcher.send(usage));
    }

    fn skip<T: Toolkit>(&mut self, ui: &mut T, direction: StepDirection) {
        if !self.dispatcher.is_link_connected() {
            return;
        }

        self.nav.request_step(direction, ui);

        let usage = match direction {
            StepDirection::Next => ConsumerUsage::ScanNext,
            StepDirection::Previous => ConsumerUsage::ScanPrevious,
        };
        report(usage, self.dispatcher.send(usage));
    }

    fn drag_volume<T: Toolkit>(&mut self, ui: &mut T, y: i32, now_ms: u64) {
        let dispatcher = &mut self.dispatcher;
        self.volume.on_drag(y, now_ms, |step| {
            let usage = match step {
                VolumeStep::Up => ConsumerUsage::VolumeUp,
                VolumeStep::Down => ConsumerUsage::VolumeDown,
            };
            match dispatcher.send(usage) {
                Ok(_) => {
                    ui.show_volume_overlay(step.symbol());
                    true
                }
                Err(e) => {
                    warn!("panel: media command '{}' failed: {}", usage.name(), e);
                    false
                }
            }
        });
    }

    fn reset_progress<T: Toolkit>(&mut self, ui: &mut T) {
        self.playback.elapsed_secs = 0;
        ui.set_progress(0, time_label(0).as_str());
    }

    fn refresh_controls<T: Toolkit>(&mut self, ui: &mut T) {
        let connected = self.dispatcher.is_link_connected();
        if self.link_up != Some(connected) {
            info!("panel: link {}", if connected { "up" } else { "down" });
            self.link_up = Some(connected);
        }
        ui.set_controls_enabled(connected);
    }
}

/// Transport failures are logged and dropped; the visual state has
/// already moved on and stays that way.
fn report(usage: ConsumerUsage, result: Result<Delivery, Error>) {
    match result {
        Ok(Delivery::Sent) => trace!("panel: sent '{}'", usage.name()),
        Ok(Delivery::NotConnected) => debug!("panel: '{}' not sent, no link", usage.name()),
        Err(e) => warn!("panel: media command '{}' failed: {}", usage.name(), e),
    }
}

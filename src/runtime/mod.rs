//! Event pump - the toolkit the panel runs against.
//!
//! Owns the running fades and periodic timers and reports them back to the
//! panel by id, one call at a time. Time is handed in by the caller, so the
//! firmware loop and the host tests drive the same code.
//!
//! ```text
//!   input ──dispatch──▶ ┌──────────┐ ──handle_event──────▶ MusicPanel
//!   clock ──advance───▶ │ EventPump│ ──on_animation_step──▶
//!                       └──────────┘ ──on_animation_complete▶
//!                                    ──on_tick───────────▶
//! ```

#[cfg(feature = "embedded")]
pub mod task;

use heapless::Vec;

use crate::config::ANIMATION_FRAME_MS;
use crate::control::{AnimationId, Animator, Fade, HidLink, Scheduler, TimerId, Track};
use crate::panel::{MusicPanel, PanelEvent, PanelView};

/// Fades tracked at once. The panel only ever owns one; the rest are stale
/// ones finishing against a rebuilt screen.
const MAX_FADES: usize = 4;
const MAX_TIMERS: usize = 4;

#[derive(Clone, Copy, Debug)]
struct RunningFade {
    id: AnimationId,
    fade: Fade,
    started_ms: u64,
}

#[derive(Clone, Copy, Debug)]
struct PeriodicTimer {
    id: TimerId,
    period_ms: u32,
    next_due_ms: u64,
}

pub struct EventPump<V> {
    view: V,
    fades: Vec<RunningFade, MAX_FADES>,
    timers: Vec<PeriodicTimer, MAX_TIMERS>,
    next_id: u32,
    now_ms: u64,
}

impl<V: PanelView> EventPump<V> {
    pub fn new(view: V, now_ms: u64) -> Self {
        Self {
            view,
            fades: Vec::new(),
            timers: Vec::new(),
            next_id: 0,
            now_ms,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn running_fades(&self) -> usize {
        self.fades.len()
    }

    pub fn scheduled_timers(&self) -> usize {
        self.timers.len()
    }

    /// Show the panel against this pump.
    pub fn show<L: HidLink>(&mut self, panel: &mut MusicPanel<L>, now_ms: u64) {
        self.set_now(now_ms);
        let now = self.now_ms;
        panel.show(self, now);
    }

    /// Deliver one input event.
    pub fn dispatch<L: HidLink>(
        &mut self,
        panel: &mut MusicPanel<L>,
        event: PanelEvent,
        now_ms: u64,
    ) {
        self.set_now(now_ms);
        let now = self.now_ms;
        panel.handle_event(self, event, now);
    }

    /// Run animation frames and due timers up to `now_ms`.
    pub fn advance<L: HidLink>(&mut self, panel: &mut MusicPanel<L>, now_ms: u64) {
        self.set_now(now_ms);
        self.run_fades(panel);
        self.run_timers(panel);
    }

    /// When [`Self::advance`] has work next: the next frame while a fade
    /// runs, otherwise the earliest timer.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        let frame = (!self.fades.is_empty()).then(|| self.now_ms + ANIMATION_FRAME_MS);
        let timer = self.timers.iter().map(|t| t.next_due_ms).min();
        match (frame, timer) {
            (Some(f), Some(t)) => Some(f.min(t)),
            (f, t) => f.or(t),
        }
    }

    // The clock never runs backwards, even if the caller's does.
    fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    fn run_fades<L: HidLink>(&mut self, panel: &mut MusicPanel<L>) {
        // Completions start new fades; they get their first frame next round.
        let running = core::mem::take(&mut self.fades);
        for f in running.iter() {
            let elapsed = self.now_ms.saturating_sub(f.started_ms);
            let elapsed = elapsed.min(u64::from(u32::MAX)) as u32;

            panel.on_animation_step(self, f.id, f.fade.value_at(elapsed));
            if elapsed >= f.fade.duration_ms {
                panel.on_animation_complete(self, f.id);
            } else {
                self.track_fade(*f);
            }
        }
    }

    fn run_timers<L: HidLink>(&mut self, panel: &mut MusicPanel<L>) {
        let now = self.now_ms;
        let mut due: Vec<TimerId, MAX_TIMERS> = Vec::new();
        for t in self.timers.iter_mut() {
            if t.next_due_ms > now {
                continue;
            }
            t.next_due_ms += u64::from(t.period_ms);
            // A late pump fires once and realigns; missed periods are not replayed.
            if t.next_due_ms <= now {
                t.next_due_ms = now + u64::from(t.period_ms);
            }
            let _ = due.push(t.id);
        }

        for id in due {
            // An earlier tick in this round may have cancelled it.
            if self.timers.iter().any(|t| t.id == id) {
                panel.on_tick(self, id);
            }
        }
    }

    fn track_fade(&mut self, fade: RunningFade) {
        if self.fades.is_full() {
            let stale = self.fades.remove(0);
            warn!("pump: fade {} dropped, too many running", stale.id.0);
        }
        let _ = self.fades.push(fade);
    }

    fn alloc_id(&mut self) -> u32 {
        self.next_id = self.next_id.wrapping_add(1);
        self.next_id
    }
}

impl<V: PanelView> Animator for EventPump<V> {
    fn start_fade(&mut self, fade: Fade) -> AnimationId {
        let id = AnimationId(self.alloc_id());
        self.track_fade(RunningFade {
            id,
            fade,
            started_ms: self.now_ms,
        });
        id
    }
}

impl<V: PanelView> Scheduler for EventPump<V> {
    fn schedule_periodic(&mut self, period_ms: u32) -> TimerId {
        let id = TimerId(self.alloc_id());
        let period_ms = period_ms.max(1);
        if self.timers.is_full() {
            let stale = self.timers.remove(0);
            warn!("pump: timer {} dropped, too many scheduled", stale.id.0);
        }
        let _ = self.timers.push(PeriodicTimer {
            id,
            period_ms,
            next_due_ms: self.now_ms + u64::from(period_ms),
        });
        id
    }

    fn cancel(&mut self, timer: TimerId) {
        self.timers.retain(|t| t.id != timer);
    }
}

impl<V: PanelView> PanelView for EventPump<V> {
    fn is_alive(&self) -> bool {
        self.view.is_alive()
    }

    fn show_track(&mut self, track: &Track) {
        self.view.show_track(track);
    }

    fn set_text_opacity(&mut self, opa: u8) {
        self.view.set_text_opacity(opa);
    }

    fn set_progress(&mut self, percent: u8, elapsed: &str) {
        self.view.set_progress(percent, elapsed);
    }

    fn set_play_icon(&mut self, playing: bool) {
        self.view.set_play_icon(playing);
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        self.view.set_controls_enabled(enabled);
    }

    fn show_volume_overlay(&mut self, symbol: char) {
        self.view.show_volume_overlay(symbol);
    }

    fn hide_volume_overlay(&mut self) {
        self.view.hide_volume_overlay();
    }
}

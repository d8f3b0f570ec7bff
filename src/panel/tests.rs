//! Scenario tests for the music panel.
//!
//! These run on the host against a recording toolkit and link, driving
//! animation completions and timer ticks by hand the way the event pump
//! would.

use super::*;
use crate::control::catalog::wrap_offset;
use crate::control::{Fade, DEMO_CATALOG};
use crate::error::{LinkError, TransportError};
use heapless::{String, Vec};

// ═══════════════════════════════════════════════════════════════════════════
// Test doubles
// ═══════════════════════════════════════════════════════════════════════════

struct FakeLink {
    connected: bool,
    sent: Vec<[u8; 2], 64>,
    fail_next: Option<LinkError>,
}

impl FakeLink {
    fn up() -> Self {
        Self {
            connected: true,
            sent: Vec::new(),
            fail_next: None,
        }
    }

    fn down() -> Self {
        Self {
            connected: false,
            ..Self::up()
        }
    }

    fn usages(&self) -> Vec<u16, 64> {
        self.sent
            .iter()
            .map(|r| u16::from_le_bytes(*r))
            .collect()
    }
}

impl HidLink for FakeLink {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn transmit(&mut self, report: [u8; 2]) -> Result<(), LinkError> {
        if let Some(err) = self.fail_next.take() {
            return Err(err);
        }
        self.sent.push(report).unwrap();
        Ok(())
    }
}

struct FakeUi {
    alive: bool,
    next_id: u32,
    fades: Vec<(AnimationId, Fade), 64>,
    timers: Vec<TimerId, 8>,
    cancelled: Vec<TimerId, 8>,
    opacity: u8,
    title: &'static str,
    tracks_shown: u32,
    progress: u8,
    elapsed: String<8>,
    playing_icon: bool,
    controls_enabled: bool,
    overlay: Option<char>,
}

impl FakeUi {
    fn new() -> Self {
        Self {
            alive: true,
            next_id: 0,
            fades: Vec::new(),
            timers: Vec::new(),
            cancelled: Vec::new(),
            opacity: 0,
            title: "",
            tracks_shown: 0,
            progress: 0,
            elapsed: String::new(),
            playing_icon: false,
            controls_enabled: false,
            overlay: None,
        }
    }

    fn last_fade(&self) -> AnimationId {
        self.fades.last().expect("no animation started").0
    }
}

impl PanelView for FakeUi {
    fn is_alive(&self) -> bool {
        self.alive
    }

    fn show_track(&mut self, track: &Track) {
        self.title = track.title;
        self.tracks_shown += 1;
    }

    fn set_text_opacity(&mut self, opa: u8) {
        self.opacity = opa;
    }

    fn set_progress(&mut self, percent: u8, elapsed: &str) {
        self.progress = percent;
        self.elapsed.clear();
        self.elapsed.push_str(elapsed).unwrap();
    }

    fn set_play_icon(&mut self, playing: bool) {
        self.playing_icon = playing;
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        self.controls_enabled = enabled;
    }

    fn show_volume_overlay(&mut self, symbol: char) {
        self.overlay = Some(symbol);
    }

    fn hide_volume_overlay(&mut self) {
        self.overlay = None;
    }
}

impl Animator for FakeUi {
    fn start_fade(&mut self, fade: Fade) -> AnimationId {
        self.next_id += 1;
        let id = AnimationId(self.next_id);
        self.fades.push((id, fade)).unwrap();
        id
    }
}

impl Scheduler for FakeUi {
    fn schedule_periodic(&mut self, _period_ms: u32) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers.push(id).unwrap();
        id
    }

    fn cancel(&mut self, timer: TimerId) {
        self.cancelled.push(timer).unwrap();
    }
}

const ENTRY_MS: u64 = 10_000;
const ARMED_MS: u64 = ENTRY_MS + 1_200;

fn shown(link: FakeLink) -> (MusicPanel<FakeLink>, FakeUi) {
    let mut panel = MusicPanel::new(&DEMO_CATALOG, PanelConfig::default(), link);
    let mut ui = FakeUi::new();
    panel.show(&mut ui, ENTRY_MS);
    (panel, ui)
}

/// Complete animations until the sequencer is idle. Returns fade-outs
/// completed, one per crossfade.
fn settle(panel: &mut MusicPanel<FakeLink>, ui: &mut FakeUi) -> usize {
    let mut crossfades = 0;
    let mut guard = 0;
    while panel.navigation().is_animating() {
        let (id, fade) = *ui.fades.last().unwrap();
        if fade.to == 0 {
            crossfades += 1;
        }
        panel.on_animation_complete(ui, id);
        guard += 1;
        assert!(guard < 100, "crossfade never settled");
    }
    crossfades
}

fn tick(panel: &mut MusicPanel<FakeLink>, ui: &mut FakeUi, n: usize) {
    let timer = panel.tick_timer().unwrap();
    for _ in 0..n {
        panel.on_tick(ui, timer);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Screen lifecycle
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn show_resets_view_and_starts_clock() {
    let (panel, ui) = shown(FakeLink::up());

    assert_eq!(ui.title, "Track One");
    assert_eq!(ui.opacity, 255);
    assert_eq!(ui.elapsed.as_str(), "0:00");
    assert!(ui.controls_enabled);
    assert!(!ui.playing_icon);
    assert_eq!(ui.overlay, None);
    assert_eq!(ui.timers.len(), 1);
    assert_eq!(panel.tick_timer(), Some(ui.timers[0]));
    assert!(!panel.playback().is_playing);
}

#[test]
fn controls_dimmed_without_link() {
    let (_panel, ui) = shown(FakeLink::down());
    assert!(!ui.controls_enabled);
}

#[test]
fn reentry_clears_queue_and_pauses() {
    let (mut panel, mut ui) = shown(FakeLink::up());
    panel.handle_event(&mut ui, PanelEvent::PlayPauseTap, ENTRY_MS);
    panel.handle_event(&mut ui, PanelEvent::SkipTap(StepDirection::Next), ENTRY_MS);
    panel.handle_event(&mut ui, PanelEvent::SkipTap(StepDirection::Next), ENTRY_MS);
    let first_timer = panel.tick_timer().unwrap();

    panel.show(&mut ui, ENTRY_MS + 5_000);

    assert!(!panel.navigation().is_animating());
    assert_eq!(panel.navigation().pending_steps(), 0);
    assert!(!panel.playback().is_playing);
    assert_eq!(panel.playback().elapsed_secs, 0);
    assert!(ui.cancelled.contains(&first_timer));
    assert_ne!(panel.tick_timer(), Some(first_timer));
}

#[test]
fn teardown_stops_clock() {
    let (mut panel, mut ui) = shown(FakeLink::up());
    let timer = panel.tick_timer().unwrap();
    panel.teardown(&mut ui);
    assert_eq!(panel.tick_timer(), None);
    assert!(ui.cancelled.contains(&timer));

    // A tick already in the queue is ignored.
    panel.on_tick(&mut ui, timer);
    assert_eq!(panel.playback().elapsed_secs, 0);
}

// ═══════════════════════════════════════════════════════════════════════════
// Navigation
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn three_skips_in_one_window_land_on_index_three() {
    let (mut panel, mut ui) = shown(FakeLink::up());
    panel.handle_event(&mut ui, PanelEvent::PlayPauseTap, ENTRY_MS);
    tick(&mut panel, &mut ui, 5);
    assert_eq!(panel.playback().elapsed_secs, 5);

    for _ in 0..3 {
        panel.handle_event(&mut ui, PanelEvent::SkipTap(StepDirection::Next), ENTRY_MS);
    }
    assert!(panel.navigation().is_animating());
    assert_eq!(ui.fades.len(), 1);

    let mut crossfades = 0;
    while panel.navigation().is_animating() {
        tick(&mut panel, &mut ui, 2);
        let before = panel.playback().current_index;
        let id = ui.last_fade();
        panel.on_animation_complete(&mut ui, id);
        if panel.playback().current_index != before {
            crossfades += 1;
            assert_eq!(panel.playback().elapsed_secs, 0);
            assert_eq!(ui.title, DEMO_CATALOG[panel.playback().current_index].title);
            // Fade-in starts only after the labels changed.
            let (_, fade) = ui.fades.last().unwrap();
            assert_eq!((fade.from, fade.to), (0, 255));
        }
    }

    assert_eq!(crossfades, 3);
    assert_eq!(panel.playback().current_index, 3);
    assert_eq!(ui.fades.len(), 6);
    assert_eq!(
        panel.link().usages().as_slice(),
        &[0xB0, 0, 0xB5, 0, 0xB5, 0, 0xB5, 0]
    );
}

#[test]
fn previous_from_first_track_wraps() {
    let (mut panel, mut ui) = shown(FakeLink::up());
    panel.handle_event(&mut ui, PanelEvent::SkipTap(StepDirection::Previous), ENTRY_MS);
    assert_eq!(settle(&mut panel, &mut ui), 1);
    assert_eq!(panel.playback().current_index, 4);
    assert_eq!(ui.title, "Track Five");
}

#[test]
fn index_moves_by_net_sum() {
    let (mut panel, mut ui) = shown(FakeLink::up());
    for _ in 0..7 {
        panel.request_step(&mut ui, StepDirection::Previous);
    }
    settle(&mut panel, &mut ui);
    for _ in 0..2 {
        panel.request_step(&mut ui, StepDirection::Next);
    }
    settle(&mut panel, &mut ui);
    // -7 + 2 = -5 ≡ 0 (mod 5)
    assert_eq!(panel.playback().current_index, wrap_offset(0, -5, DEMO_CATALOG.len()));
    assert_eq!(panel.playback().current_index, 0);
    // request_step never talks to the link.
    assert!(panel.link().sent.is_empty());
}

#[test]
fn animation_frames_drive_label_opacity() {
    let (mut panel, mut ui) = shown(FakeLink::up());
    panel.request_step(&mut ui, StepDirection::Next);
    let id = ui.last_fade();

    panel.on_animation_step(&mut ui, id, 128);
    assert_eq!(ui.opacity, 128);

    panel.on_animation_step(&mut ui, AnimationId(9_999), 7);
    assert_eq!(ui.opacity, 128);
}

#[test]
fn skip_ignored_without_link() {
    let (mut panel, mut ui) = shown(FakeLink::down());
    panel.handle_event(&mut ui, PanelEvent::SkipTap(StepDirection::Next), ENTRY_MS);
    panel.handle_event(&mut ui, PanelEvent::Swipe(GestureDir::Left), ENTRY_MS);
    assert!(!panel.navigation().is_animating());
    assert!(ui.fades.is_empty());
    assert!(panel.link().sent.is_empty());
}

#[test]
fn transport_failure_does_not_undo_navigation() {
    let (mut panel, mut ui) = shown(FakeLink::up());
    panel.link_mut().fail_next = Some(LinkError::Transport(TransportError::Notify));
    panel.handle_event(&mut ui, PanelEvent::SkipTap(StepDirection::Next), ENTRY_MS);
    assert!(panel.link().sent.is_empty());
    assert_eq!(settle(&mut panel, &mut ui), 1);
    assert_eq!(panel.playback().current_index, 1);
}

#[test]
fn completion_after_teardown_is_ignored() {
    let (mut panel, mut ui) = shown(FakeLink::up());
    panel.request_step(&mut ui, StepDirection::Next);
    let id = ui.last_fade();
    ui.alive = false;

    panel.on_animation_complete(&mut ui, id);
    assert_eq!(panel.playback().current_index, 0);
    assert_eq!(ui.tracks_shown, 1);
}

// ═══════════════════════════════════════════════════════════════════════════
// Swipe rate limiting
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn swipes_inside_rate_window_collapse_to_one() {
    let (mut panel, mut ui) = shown(FakeLink::up());
    panel.handle_event(&mut ui, PanelEvent::Swipe(GestureDir::Left), 20_000);
    panel.handle_event(&mut ui, PanelEvent::Swipe(GestureDir::Left), 20_200);
    assert_eq!(settle(&mut panel, &mut ui), 1);
    assert_eq!(panel.playback().current_index, 1);
}

#[test]
fn swipes_outside_rate_window_both_count() {
    let (mut panel, mut ui) = shown(FakeLink::up());
    panel.handle_event(&mut ui, PanelEvent::Swipe(GestureDir::Right), 20_000);
    panel.handle_event(&mut ui, PanelEvent::Swipe(GestureDir::Right), 20_400);
    assert_eq!(settle(&mut panel, &mut ui), 2);
    assert_eq!(panel.playback().current_index, 3);
    assert_eq!(panel.link().usages().as_slice(), &[0xB6, 0, 0xB6, 0]);
}

#[test]
fn taps_bypass_rate_limit() {
    let (mut panel, mut ui) = shown(FakeLink::up());
    panel.handle_event(&mut ui, PanelEvent::Swipe(GestureDir::Left), 20_000);
    panel.handle_event(&mut ui, PanelEvent::SkipTap(StepDirection::Next), 20_010);
    assert_eq!(settle(&mut panel, &mut ui), 2);
}

#[test]
fn vertical_swipe_is_not_a_skip() {
    let (mut panel, mut ui) = shown(FakeLink::up());
    panel.handle_event(&mut ui, PanelEvent::Swipe(GestureDir::Top), 20_000);
    assert!(!panel.navigation().is_animating());
}

// ═══════════════════════════════════════════════════════════════════════════
// Play / pause and clock
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn play_pause_toggles_and_sends() {
    let (mut panel, mut ui) = shown(FakeLink::up());
    panel.handle_event(&mut ui, PanelEvent::PlayPauseTap, ENTRY_MS);
    assert!(panel.playback().is_playing);
    assert!(ui.playing_icon);

    panel.handle_event(&mut ui, PanelEvent::PlayPauseTap, ENTRY_MS);
    assert!(!panel.playback().is_playing);
    assert!(!ui.playing_icon);
    assert_eq!(panel.link().usages().as_slice(), &[0xB0, 0, 0xB1, 0]);
}

#[test]
fn play_ignored_without_link() {
    let (mut panel, mut ui) = shown(FakeLink::down());
    panel.handle_event(&mut ui, PanelEvent::PlayPauseTap, ENTRY_MS);
    assert!(!panel.playback().is_playing);
    tick(&mut panel, &mut ui, 3);
    assert_eq!(panel.playback().elapsed_secs, 0);
}

#[test]
fn clock_reaches_duration_then_wraps() {
    let (mut panel, mut ui) = shown(FakeLink::up());
    panel.handle_event(&mut ui, PanelEvent::PlayPauseTap, ENTRY_MS);

    tick(&mut panel, &mut ui, 173);
    assert_eq!(panel.playback().elapsed_secs, 173);
    assert_eq!(ui.progress, 100);
    assert_eq!(ui.elapsed.as_str(), "2:53");

    tick(&mut panel, &mut ui, 1);
    assert_eq!(panel.playback().elapsed_secs, 0);
    assert_eq!(ui.progress, 0);
}

#[test]
fn tick_refreshes_control_state() {
    let (mut panel, mut ui) = shown(FakeLink::up());
    assert!(ui.controls_enabled);
    panel.link_mut().connected = false;
    tick(&mut panel, &mut ui, 1);
    assert!(!ui.controls_enabled);
}

#[test]
fn clock_cancels_itself_when_view_is_gone() {
    let (mut panel, mut ui) = shown(FakeLink::up());
    panel.handle_event(&mut ui, PanelEvent::PlayPauseTap, ENTRY_MS);
    let timer = panel.tick_timer().unwrap();
    ui.alive = false;

    panel.on_tick(&mut ui, timer);
    assert_eq!(panel.tick_timer(), None);
    assert!(ui.cancelled.contains(&timer));
    assert_eq!(panel.playback().elapsed_secs, 0);
}

// ═══════════════════════════════════════════════════════════════════════════
// Volume hold
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn entry_touch_does_not_arm_volume() {
    let (mut panel, mut ui) = shown(FakeLink::up());
    panel.handle_event(&mut ui, PanelEvent::LongPress { y: 120 }, ENTRY_MS + 400);
    assert_eq!(ui.overlay, None);
    panel.handle_event(&mut ui, PanelEvent::Pressing { y: 60 }, ENTRY_MS + 600);
    assert!(panel.link().sent.is_empty());
}

#[test]
fn drag_up_k_steps_sends_k_volume_ups() {
    let (mut panel, mut ui) = shown(FakeLink::up());
    panel.handle_event(&mut ui, PanelEvent::LongPress { y: 120 }, ARMED_MS);
    assert_eq!(ui.overlay, Some(' '));

    // 3 steps of 8 px, one display frame apart but each past the interval.
    let mut y = 120;
    let mut now = ARMED_MS;
    for _ in 0..24 {
        y -= 1;
        now += 20;
        panel.handle_event(&mut ui, PanelEvent::Pressing { y }, now);
    }
    // Let throttled crossings catch up at the final position.
    for _ in 0..3 {
        now += 140;
        panel.handle_event(&mut ui, PanelEvent::Pressing { y }, now);
    }

    assert_eq!(ui.overlay, Some('+'));
    assert_eq!(
        panel.link().usages().as_slice(),
        &[0xE9, 0, 0xE9, 0, 0xE9, 0]
    );
}

#[test]
fn drag_down_sends_volume_down() {
    let (mut panel, mut ui) = shown(FakeLink::up());
    panel.handle_event(&mut ui, PanelEvent::LongPress { y: 50 }, ARMED_MS);
    panel.handle_event(&mut ui, PanelEvent::Pressing { y: 61 }, ARMED_MS + 10);
    assert_eq!(ui.overlay, Some('-'));
    assert_eq!(panel.link().usages().as_slice(), &[0xEA, 0]);
    assert_eq!(panel.volume().reference_y(), 58);
}

#[test]
fn failed_volume_command_is_retried() {
    let (mut panel, mut ui) = shown(FakeLink::up());
    panel.handle_event(&mut ui, PanelEvent::LongPress { y: 100 }, ARMED_MS);
    panel.link_mut().fail_next = Some(LinkError::Transport(TransportError::Raw(5)));
    panel.handle_event(&mut ui, PanelEvent::Pressing { y: 90 }, ARMED_MS + 10);
    assert!(panel.link().sent.is_empty());
    assert_eq!(ui.overlay, Some(' '));

    panel.handle_event(&mut ui, PanelEvent::Pressing { y: 90 }, ARMED_MS + 20);
    assert_eq!(panel.link().usages().as_slice(), &[0xE9, 0]);
}

#[test]
fn release_hides_overlay() {
    let (mut panel, mut ui) = shown(FakeLink::up());
    panel.handle_event(&mut ui, PanelEvent::LongPress { y: 100 }, ARMED_MS);
    panel.handle_event(&mut ui, PanelEvent::Released, ARMED_MS + 50);
    assert_eq!(ui.overlay, None);
    assert!(!panel.volume().is_active());
}

#[test]
fn spurious_press_lost_keeps_hold() {
    let (mut panel, mut ui) = shown(FakeLink::up());
    panel.handle_event(&mut ui, PanelEvent::LongPress { y: 100 }, ARMED_MS);
    panel.handle_event(
        &mut ui,
        PanelEvent::PressLost {
            still_pressed: true,
        },
        ARMED_MS + 50,
    );
    assert!(panel.volume().is_active());
    assert_eq!(ui.overlay, Some(' '));

    panel.handle_event(
        &mut ui,
        PanelEvent::PressLost {
            still_pressed: false,
        },
        ARMED_MS + 60,
    );
    assert!(!panel.volume().is_active());
    assert_eq!(ui.overlay, None);
}

#[test]
fn volume_without_link_is_swallowed() {
    let (mut panel, mut ui) = shown(FakeLink::down());
    panel.handle_event(&mut ui, PanelEvent::LongPress { y: 100 }, ARMED_MS);
    panel.handle_event(&mut ui, PanelEvent::Pressing { y: 92 }, ARMED_MS + 10);
    assert!(panel.link().sent.is_empty());
    // Not an error: the step is consumed and the overlay still reacts.
    assert_eq!(ui.overlay, Some('+'));
    assert_eq!(panel.volume().reference_y(), 92);
}

//! Navigation sequencer - serializes track changes behind a crossfade.
//!
//! Skip requests only touch a signed counter. At most one crossfade runs at
//! a time; each one consumes exactly one unit of the counter when it starts
//! and applies it at the midpoint, once the labels are fully transparent.
//!
//! ```text
//!   Idle ──request──▶ FadingOut ──done──▶ Swapping ──fade_in──▶ FadingIn
//!    ▲                                                             │
//!    └──────────────── done, nothing pending ◀─────────────────────┤
//!                      done, pending != 0 ──▶ FadingOut ◀──────────┘
//! ```

use super::catalog::StepDirection;
use super::toolkit::{AnimationId, Animator, Fade};
use crate::config::{OPA_COVER, OPA_TRANSP};

/// Where the sequencer is inside a crossfade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    Idle,
    /// Labels fading to transparent; `step` is applied when this finishes.
    FadingOut { anim: AnimationId, step: StepDirection },
    /// Fade-out done, waiting for the caller to apply `step`.
    Swapping { step: StepDirection },
    /// New labels fading back in.
    FadingIn { anim: AnimationId },
}

#[derive(Debug)]
pub struct NavigationSequencer {
    pending_steps: i32,
    phase: Phase,
    fade_ms: u32,
}

impl NavigationSequencer {
    pub const fn new(fade_ms: u32) -> Self {
        Self {
            pending_steps: 0,
            phase: Phase::Idle,
            fade_ms,
        }
    }

    /// Drop everything queued. An in-flight animation becomes stale and its
    /// completion is ignored.
    pub fn reset(&mut self) {
        self.pending_steps = 0;
        self.phase = Phase::Idle;
    }

    /// True for the whole of one crossfade (fade-out, swap, fade-in).
    pub fn is_animating(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Steps still waiting for their own crossfade.
    pub fn pending_steps(&self) -> i32 {
        self.pending_steps
    }

    /// Sign of the step owned by the running crossfade, or 0.
    pub fn active_step_sign(&self) -> i8 {
        match self.phase {
            Phase::FadingOut { step, .. } | Phase::Swapping { step } => step.signum() as i8,
            _ => 0,
        }
    }

    /// Queue one step. Starts a crossfade unless one is already running.
    pub fn request_step<A: Animator>(&mut self, direction: StepDirection, animator: &mut A) {
        self.pending_steps = self.pending_steps.saturating_add(direction.signum());
        trace!(
            "nav: request {} pending={}",
            direction.signum(),
            self.pending_steps
        );
        self.start_next(animator);
    }

    /// Report a finished animation.
    ///
    /// Returns the step to apply when a fade-out finished; the caller must
    /// update the index and labels and then call [`Self::begin_fade_in`].
    /// Completions of animations this sequencer does not own are ignored.
    pub fn on_animation_complete<A: Animator>(
        &mut self,
        id: AnimationId,
        animator: &mut A,
    ) -> Option<StepDirection> {
        match self.phase {
            Phase::FadingOut { anim, step } if anim == id => {
                self.phase = Phase::Swapping { step };
                Some(step)
            }
            Phase::FadingIn { anim } if anim == id => {
                self.phase = Phase::Idle;
                self.start_next(animator);
                None
            }
            _ => None,
        }
    }

    /// Second half of the crossfade, once the new track is displayed.
    pub fn begin_fade_in<A: Animator>(&mut self, animator: &mut A) {
        if !matches!(self.phase, Phase::Swapping { .. }) {
            return;
        }
        let anim = animator.start_fade(Fade {
            from: OPA_TRANSP,
            to: OPA_COVER,
            duration_ms: self.fade_ms,
        });
        self.phase = Phase::FadingIn { anim };
    }

    /// Whether `id` belongs to the running crossfade.
    pub fn owns(&self, id: AnimationId) -> bool {
        match self.phase {
            Phase::FadingOut { anim, .. } | Phase::FadingIn { anim } => anim == id,
            _ => false,
        }
    }

    fn start_next<A: Animator>(&mut self, animator: &mut A) {
        if self.phase != Phase::Idle || self.pending_steps == 0 {
            return;
        }

        let step = if self.pending_steps > 0 {
            self.pending_steps -= 1;
            StepDirection::Next
        } else {
            self.pending_steps += 1;
            StepDirection::Previous
        };

        let anim = animator.start_fade(Fade {
            from: OPA_COVER,
            to: OPA_TRANSP,
            duration_ms: self.fade_ms,
        });
        self.phase = Phase::FadingOut { anim, step };
    }
}

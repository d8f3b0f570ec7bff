//! Narrow collaborator interfaces onto the graphics toolkit and its timers.
//!
//! Callbacks do not exist at this level: the event pump reports animation
//! frames, animation completion, and timer ticks back to the panel by id.

/// Handle of a running animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnimationId(pub u32);

/// Handle of a periodic timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerId(pub u32);

/// A linear opacity animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Fade {
    pub from: u8,
    pub to: u8,
    pub duration_ms: u32,
}

impl Fade {
    /// Linear interpolation at `elapsed_ms` into the fade, clamped to `to`.
    pub fn value_at(&self, elapsed_ms: u32) -> u8 {
        if self.duration_ms == 0 || elapsed_ms >= self.duration_ms {
            return self.to;
        }
        let from = i64::from(self.from);
        let to = i64::from(self.to);
        let v = from + (to - from) * i64::from(elapsed_ms) / i64::from(self.duration_ms);
        v as u8
    }
}

/// Starts timed animations. Completion is reported back with the returned id.
pub trait Animator {
    fn start_fade(&mut self, fade: Fade) -> AnimationId;
}

/// Periodic timers.
pub trait Scheduler {
    fn schedule_periodic(&mut self, period_ms: u32) -> TimerId;
    fn cancel(&mut self, timer: TimerId);
}

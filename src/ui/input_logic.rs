//! Mapping raw gesture directions onto panel actions.

use crate::control::StepDirection;

/// Gesture direction as reported by the touch controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GestureDir {
    Left,
    Right,
    Top,
    Bottom,
}

/// Horizontal swipes skip tracks: left = next, right = previous.
pub fn swipe_step(dir: GestureDir) -> Option<StepDirection> {
    match dir {
        GestureDir::Left => Some(StepDirection::Next),
        GestureDir::Right => Some(StepDirection::Previous),
        GestureDir::Top | GestureDir::Bottom => None,
    }
}

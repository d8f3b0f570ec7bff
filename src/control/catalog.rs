//! Track catalog and wraparound index arithmetic.

/// A track on the panel. Immutable; the catalog is a fixed slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Track {
    pub title: &'static str,
    pub artist: &'static str,
    /// Always > 0.
    pub duration_secs: u16,
}

impl Track {
    pub const fn new(title: &'static str, artist: &'static str, duration_secs: u16) -> Self {
        Self {
            title,
            artist,
            duration_secs,
        }
    }
}

/// Built-in catalog shown by the firmware.
pub const DEMO_CATALOG: [Track; 5] = [
    Track::new("Track One", "Echo Harbor", 173),
    Track::new("Track Two", "Echo Harbor", 149),
    Track::new("Track Three", "Echo Harbor", 132),
    Track::new("Track Four", "Echo Harbor", 164),
    Track::new("Track Five", "Echo Harbor", 121),
];

/// Signed direction of one navigation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepDirection {
    Previous,
    Next,
}

impl StepDirection {
    pub const fn signum(self) -> i32 {
        match self {
            StepDirection::Previous => -1,
            StepDirection::Next => 1,
        }
    }
}

/// Move `index` one step in `direction`, wrapping at both ends of a
/// catalog of `len` entries.
pub fn wrap_step(index: usize, direction: StepDirection, len: usize) -> usize {
    debug_assert!(len > 0, "empty catalog");
    debug_assert!(index < len, "index {} out of range {}", index, len);
    match direction {
        StepDirection::Next => (index + 1) % len,
        StepDirection::Previous => {
            if index == 0 {
                len - 1
            } else {
                index - 1
            }
        }
    }
}

/// Index reached from `start` after a net signed number of steps.
pub fn wrap_offset(start: usize, steps: i64, len: usize) -> usize {
    debug_assert!(len > 0, "empty catalog");
    let len = len as i64;
    (start as i64 + steps).rem_euclid(len) as usize
}

//! Volume hold decoder - long press, then drag vertically for volume steps.
//!
//! Drag distance is quantized: every `step_px` of travel past the reference
//! line yields one command, and the reference moves by exactly one step
//! toward the pointer so sub-step motion carries over. Commands are also
//! spaced by at least `min_interval_ms`; a crossing that arrives too early
//! leaves the reference where it is and is retried on the next update.

/// Direction of one volume notch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VolumeStep {
    Up,
    Down,
}

impl VolumeStep {
    /// Glyph shown in the overlay after a step.
    pub const fn symbol(self) -> char {
        match self {
            VolumeStep::Up => '+',
            VolumeStep::Down => '-',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HoldState {
    Idle,
    /// Long press accepted, no step emitted yet.
    Armed,
    /// At least one step emitted during this hold.
    Dragging,
}

#[derive(Debug)]
pub struct VolumeHoldDecoder {
    state: HoldState,
    reference_y: i32,
    last_command_ms: Option<u64>,
    arm_at_ms: u64,
    step_px: i32,
    min_interval_ms: u64,
}

impl VolumeHoldDecoder {
    pub fn new(step_px: i32, min_interval_ms: u64) -> Self {
        Self {
            state: HoldState::Idle,
            reference_y: 0,
            last_command_ms: None,
            arm_at_ms: 0,
            step_px: step_px.max(1),
            min_interval_ms,
        }
    }

    /// Screen entry: clear the session and hold off arming until `arm_at_ms`.
    pub fn reset(&mut self, arm_at_ms: u64) {
        self.state = HoldState::Idle;
        self.reference_y = 0;
        self.last_command_ms = None;
        self.arm_at_ms = arm_at_ms;
    }

    pub fn state(&self) -> HoldState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != HoldState::Idle
    }

    pub fn reference_y(&self) -> i32 {
        self.reference_y
    }

    /// Long press at pointer height `y`. Returns true when the hold armed.
    pub fn on_long_press(&mut self, y: i32, now_ms: u64) -> bool {
        if now_ms < self.arm_at_ms {
            debug!("volume: long press ignored, arms at {}", self.arm_at_ms);
            return false;
        }
        self.state = HoldState::Armed;
        self.reference_y = y;
        true
    }

    /// Pointer moved to `y` while held.
    ///
    /// `emit` is called once per threshold crossing that is due; it returns
    /// whether the command was handed off. A refused command leaves the
    /// reference in place so the crossing is retried. Returns the number of
    /// commands emitted.
    pub fn on_drag<F>(&mut self, y: i32, now_ms: u64, mut emit: F) -> u32
    where
        F: FnMut(VolumeStep) -> bool,
    {
        if !self.is_active() {
            return 0;
        }

        let mut emitted = 0;
        loop {
            let dy = y - self.reference_y;
            let step = if dy <= -self.step_px {
                VolumeStep::Up
            } else if dy >= self.step_px {
                VolumeStep::Down
            } else {
                break;
            };

            if !self.interval_elapsed(now_ms) {
                break;
            }
            if !emit(step) {
                break;
            }

            self.last_command_ms = Some(now_ms);
            self.reference_y += match step {
                VolumeStep::Up => -self.step_px,
                VolumeStep::Down => self.step_px,
            };
            self.state = HoldState::Dragging;
            emitted += 1;
        }
        emitted
    }

    /// Pointer released. Returns true if a hold was active.
    pub fn on_release(&mut self) -> bool {
        let was_active = self.is_active();
        self.state = HoldState::Idle;
        was_active
    }

    /// Press reported lost. Ignored while the pointer still reads pressed.
    pub fn on_press_lost(&mut self, still_pressed: bool) -> bool {
        if still_pressed {
            return false;
        }
        self.on_release()
    }

    fn interval_elapsed(&self, now_ms: u64) -> bool {
        match self.last_command_ms {
            Some(last) => now_ms.saturating_sub(last) >= self.min_interval_ms,
            None => true,
        }
    }
}

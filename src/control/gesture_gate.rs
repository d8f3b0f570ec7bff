//! Rate limiter for discrete swipe actions.

/// Accepts a new action only once `min_interval_ms` has passed since the
/// last accepted one. Rejected attempts do not move the window.
#[derive(Clone, Copy, Debug)]
pub struct GestureGate {
    min_interval_ms: u64,
    last_action_ms: Option<u64>,
}

impl GestureGate {
    pub const fn new(min_interval_ms: u64) -> Self {
        Self {
            min_interval_ms,
            last_action_ms: None,
        }
    }

    /// Forget the last action (screen re-entry).
    pub fn reset(&mut self) {
        self.last_action_ms = None;
    }

    pub fn try_accept(&mut self, now_ms: u64) -> bool {
        if let Some(last) = self.last_action_ms {
            if now_ms.saturating_sub(last) < self.min_interval_ms {
                return false;
            }
        }
        self.last_action_ms = Some(now_ms);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_action_is_accepted() {
        let mut gate = GestureGate::new(350);
        assert!(gate.try_accept(0));
    }

    #[test]
    fn action_inside_window_is_rejected() {
        let mut gate = GestureGate::new(350);
        assert!(gate.try_accept(1_000));
        assert!(!gate.try_accept(1_349));
        assert!(gate.try_accept(1_350));
    }

    #[test]
    fn rejected_action_does_not_extend_window() {
        let mut gate = GestureGate::new(350);
        assert!(gate.try_accept(1_000));
        assert!(!gate.try_accept(1_200));
        assert!(!gate.try_accept(1_300));
        // Measured from 1_000, not from the rejected attempts.
        assert!(gate.try_accept(1_360));
    }

    #[test]
    fn reset_reopens_gate() {
        let mut gate = GestureGate::new(350);
        assert!(gate.try_accept(500));
        gate.reset();
        assert!(gate.try_accept(510));
    }
}

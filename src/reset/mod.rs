//! Two-press reset confirmation
//!
//! States:
//! - idle -> armed: first press, deadline = now + window
//! - armed -> idle: second press at or before the deadline (confirmed)
//! - armed -> armed: press after the deadline re-arms with a fresh deadline
//!
//! Expiry is a deadline comparison, so an old deadline can never disarm a
//! newer arm.

use chrono::{DateTime, Duration, Utc};

/// Default confirmation window in seconds
pub const DEFAULT_CONFIRM_SECS: u64 = 3;

/// Longest window accepted from configuration
pub const MAX_CONFIRM_SECS: u64 = 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmState {
    Idle,
    Armed { deadline: DateTime<Utc> },
}

/// Result of a press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// Waiting for a second press until the deadline
    Armed { deadline: DateTime<Utc> },
    /// Second press landed inside the window
    Confirmed,
}

#[derive(Debug, Clone)]
pub struct ResetConfirmation {
    state: ConfirmState,
    window: Duration,
}

impl Default for ResetConfirmation {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_CONFIRM_SECS as i64))
    }
}

impl ResetConfirmation {
    pub fn new(window: Duration) -> Self {
        Self {
            state: ConfirmState::Idle,
            window,
        }
    }

    pub fn from_secs(secs: u64) -> Self {
        Self::new(Duration::seconds(secs.min(MAX_CONFIRM_SECS) as i64))
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn press(&mut self, now: DateTime<Utc>) -> PressOutcome {
        match self.state {
            ConfirmState::Armed { deadline } if now <= deadline => {
                self.state = ConfirmState::Idle;
                PressOutcome::Confirmed
            }
            _ => {
                let deadline = now + self.window;
                self.state = ConfirmState::Armed { deadline };
                PressOutcome::Armed { deadline }
            }
        }
    }

    /// Whether a press at `now` would confirm
    pub fn is_armed(&self, now: DateTime<Utc>) -> bool {
        matches!(self.state, ConfirmState::Armed { deadline } if now <= deadline)
    }

    /// Drop back to idle if the deadline has passed
    pub fn expire(&mut self, now: DateTime<Utc>) {
        if let ConfirmState::Armed { deadline } = self.state {
            if now > deadline {
                self.state = ConfirmState::Idle;
            }
        }
    }

    pub fn cancel(&mut self) {
        self.state = ConfirmState::Idle;
    }

    pub fn state(&self) -> ConfirmState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 7, 0, 0).unwrap()
    }

    #[test]
    fn test_first_press_arms() {
        let mut confirm = ResetConfirmation::default();
        let outcome = confirm.press(t0());
        assert_eq!(
            outcome,
            PressOutcome::Armed {
                deadline: t0() + Duration::seconds(3)
            }
        );
        assert!(confirm.is_armed(t0()));
    }

    #[test]
    fn test_second_press_within_window_confirms() {
        let mut confirm = ResetConfirmation::default();
        confirm.press(t0());
        let outcome = confirm.press(t0() + Duration::milliseconds(2500));
        assert_eq!(outcome, PressOutcome::Confirmed);
        assert_eq!(confirm.state(), ConfirmState::Idle);
    }

    #[test]
    fn test_press_at_deadline_confirms() {
        let mut confirm = ResetConfirmation::default();
        confirm.press(t0());
        assert_eq!(confirm.press(t0() + Duration::seconds(3)), PressOutcome::Confirmed);
    }

    #[test]
    fn test_late_press_rearms() {
        let mut confirm = ResetConfirmation::default();
        confirm.press(t0());
        let late = t0() + Duration::milliseconds(3001);
        assert!(!confirm.is_armed(late));

        let outcome = confirm.press(late);
        assert_eq!(
            outcome,
            PressOutcome::Armed {
                deadline: late + Duration::seconds(3)
            }
        );
        // The fresh deadline governs, not the old one
        assert_eq!(
            confirm.press(late + Duration::seconds(2)),
            PressOutcome::Confirmed
        );
    }

    #[test]
    fn test_expire_and_cancel() {
        let mut confirm = ResetConfirmation::from_secs(5);
        confirm.press(t0());
        confirm.expire(t0() + Duration::seconds(4));
        assert!(confirm.is_armed(t0() + Duration::seconds(4)));
        confirm.expire(t0() + Duration::seconds(6));
        assert_eq!(confirm.state(), ConfirmState::Idle);

        confirm.press(t0());
        confirm.cancel();
        assert!(!confirm.is_armed(t0()));
    }
}

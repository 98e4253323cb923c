//! Transient, single-slot notifications.
//!
//! At most one notice is visible at a time. Showing a new notice replaces the current one and
//! resets the single dismissal deadline, so an older notice can never hide a newer one early.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Display durations for completion notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoticeDurations {
    /// How long success notices stay visible, in milliseconds.
    pub success_ms: u64,
    /// How long failure notices stay visible, in milliseconds.
    pub failure_ms: u64,
}

impl Default for NoticeDurations {
    fn default() -> Self {
        Self {
            success_ms: 3000,
            failure_ms: 5000,
        }
    }
}

impl NoticeDurations {
    /// Success duration.
    pub fn success(&self) -> Duration {
        Duration::from_millis(self.success_ms)
    }

    /// Failure duration.
    pub fn failure(&self) -> Duration {
        Duration::from_millis(self.failure_ms)
    }
}

/// A notice and its dismissal deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// The message shown to the user.
    pub message: String,
    /// The instant at which the notice is dismissed.
    pub expires_at: Instant,
}

/// Single-slot notice holder with one dismissal timer.
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    current: Option<Notice>,
}

impl NoticeBoard {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `message` for `duration` starting at `now`, replacing any visible notice.
    pub fn show(&mut self, message: impl Into<String>, duration: Duration, now: Instant) {
        self.current = Some(Notice {
            message: message.into(),
            expires_at: now + duration,
        });
    }

    /// The visible message at `now`, if any.
    pub fn current(&self, now: Instant) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|notice| now < notice.expires_at)
            .map(|notice| notice.message.as_str())
    }

    /// The last notice shown, regardless of expiry.
    pub fn last(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    /// Dismiss the visible notice immediately.
    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_expires() {
        let t0 = Instant::now();
        let mut board = NoticeBoard::new();
        board.show("done", Duration::from_millis(3000), t0);

        assert_eq!(board.current(t0), Some("done"));
        assert_eq!(board.current(t0 + Duration::from_millis(2999)), Some("done"));
        assert_eq!(board.current(t0 + Duration::from_millis(3000)), None);
    }

    #[test]
    fn test_newest_notice_resets_deadline() {
        let t0 = Instant::now();
        let mut board = NoticeBoard::new();
        board.show("first", Duration::from_millis(3000), t0);
        board.show("second", Duration::from_millis(3000), t0 + Duration::from_millis(2000));

        // The first notice's deadline no longer applies.
        assert_eq!(
            board.current(t0 + Duration::from_millis(4000)),
            Some("second")
        );
        assert_eq!(board.current(t0 + Duration::from_millis(5000)), None);
    }

    #[test]
    fn test_dismiss() {
        let t0 = Instant::now();
        let mut board = NoticeBoard::new();
        board.show("x", Duration::from_secs(1), t0);
        board.dismiss();
        assert_eq!(board.current(t0), None);
        assert!(board.last().is_none());
    }
}

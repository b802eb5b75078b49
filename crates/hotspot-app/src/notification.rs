//! Transient on-screen notifications with a timed fade
//!
//! A notification is fully opaque for `hold`, then fades linearly to zero
//! over `fade`, after which it is gone. It can also be dismissed early.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    shown_at: Instant,
}

impl Notification {
    /// Opacity in [0, 1] after `elapsed`
    pub fn opacity_after(elapsed: Duration, hold: Duration, fade: Duration) -> f64 {
        if elapsed <= hold {
            return 1.0;
        }
        if fade.is_zero() {
            return 0.0;
        }
        let fading = (elapsed - hold).as_secs_f64() / fade.as_secs_f64();
        (1.0 - fading).clamp(0.0, 1.0)
    }
}

/// Holds at most one notification at a time
#[derive(Debug, Clone)]
pub struct Notifier {
    hold: Duration,
    fade: Duration,
    current: Option<Notification>,
}

impl Notifier {
    pub fn new(hold: Duration, fade: Duration) -> Self {
        Self { hold, fade, current: None }
    }

    pub fn from_millis(hold_ms: u64, fade_ms: u64) -> Self {
        Self::new(Duration::from_millis(hold_ms), Duration::from_millis(fade_ms))
    }

    /// Show a notification, replacing any current one
    pub fn show(&mut self, kind: NotificationKind, message: impl Into<String>, now: Instant) {
        self.current = Some(Notification { kind, message: message.into(), shown_at: now });
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// The notification still on screen at `now`
    pub fn visible(&self, now: Instant) -> Option<&Notification> {
        self.current.as_ref().filter(|n| {
            now.saturating_duration_since(n.shown_at) < self.hold + self.fade
        })
    }

    pub fn opacity(&self, now: Instant) -> f64 {
        match self.visible(now) {
            Some(n) => Notification::opacity_after(
                now.saturating_duration_since(n.shown_at),
                self.hold,
                self.fade,
            ),
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hold_then_fade() {
        let mut notifier = Notifier::from_millis(2000, 500);
        let t0 = Instant::now();
        notifier.show(NotificationKind::Success, "Report submitted", t0);

        assert_eq!(notifier.opacity(t0), 1.0);
        assert_eq!(notifier.opacity(t0 + Duration::from_millis(2000)), 1.0);
        let mid = notifier.opacity(t0 + Duration::from_millis(2250));
        assert!((mid - 0.5).abs() < 1e-9);
        assert!(notifier.visible(t0 + Duration::from_millis(2499)).is_some());
        assert!(notifier.visible(t0 + Duration::from_millis(2500)).is_none());
        assert_eq!(notifier.opacity(t0 + Duration::from_secs(10)), 0.0);
    }

    #[test]
    fn test_dismiss_and_replace() {
        let mut notifier = Notifier::from_millis(2000, 500);
        let t0 = Instant::now();
        notifier.show(NotificationKind::Success, "first", t0);
        notifier.show(NotificationKind::Failure, "second", t0);
        assert_eq!(notifier.visible(t0).unwrap().message, "second");

        notifier.dismiss();
        assert!(notifier.visible(t0).is_none());
    }
}

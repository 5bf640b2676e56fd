use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// How long a notification stays on screen.
pub const NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(3);

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Failure,
}

/// A transient toast. Each one gets its own id, so a timer only dismisses
/// the notification it was started for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    id: u64,
    kind: NotificationKind,
    title: String,
    message: String,
}

impl Notification {
    #[must_use]
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, title.into(), message.into())
    }

    #[must_use]
    pub fn failure(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Failure, title.into(), message.into())
    }

    fn new(kind: NotificationKind, title: String, message: String) -> Self {
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            kind,
            title,
            message,
        }
    }

    #[must_use]
    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn class_name(&self) -> &'static str {
        match self.kind {
            NotificationKind::Success => "toast toast--success",
            NotificationKind::Failure => "toast toast--error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_texts_are_distinct_notifications() {
        let first = Notification::failure("Oops", "Try again");
        let second = Notification::failure("Oops", "Try again");
        assert_ne!(first, second);
        assert_eq!(first.kind(), NotificationKind::Failure);
        assert_eq!(first.class_name(), "toast toast--error");
    }

    #[test]
    fn success_carries_its_text() {
        let note = Notification::success("Session started", "Studying Rust");
        assert_eq!(note.kind(), NotificationKind::Success);
        assert_eq!(note.title(), "Session started");
        assert_eq!(note.message(), "Studying Rust");
    }
}

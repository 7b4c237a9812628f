use std::sync::Mutex;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A user-facing toast.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// Cross-cutting sink for user-facing outcomes of dashboard actions.
///
/// Use cases report through this instead of printing, so the CLI, tests
/// and any other front-end decide how a toast is shown.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);

    fn error(&self, message: &str);
}

/// Discards all notifications.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn success(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

/// Forwards notifications to the `log` crate and keeps a history.
#[derive(Default)]
pub struct LogNotifier {
    history: Mutex<Vec<Notification>>,
}

impl LogNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything notified so far, oldest first.
    pub fn history(&self) -> Vec<Notification> {
        self.history
            .lock()
            .map(|h| h.clone())
            .unwrap_or_default()
    }

    fn record(&self, level: NotificationLevel, message: &str) {
        if let Ok(mut history) = self.history.lock() {
            history.push(Notification {
                level,
                message: message.to_string(),
            });
        }
    }
}

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        log::info!("{message}");
        self.record(NotificationLevel::Success, message);
    }

    fn error(&self, message: &str) {
        log::error!("{message}");
        self.record(NotificationLevel::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_notifier_is_noop() {
        let n = NullNotifier;
        n.success("ok");
        n.error("bad");
    }

    #[test]
    fn test_log_notifier_records_in_order() {
        let n = LogNotifier::new();
        n.success("Recognized 3 face(s)");
        n.error("Failed to mark attendance. Please try again.");

        let history = n.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].level, NotificationLevel::Success);
        assert_eq!(history[0].message, "Recognized 3 face(s)");
        assert_eq!(history[1].level, NotificationLevel::Error);
    }

    #[test]
    fn test_log_notifier_starts_empty() {
        assert!(LogNotifier::new().history().is_empty());
    }
}

//! Driven port for user-facing notifications.
//!
//! The host shows these as toasts; error-level notices also trigger a haptic
//! cue on devices that support it.

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationLevel {
    /// Neutral information.
    Info,
    /// An action completed.
    Success,
    /// Something needs attention.
    Warning,
    /// An action failed.
    Error,
}

/// Delivers short messages to the person using the app.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Show `message` at the given severity.
    fn notify(&self, level: NotificationLevel, message: &str);
}

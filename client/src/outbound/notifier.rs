//! Notifier that records notices as tracing events.
//!
//! Hosts without a toast surface (the CLI, tests, batch jobs) still get every
//! notice in the log stream at a matching level.

use tracing::{error, info, warn};

use crate::domain::ports::{NotificationLevel, Notifier};

/// Writes each notification as a log record.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, level: NotificationLevel, message: &str) {
        match level {
            NotificationLevel::Info => info!(target: "vstrecha::notice", %message),
            NotificationLevel::Success => info!(target: "vstrecha::notice", outcome = "success", %message),
            NotificationLevel::Warning => warn!(target: "vstrecha::notice", %message),
            NotificationLevel::Error => error!(target: "vstrecha::notice", %message),
        }
    }
}

//! Whether the viewer may register for an event right now.
//!
//! Pure function of the event and the current time; callers pick the clock.

use chrono::{DateTime, Utc};
use mockable::Clock;

use super::event::Event;

/// Registration state of an event at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStatus {
    /// Registration is possible.
    Open,
    /// Registration has not opened yet.
    NotYet {
        /// When registration opens.
        opens_at: DateTime<Utc>,
    },
    /// The registration window has passed.
    Closed,
    /// The participant cap is reached.
    Full,
}

impl RegistrationStatus {
    /// Whether the viewer may register.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Evaluate the registration window and capacity of `event` at `now`.
///
/// Checks run in order: opening time, closing time, capacity. A cap of zero
/// counts as no cap.
///
/// # Examples
/// ```rust,ignore
/// match registration_status(&extended.event, Utc::now()) {
///     RegistrationStatus::NotYet { opens_at } => println!("opens {opens_at}"),
///     status => assert!(status.is_open() || !extended.event.is_registration_available),
/// }
/// ```
#[must_use]
pub fn registration_status(event: &Event, now: DateTime<Utc>) -> RegistrationStatus {
    if let Some(opens_at) = event.registration_start {
        if now < opens_at {
            return RegistrationStatus::NotYet { opens_at };
        }
    }
    if let Some(closes_at) = event.registration_end {
        if now > closes_at {
            return RegistrationStatus::Closed;
        }
    }
    match event.max_participants {
        Some(cap) if cap > 0 && event.participants >= cap => RegistrationStatus::Full,
        _ => RegistrationStatus::Open,
    }
}

/// [`registration_status`] at the clock's current time.
#[must_use]
pub fn registration_status_now<C>(event: &Event, clock: &C) -> RegistrationStatus
where
    C: Clock + ?Sized,
{
    registration_status(event, clock.utc())
}

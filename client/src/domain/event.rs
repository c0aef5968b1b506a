//! Events, the viewer's relation to them, and list filters.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use pagination::{Cursor, Page, PageItem, PageRequest};
use serde::{Deserialize, Serialize};

use super::profile::ProfileId;
use super::validation::{self, Issues};

/// Longest accepted event title, in characters.
pub const TITLE_MAX_CHARS: usize = 200;

/// Server-assigned event identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Wrap a raw identifier.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Cursor> for EventId {
    fn from(cursor: Cursor) -> Self {
        Self(cursor.into_inner())
    }
}

/// Who may discover an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    /// Listed for everyone.
    #[default]
    #[serde(rename = "G")]
    Public,
    /// Listed only for invited viewers.
    #[serde(rename = "P")]
    Private,
}

impl Visibility {
    /// Wire code used in payloads and query strings.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Public => "G",
            Self::Private => "P",
        }
    }
}

/// Whether an event happens once or recurs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Repeatability {
    /// Happens once.
    #[default]
    #[serde(rename = "N")]
    OneOff,
    /// Recurs on a schedule.
    #[serde(rename = "R")]
    Repeating,
}

impl Repeatability {
    /// Wire code used in payloads and query strings.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::OneOff => "N",
            Self::Repeating => "R",
        }
    }
}

/// Lifecycle state of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventStatus {
    /// Still upcoming or running.
    #[serde(rename = "A")]
    Active,
    /// Over.
    #[serde(rename = "E")]
    Ended,
}

/// The viewer's relationship to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Participation {
    /// The viewer created the event.
    #[serde(rename = "C")]
    Creator,
    /// The viewer registered for the event.
    #[serde(rename = "P")]
    Participant,
    /// The viewer only looks at the event.
    #[serde(rename = "V")]
    Viewer,
}

/// Time slice of the viewer's own events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventPeriod {
    /// Past and upcoming events.
    All,
    /// Events that already ended.
    Past,
    /// Events that are upcoming or running.
    Actual,
}

impl EventPeriod {
    /// Query-string value understood by the server.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Past => "past",
            Self::Actual => "actual",
        }
    }
}

/// A published event.
///
/// ## Invariants
/// - `start_date <= end_date`.
/// - `title` is non-empty and at most [`TITLE_MAX_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Server-assigned identifier.
    pub id: EventId,
    /// Headline.
    pub title: String,
    /// Free-text description.
    pub body: String,
    /// Identifier of the uploaded cover image.
    pub photo: Option<String>,
    /// Public URL of the cover image.
    pub photo_url: Option<String>,
    /// Free-text venue.
    pub place: Option<String>,
    /// Topic tags.
    pub tags: BTreeSet<String>,
    /// First day of the event.
    pub start_date: NaiveDate,
    /// Last day of the event.
    pub end_date: NaiveDate,
    /// Registered participant count.
    pub participants: u32,
    /// Participant cap, if any.
    pub max_participants: Option<u32>,
    /// Profile that created the event.
    pub creator: ProfileId,
    /// Who may discover the event.
    pub visibility: Visibility,
    /// Whether the event recurs.
    pub repeatability: Repeatability,
    /// Lifecycle state.
    pub status: EventStatus,
    /// When registration opens.
    pub registration_start: Option<DateTime<Utc>>,
    /// When registration closes.
    pub registration_end: Option<DateTime<Utc>>,
    /// Server's verdict on whether registration is possible right now.
    pub is_registration_available: bool,
    /// Chat link shown to participants as a QR code.
    pub telegram_chat_link: Option<String>,
}

/// An event together with the viewer-relative context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedEvent {
    /// The event itself.
    pub event: Event,
    /// Number of the viewer's friends attending.
    pub friends_going: u32,
    /// The viewer's relationship to the event.
    pub participation: Participation,
    /// The viewer's ticket identifier when registered.
    pub participation_id: Option<String>,
}

impl PageItem for ExtendedEvent {
    fn cursor(&self) -> Cursor {
        Cursor::new(self.event.id.as_str())
    }
}

/// One page of events with viewer context.
pub type EventPage = Page<ExtendedEvent>;

/// Server-side filter for event lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Only events carrying any of these tags; empty means no tag filter.
    pub tags: BTreeSet<String>,
    /// Only events with this visibility.
    pub visibility: Option<Visibility>,
    /// Only events with this repeatability.
    pub repeatability: Option<Repeatability>,
    /// Time slice; honoured by the viewer's own event list only.
    pub period: Option<EventPeriod>,
}

impl EventFilter {
    /// Filter on a set of tags.
    ///
    /// # Examples
    /// ```
    /// use vstrecha_client::domain::EventFilter;
    ///
    /// let filter = EventFilter::with_tags(["Sport", "Music"]);
    /// assert_eq!(filter.tags.len(), 2);
    /// ```
    pub fn with_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// Page request for event lists.
pub type EventQuery = PageRequest<EventFilter>;

/// Payload for creating or editing an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDraft {
    /// Headline.
    pub title: String,
    /// Free-text description.
    pub body: String,
    /// Identifier of an uploaded cover image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    /// Topic tags.
    pub tags: BTreeSet<String>,
    /// Free-text venue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    /// First day of the event.
    pub start_date: NaiveDate,
    /// Last day of the event.
    pub end_date: NaiveDate,
    /// Participant cap.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
    /// Who may discover the event.
    #[serde(rename = "visability")]
    pub visibility: Visibility,
    /// Whether the event recurs.
    pub repeatability: Repeatability,
    /// When registration opens.
    #[serde(
        rename = "registration_start_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub registration_start: Option<DateTime<Utc>>,
    /// When registration closes.
    #[serde(
        rename = "registration_end_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub registration_end: Option<DateTime<Utc>>,
    /// Chat link shown to participants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram_chat_link: Option<String>,
}

impl EventDraft {
    /// Start a one-off public draft spanning the given days.
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            photo: None,
            tags: BTreeSet::new(),
            place: None,
            start_date,
            end_date,
            max_participants: None,
            visibility: Visibility::Public,
            repeatability: Repeatability::OneOff,
            registration_start: None,
            registration_end: None,
            telegram_chat_link: None,
        }
    }

    /// Check the draft against the rules applied to published events.
    ///
    /// # Errors
    ///
    /// Returns every failed rule, in field order.
    pub fn validate(&self) -> Result<(), Issues> {
        let mut issues = Issues::new();
        check_text(&mut issues, "", &self.title, &self.body);
        check_date_range(&mut issues, "", self.start_date, self.end_date);
        issues.finish(())
    }
}

/// Outcome of checking a participant in by their ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketScan {
    /// Participant whose ticket was scanned.
    pub user_id: ProfileId,
    /// Event the ticket belongs to.
    pub event_id: EventId,
}

/// Title and body rules.
pub(crate) fn check_text(issues: &mut Issues, path: &str, title: &str, body: &str) {
    validation::non_empty(
        issues,
        validation::field(path, "title"),
        title,
        "title must not be empty",
    );
    validation::max_chars(
        issues,
        validation::field(path, "title"),
        title,
        TITLE_MAX_CHARS,
        "title must not exceed 200 characters",
    );
    validation::non_empty(
        issues,
        validation::field(path, "body"),
        body,
        "description must not be empty",
    );
}

/// The event must not end before it starts.
pub(crate) fn check_date_range(issues: &mut Issues, path: &str, start: NaiveDate, end: NaiveDate) {
    if end < start {
        issues.push(
            validation::field(path, "end_date"),
            "end date must not precede start date",
        );
    }
}

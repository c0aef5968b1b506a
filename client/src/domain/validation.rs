//! Shape and rule checks shared by response parsing and outgoing drafts.
//!
//! Validation walks a whole value and records every problem as an [`Issue`]
//! before giving up, so diagnostics show the complete picture while callers
//! only surface the first message.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// One failed check, located by a dotted field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Field path such as `events[2].event.title`.
    pub path: String,
    /// Human-readable description of the failed rule.
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Ordered collection of validation issues.
///
/// # Examples
/// ```
/// use vstrecha_client::domain::validation::Issues;
///
/// let mut issues = Issues::new();
/// issues.push("title", "title must not be empty");
/// assert_eq!(issues.first_message(), Some("title must not be empty"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Issues(Vec<Issue>);

impl Issues {
    /// Start an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failed check.
    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.push(Issue {
            path: path.into(),
            message: message.into(),
        });
    }

    /// Append every issue from `other`.
    pub fn extend(&mut self, other: Issues) {
        self.0.extend(other.0);
    }

    /// Whether no check has failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of recorded issues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Earliest recorded issue.
    #[must_use]
    pub fn first(&self) -> Option<&Issue> {
        self.0.first()
    }

    /// Message of the earliest recorded issue.
    #[must_use]
    pub fn first_message(&self) -> Option<&str> {
        self.first().map(|issue| issue.message.as_str())
    }

    /// Iterate over recorded issues in order.
    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.0.iter()
    }

    /// Return `value` when nothing failed, otherwise the issues themselves.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one issue was recorded.
    pub fn finish<T>(self, value: T) -> Result<T, Issues> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for Issues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&rendered)
    }
}

/// Join a parent path and a field name.
pub(crate) fn field(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_owned()
    } else {
        format!("{parent}.{name}")
    }
}

/// Join a parent path and a sequence index.
pub(crate) fn index(parent: &str, position: usize) -> String {
    format!("{parent}[{position}]")
}

/// Require a value with visible content.
pub(crate) fn non_empty(issues: &mut Issues, path: String, value: &str, message: &str) {
    if value.trim().is_empty() {
        issues.push(path, message);
    }
}

/// Cap a value's length in characters.
pub(crate) fn max_chars(issues: &mut Issues, path: String, value: &str, max: usize, message: &str) {
    if value.chars().count() > max {
        issues.push(path, message);
    }
}

/// Parse a calendar date written as `YYYY-MM-DD`.
pub(crate) fn iso_date(issues: &mut Issues, path: String, raw: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            issues.push(path, "date must be in YYYY-MM-DD format");
            None
        }
    }
}

/// Parse a timestamp; offset-less values are read as UTC.
pub(crate) fn timestamp(issues: &mut Issues, path: String, raw: &str) -> Option<DateTime<Utc>> {
    let parsed = parse_timestamp(raw);
    if parsed.is_none() {
        issues.push(path, "date and time must be valid");
    }
    parsed
}

/// Parse RFC 3339 or naive ISO date-times, treating naive values as UTC.
///
/// # Examples
/// ```
/// use vstrecha_client::domain::validation::parse_timestamp;
///
/// assert!(parse_timestamp("2025-10-01T18:00:00+03:00").is_some());
/// assert!(parse_timestamp("2025-10-01T18:00").is_some());
/// assert!(parse_timestamp("tomorrow").is_none());
/// ```
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"]
        .into_iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// Serde helpers that coalesce `null` the same way for every optional field.
///
/// Pair each helper with `#[serde(default)]` so an absent key behaves like an
/// explicit `null`.
pub mod nullable {
    use serde::{Deserialize, Deserializer};

    /// Absent or `null` becomes `None`; anything else must decode as `T`.
    ///
    /// # Errors
    ///
    /// Propagates the decode error of `T` for non-null values.
    pub fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(deserializer)
    }

    /// Absent or `null` becomes `T::default()`.
    ///
    /// # Errors
    ///
    /// Propagates the decode error of `T` for non-null values.
    pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}

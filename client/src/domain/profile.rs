//! Member profiles and the payloads that create or change them.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::friends::InvitationToken;
use super::validation::{self, Issues};

/// Latest birth date admitted; members must be at least seventeen.
pub const LATEST_BIRTH_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2008, 9, 1) {
    Some(date) => date,
    None => NaiveDate::MIN,
};

/// Server-assigned profile identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(String);

impl ProfileId {
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

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gender as stored on a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Wire code `M`.
    #[serde(rename = "M")]
    Male,
    /// Wire code `F`.
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    /// Parse a wire code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "M" => Some(Self::Male),
            "F" => Some(Self::Female),
            _ => None,
        }
    }
}

/// A member profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Server-assigned identifier.
    pub id: ProfileId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Gender.
    pub gender: Gender,
    /// Birth date; never later than [`LATEST_BIRTH_DATE`].
    pub birth_date: NaiveDate,
    /// University the member attends.
    pub university: String,
    /// Identifier of the uploaded avatar.
    pub avatar: Option<String>,
    /// Public URL of the avatar.
    pub avatar_url: Option<String>,
    /// Free-text biography.
    pub bio: Option<String>,
    /// Messenger user identifier.
    pub max_id: Option<i64>,
    /// Profile whose invitation brought this member in.
    pub invited_by: Option<ProfileId>,
    /// Whether the member administers the service.
    pub is_superuser: bool,
}

impl Profile {
    /// Name as shown in lists.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Payload for registering the viewer's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProfile {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Gender.
    pub gender: Gender,
    /// Birth date.
    pub birth_date: NaiveDate,
    /// Identifier of an uploaded avatar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// University the member attends.
    pub university: String,
    /// Free-text biography.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Invitation that brought the member in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invitation: Option<InvitationToken>,
}

impl NewProfile {
    /// Check the payload against the rules applied to stored profiles.
    ///
    /// # Errors
    ///
    /// Returns every failed rule, in field order.
    pub fn validate(&self) -> Result<(), Issues> {
        let mut issues = Issues::new();
        check_names(&mut issues, "", &self.first_name, &self.last_name);
        check_university(&mut issues, "", &self.university);
        check_birth_date(&mut issues, "", self.birth_date);
        issues.finish(())
    }
}

/// Partial update of the viewer's profile; absent fields stay unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfilePatch {
    /// New given name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// New family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// New gender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// New birth date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    /// New avatar file identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// New university.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
    /// New biography.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl ProfilePatch {
    /// Check the fields that are present.
    ///
    /// # Errors
    ///
    /// Returns every failed rule, in field order.
    pub fn validate(&self) -> Result<(), Issues> {
        let mut issues = Issues::new();
        if let Some(first_name) = &self.first_name {
            validation::non_empty(
                &mut issues,
                "first_name".to_owned(),
                first_name,
                "first name must not be empty",
            );
        }
        if let Some(last_name) = &self.last_name {
            validation::non_empty(
                &mut issues,
                "last_name".to_owned(),
                last_name,
                "last name must not be empty",
            );
        }
        if let Some(birth_date) = self.birth_date {
            check_birth_date(&mut issues, "", birth_date);
        }
        if let Some(university) = &self.university {
            check_university(&mut issues, "", university);
        }
        issues.finish(())
    }
}

pub(crate) fn check_names(issues: &mut Issues, path: &str, first_name: &str, last_name: &str) {
    validation::non_empty(
        issues,
        validation::field(path, "first_name"),
        first_name,
        "first name must not be empty",
    );
    validation::non_empty(
        issues,
        validation::field(path, "last_name"),
        last_name,
        "last name must not be empty",
    );
}

pub(crate) fn check_university(issues: &mut Issues, path: &str, university: &str) {
    validation::non_empty(
        issues,
        validation::field(path, "university"),
        university,
        "university must not be empty",
    );
}

pub(crate) fn check_birth_date(issues: &mut Issues, path: &str, birth_date: NaiveDate) {
    if birth_date > LATEST_BIRTH_DATE {
        issues.push(
            validation::field(path, "birth_date"),
            "members must be at least 17 years old",
        );
    }
}

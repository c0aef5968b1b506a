//! Wire DTOs for the REST service.
//!
//! Optional fields accept both `null` and absence; everything else must be
//! present with the declared type. Rule checks run in [`IntoDomain`].

use std::collections::BTreeSet;

use pagination::Page;
use serde::Deserialize;
use serde_json::Value;

use super::schema::IntoDomain;
use crate::domain::event::{check_date_range, check_text};
use crate::domain::profile::{check_birth_date, check_names, check_university};
use crate::domain::validation::{self, Issues, nullable};
use crate::domain::{
    Event, EventId, EventPage, EventStatus, ExtendedEvent, Gender, InvitationToken,
    Participation, Profile, ProfileId, Repeatability, TicketScan, UploadedFile, Visibility,
};

#[derive(Debug, Deserialize)]
pub(super) struct EventDto {
    id: String,
    title: String,
    body: String,
    #[serde(default, deserialize_with = "nullable::optional")]
    photo: Option<String>,
    #[serde(default, deserialize_with = "nullable::optional")]
    photo_url: Option<String>,
    #[serde(default, deserialize_with = "nullable::optional")]
    place: Option<String>,
    tags: Vec<String>,
    start_date: String,
    end_date: String,
    participants: u32,
    #[serde(default, deserialize_with = "nullable::optional")]
    max_participants: Option<u32>,
    creator: String,
    #[serde(default, rename = "visability", deserialize_with = "nullable::or_default")]
    visibility: Visibility,
    #[serde(default, deserialize_with = "nullable::or_default")]
    repeatability: Repeatability,
    status: EventStatus,
    #[serde(default, deserialize_with = "nullable::optional")]
    registration_start_date: Option<String>,
    #[serde(default, deserialize_with = "nullable::optional")]
    registration_end_date: Option<String>,
    #[serde(default, deserialize_with = "nullable::or_default")]
    is_registration_available: bool,
    #[serde(default, deserialize_with = "nullable::optional")]
    telegram_chat_link: Option<String>,
}

impl IntoDomain for EventDto {
    type Output = Event;

    fn into_domain(self, path: &str, issues: &mut Issues) -> Option<Event> {
        let before = issues.len();
        check_text(issues, path, &self.title, &self.body);
        let start_date = validation::iso_date(
            issues,
            validation::field(path, "start_date"),
            &self.start_date,
        );
        let end_date =
            validation::iso_date(issues, validation::field(path, "end_date"), &self.end_date);
        if let (Some(start), Some(end)) = (start_date, end_date) {
            check_date_range(issues, path, start, end);
        }
        let registration_start = self.registration_start_date.as_deref().map(|raw| {
            validation::timestamp(
                issues,
                validation::field(path, "registration_start_date"),
                raw,
            )
        });
        let registration_end = self.registration_end_date.as_deref().map(|raw| {
            validation::timestamp(
                issues,
                validation::field(path, "registration_end_date"),
                raw,
            )
        });
        if issues.len() > before {
            return None;
        }

        Some(Event {
            id: EventId::new(self.id),
            title: self.title,
            body: self.body,
            photo: self.photo,
            photo_url: self.photo_url,
            place: self.place,
            tags: self.tags.into_iter().collect::<BTreeSet<_>>(),
            start_date: start_date?,
            end_date: end_date?,
            participants: self.participants,
            max_participants: self.max_participants,
            creator: ProfileId::new(self.creator),
            visibility: self.visibility,
            repeatability: self.repeatability,
            status: self.status,
            registration_start: registration_start.flatten(),
            registration_end: registration_end.flatten(),
            is_registration_available: self.is_registration_available,
            telegram_chat_link: self.telegram_chat_link,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ExtendedEventDto {
    event: EventDto,
    #[serde(default, deserialize_with = "nullable::or_default")]
    friends_going: u32,
    participation_type: Participation,
    #[serde(default, deserialize_with = "nullable::optional")]
    participation_id: Option<String>,
}

impl IntoDomain for ExtendedEventDto {
    type Output = ExtendedEvent;

    fn into_domain(self, path: &str, issues: &mut Issues) -> Option<ExtendedEvent> {
        let event = self
            .event
            .into_domain(&validation::field(path, "event"), issues)?;
        Some(ExtendedEvent {
            event,
            friends_going: self.friends_going,
            participation: self.participation_type,
            participation_id: self.participation_id,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct EventListDto {
    events: Vec<ExtendedEventDto>,
    total: u64,
    has_more: bool,
}

impl IntoDomain for EventListDto {
    type Output = EventPage;

    fn into_domain(self, path: &str, issues: &mut Issues) -> Option<EventPage> {
        let events = self
            .events
            .into_domain(&validation::field(path, "events"), issues)?;
        Some(Page::new(events, self.total, self.has_more))
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ProfileDto {
    id: String,
    first_name: String,
    last_name: String,
    gender: String,
    birth_date: String,
    university: String,
    #[serde(default, deserialize_with = "nullable::optional")]
    avatar: Option<String>,
    #[serde(default, deserialize_with = "nullable::optional")]
    avatar_url: Option<String>,
    #[serde(default, deserialize_with = "nullable::optional")]
    bio: Option<String>,
    #[serde(default, alias = "telegram", deserialize_with = "nullable::optional")]
    max_id: Option<i64>,
    #[serde(default, deserialize_with = "nullable::optional")]
    invited_by: Option<String>,
    #[serde(default, deserialize_with = "nullable::or_default")]
    is_superuser: bool,
}

impl IntoDomain for ProfileDto {
    type Output = Profile;

    fn into_domain(self, path: &str, issues: &mut Issues) -> Option<Profile> {
        let before = issues.len();
        check_names(issues, path, &self.first_name, &self.last_name);
        check_university(issues, path, &self.university);
        let gender = Gender::from_code(&self.gender);
        if gender.is_none() {
            issues.push(validation::field(path, "gender"), "gender must be M or F");
        }
        let birth_date = validation::iso_date(
            issues,
            validation::field(path, "birth_date"),
            &self.birth_date,
        );
        if let Some(date) = birth_date {
            check_birth_date(issues, path, date);
        }
        if issues.len() > before {
            return None;
        }

        Some(Profile {
            id: ProfileId::new(self.id),
            first_name: self.first_name,
            last_name: self.last_name,
            gender: gender?,
            birth_date: birth_date?,
            university: self.university,
            avatar: self.avatar,
            avatar_url: self.avatar_url,
            bio: self.bio,
            max_id: self.max_id,
            invited_by: self.invited_by.map(ProfileId::new),
            is_superuser: self.is_superuser,
        })
    }
}

/// The viewer's profile, or an empty string when none exists yet.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub(super) struct MaybeProfileDto(Value);

impl IntoDomain for MaybeProfileDto {
    type Output = Option<Profile>;

    fn into_domain(self, path: &str, issues: &mut Issues) -> Option<Option<Profile>> {
        if self.0.as_str() == Some("") {
            return Some(None);
        }
        if !self.0.is_object() {
            issues.push(path, "expected a profile or an empty string");
            return None;
        }
        match serde_json::from_value::<ProfileDto>(self.0) {
            Ok(profile) => profile.into_domain(path, issues).map(Some),
            Err(err) => {
                issues.push(path, format!("unexpected response shape: {err}"));
                None
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct MessageDto {
    message: String,
}

impl IntoDomain for MessageDto {
    type Output = String;

    fn into_domain(self, _path: &str, _issues: &mut Issues) -> Option<String> {
        Some(self.message)
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct InvitationDto {
    id: String,
}

impl IntoDomain for InvitationDto {
    type Output = InvitationToken;

    fn into_domain(self, path: &str, issues: &mut Issues) -> Option<InvitationToken> {
        if self.id.is_empty() {
            issues.push(validation::field(path, "id"), "invitation id must not be empty");
            return None;
        }
        Some(InvitationToken::new(self.id))
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct TagsDto {
    tags: Vec<String>,
}

impl IntoDomain for TagsDto {
    type Output = Vec<String>;

    fn into_domain(self, _path: &str, _issues: &mut Issues) -> Option<Vec<String>> {
        Some(self.tags)
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct TicketScanDto {
    user_id: String,
    event_id: String,
}

impl IntoDomain for TicketScanDto {
    type Output = TicketScan;

    fn into_domain(self, _path: &str, _issues: &mut Issues) -> Option<TicketScan> {
        Some(TicketScan {
            user_id: ProfileId::new(self.user_id),
            event_id: EventId::new(self.event_id),
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct UploadedFileDto {
    id: String,
    url: String,
}

impl IntoDomain for UploadedFileDto {
    type Output = UploadedFile;

    fn into_domain(self, _path: &str, _issues: &mut Issues) -> Option<UploadedFile> {
        Some(UploadedFile {
            id: self.id,
            url: self.url,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for wire DTO conversion.

    use super::*;
    use crate::outbound::http::schema::parse_response;
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};
    use serde_json::json;

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("valid date")
    }

    #[fixture]
    fn event_json() -> Value {
        json!({
            "id": "evt-1",
            "title": "Board games",
            "body": "Bring snacks",
            "photo": null,
            "photo_url": null,
            "tags": ["Games", "Games", "Evening"],
            "start_date": "2025-03-01",
            "end_date": "2025-03-01",
            "participants": 4,
            "max_participants": null,
            "creator": "usr-1",
            "visability": "G",
            "repeatability": "N",
            "status": "A",
            "registration_start_date": "2025-02-20T10:00:00",
            "registration_end_date": null,
            "is_registration_available": true
        })
    }

    fn parse_event(value: &Value) -> Result<Event, crate::domain::SchemaValidationError> {
        parse_response::<EventDto>(value.to_string().as_bytes())
    }

    #[rstest]
    fn event_nulls_become_absent_values(event_json: Value) {
        let event = parse_event(&event_json).expect("event parses");
        assert_eq!(event.photo, None);
        assert_eq!(event.max_participants, None);
        assert_eq!(event.registration_end, None);
        assert_eq!(event.place, None);
        assert_eq!(event.tags.len(), 2, "tags form a set");
        assert_eq!(event.start_date, date("2025-03-01"));
        assert_eq!(
            event.registration_start.map(|stamp| stamp.to_rfc3339()),
            Some("2025-02-20T10:00:00+00:00".to_owned())
        );
    }

    #[rstest]
    fn missing_visibility_and_repeatability_take_defaults(mut event_json: Value) {
        let object = event_json.as_object_mut().expect("object");
        object.remove("visability");
        object.insert("repeatability".to_owned(), Value::Null);
        let event = parse_event(&event_json).expect("event parses");
        assert_eq!(event.visibility, Visibility::Public);
        assert_eq!(event.repeatability, Repeatability::OneOff);
    }

    #[rstest]
    fn reversed_dates_fail_validation(mut event_json: Value) {
        event_json["end_date"] = json!("2025-02-28");
        let error = parse_event(&event_json).expect_err("dates are reversed");
        assert_eq!(error.message(), "end date must not precede start date");
        assert_eq!(
            error.issues().first().map(|issue| issue.path.as_str()),
            Some("end_date")
        );
    }

    #[rstest]
    #[case::title_too_long("title", json!("x".repeat(201)), "title must not exceed 200 characters")]
    #[case::empty_title("title", json!(""), "title must not be empty")]
    #[case::bad_date("start_date", json!("01.03.2025"), "date must be in YYYY-MM-DD format")]
    #[case::bad_timestamp("registration_start_date", json!("soon"), "date and time must be valid")]
    fn rule_violations_name_the_first_issue(
        mut event_json: Value,
        #[case] key: &str,
        #[case] value: Value,
        #[case] message: &str,
    ) {
        event_json[key] = value;
        let error = parse_event(&event_json).expect_err("rule violated");
        assert_eq!(error.message(), message);
    }

    #[rstest]
    fn unknown_status_code_is_a_shape_failure(mut event_json: Value) {
        event_json["status"] = json!("X");
        let error = parse_event(&event_json).expect_err("status is unknown");
        assert!(error.message().starts_with("unexpected response shape"));
    }

    #[rstest]
    fn list_issues_carry_item_paths(event_json: Value) {
        let mut broken = event_json.clone();
        broken["title"] = json!("");
        let body = json!({
            "events": [
                { "event": event_json, "friends_going": 2, "participation_type": "V" },
                { "event": broken, "participation_type": "P", "participation_id": "tk-1" }
            ],
            "total": 2,
            "has_more": false
        });
        let error = parse_response::<EventListDto>(body.to_string().as_bytes())
            .expect_err("second title is empty");
        assert_eq!(
            error.issues().first().map(|issue| issue.path.as_str()),
            Some("events[1].event.title")
        );
    }

    #[rstest]
    fn list_converts_into_a_page(event_json: Value) {
        let body = json!({
            "events": [
                { "event": event_json, "friends_going": null, "participation_type": "C" }
            ],
            "total": 31,
            "has_more": true
        });
        let page = parse_response::<EventListDto>(body.to_string().as_bytes())
            .expect("page parses");
        assert_eq!(page.total, 31);
        assert!(page.has_more);
        assert_eq!(page.items[0].friends_going, 0);
        assert_eq!(page.items[0].participation, Participation::Creator);
    }

    #[fixture]
    fn profile_json() -> Value {
        json!({
            "id": "usr-1",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "gender": "F",
            "birth_date": "2001-12-10",
            "university": "ITMO",
            "avatar": null,
            "bio": null,
            "telegram": 4242,
            "invited_by": null
        })
    }

    #[rstest]
    fn profile_accepts_legacy_messenger_key(profile_json: Value) {
        let profile = parse_response::<ProfileDto>(profile_json.to_string().as_bytes())
            .expect("profile parses");
        assert_eq!(profile.max_id, Some(4242));
        assert_eq!(profile.gender, Gender::Female);
        assert!(!profile.is_superuser);
    }

    #[rstest]
    fn profile_without_messenger_id_is_accepted(mut profile_json: Value) {
        profile_json
            .as_object_mut()
            .expect("profile is an object")
            .remove("telegram");
        let profile = parse_response::<ProfileDto>(profile_json.to_string().as_bytes())
            .expect("profile parses");
        assert_eq!(profile.max_id, None);
    }

    #[rstest]
    #[case::too_young("birth_date", json!("2009-01-01"), "members must be at least 17 years old")]
    #[case::unknown_gender("gender", json!("X"), "gender must be M or F")]
    #[case::blank_university("university", json!(" "), "university must not be empty")]
    fn profile_rules_apply_to_responses(
        mut profile_json: Value,
        #[case] key: &str,
        #[case] value: Value,
        #[case] message: &str,
    ) {
        profile_json[key] = value;
        let error = parse_response::<ProfileDto>(profile_json.to_string().as_bytes())
            .expect_err("rule violated");
        assert_eq!(error.message(), message);
    }

    #[rstest]
    fn own_profile_may_be_an_empty_string(profile_json: Value) {
        assert_eq!(parse_response::<MaybeProfileDto>(br#""""#), Ok(None));
        let present = parse_response::<MaybeProfileDto>(profile_json.to_string().as_bytes())
            .expect("profile parses");
        assert!(present.is_some());
        let error =
            parse_response::<MaybeProfileDto>(br#""nobody""#).expect_err("non-empty string");
        assert_eq!(error.message(), "expected a profile or an empty string");
    }
}

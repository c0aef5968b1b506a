//! HTTP adapter behaviour against a stub REST service.

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, TimeZone, Utc};
use pagination::{Cursor, PageRequest};
use serde_json::{Value, json};
use url::Url;
use uuid::Uuid;
use vstrecha_client::Session;
use vstrecha_client::domain::ports::{
    EventsApi, FilesApi, FriendsApi, NotificationLevel, Notifier, ProfilesApi,
};
use vstrecha_client::domain::{
    ApiError, EventDraft, EventFilter, EventId, EventPeriod, FileKind, FileUpload, Gender,
    InvitationToken, NewProfile, NormalizedError, ProfileId, ProfilePatch, Repeatability,
    RequestId, Visibility,
};
use vstrecha_client::outbound::http::HttpApiClient;
use wiremock::matchers::{
    body_json, body_string_contains, header, method, path, query_param, query_param_is_missing,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INIT_DATA: &str = "query_id=AAF9&user=%7B%22id%22%3A42%7D&hash=abc";
const REQUEST_ID: &str = "8d7f3a52-5b1e-4c8e-9a7b-0d1f2e3c4b5a";

fn request_id() -> RequestId {
    RequestId::from_uuid(Uuid::parse_str(REQUEST_ID).expect("valid UUID"))
}

fn client_for(server: &MockServer, timeout: Duration) -> HttpApiClient {
    let base = Url::parse(&format!("{}/api/v1", server.uri())).expect("valid base URL");
    HttpApiClient::with_request_id(base, INIT_DATA, timeout, request_id()).expect("client builds")
}

async fn stub_server() -> (MockServer, HttpApiClient) {
    let server = MockServer::start().await;
    let client = client_for(&server, Duration::from_secs(5));
    (server, client)
}

fn event_json(id: &str) -> Value {
    json!({
        "id": id,
        "title": "Chess club",
        "body": "Weekly blitz",
        "photo": null,
        "photo_url": null,
        "place": null,
        "tags": ["Games"],
        "start_date": "2025-04-01",
        "end_date": "2025-04-01",
        "participants": 0,
        "max_participants": null,
        "creator": "usr-1",
        "visability": "G",
        "repeatability": "R",
        "status": "A",
        "registration_start_date": null,
        "registration_end_date": null,
        "is_registration_available": null,
        "telegram_chat_link": null
    })
}

fn profile_json(id: &str) -> Value {
    json!({
        "id": id,
        "first_name": "Grace",
        "last_name": "Hopper",
        "gender": "F",
        "birth_date": "2000-12-09",
        "university": "HSE",
        "avatar": null,
        "avatar_url": null,
        "bio": null,
        "max_id": 42,
        "invited_by": null,
        "is_superuser": false
    })
}

#[tokio::test]
async fn every_request_carries_the_session_headers() {
    let (server, client) = stub_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/events/tags/"))
        .and(header("x-request-id", REQUEST_ID))
        .and(header("authorization", format!("tma {INIT_DATA}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tags": ["Games", "Sport"]})))
        .expect(2)
        .mount(&server)
        .await;

    assert_eq!(client.list_tags().await, Ok(vec!["Games".to_owned(), "Sport".to_owned()]));
    assert_eq!(client.list_tags().await.map(|tags| tags.len()), Ok(2));
}

#[tokio::test]
async fn own_event_list_encodes_cursor_tags_and_period() {
    let (server, client) = stub_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/events/user_events/"))
        .and(query_param("limit", "10"))
        .and(query_param("last_event_id", "evt-10"))
        .and(query_param("tags[]", "Games"))
        .and(query_param("tags[]", "Sport"))
        .and(query_param("filter_type", "past"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "events": [
                {
                    "event": event_json("evt-11"),
                    "friends_going": 1,
                    "participation_type": "P",
                    "participation_id": "ticket-11"
                }
            ],
            "total": 11,
            "has_more": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let filter = EventFilter {
        period: Some(EventPeriod::Past),
        ..EventFilter::with_tags(["Games", "Sport"])
    };
    let query = PageRequest::after(10, Some(Cursor::new("evt-10")), filter);
    let page = client.list_user_events(&query).await.expect("page loads");
    assert_eq!(page.items.len(), 1);
    assert!(!page.has_more);
    assert_eq!(page.items[0].participation_id.as_deref(), Some("ticket-11"));
}

#[tokio::test]
async fn global_event_list_encodes_visibility_and_repeatability() {
    let (server, client) = stub_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/events/global_events/"))
        .and(query_param("limit", "10"))
        .and(query_param("visability", "P"))
        .and(query_param("repeatability", "N"))
        .and(query_param_is_missing("last_event_id"))
        .and(query_param_is_missing("filter_type"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "events": [],
            "total": 0,
            "has_more": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let filter = EventFilter {
        visibility: Some(Visibility::Private),
        repeatability: Some(Repeatability::OneOff),
        period: Some(EventPeriod::Actual),
        ..EventFilter::default()
    };
    let page = client
        .list_global_events(&PageRequest::first(10, filter))
        .await
        .expect("page loads");
    assert!(page.items.is_empty());
    assert!(!page.has_more);
}

#[tokio::test]
async fn server_detail_is_surfaced_verbatim() {
    let (server, client) = stub_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/events/global_events/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "Event not found"})),
        )
        .mount(&server)
        .await;

    let error = client
        .fetch_event(&EventId::new("missing"))
        .await
        .expect_err("event is missing");
    assert_eq!(
        error,
        ApiError::Normalized(NormalizedError::server_detail("Event not found"))
    );
    assert_eq!(error.to_string(), "Event not found");
}

#[tokio::test]
async fn validation_error_lists_become_unknown() {
    let (server, client) = stub_server().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/events/user_events/evt-1"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [{"loc": ["path", "id"], "msg": "invalid id"}]
        })))
        .mount(&server)
        .await;

    let error = client
        .select_event(&EventId::new("evt-1"))
        .await
        .expect_err("request rejected");
    assert_eq!(error, ApiError::Normalized(NormalizedError::unknown()));
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let base = Url::parse("http://127.0.0.1:9/api/v1").expect("valid base URL");
    let client = HttpApiClient::new(base, INIT_DATA, Duration::from_secs(2)).expect("client builds");

    let error = client.list_tags().await.expect_err("nothing listens");
    assert_eq!(error, ApiError::Normalized(NormalizedError::network()));
}

#[tokio::test]
async fn slow_server_times_out_as_a_network_error() {
    let server = MockServer::start().await;
    let client = client_for(&server, Duration::from_millis(100));
    Mock::given(method("GET"))
        .and(path("/api/v1/events/tags/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(2))
                .set_body_json(json!({"tags": []})),
        )
        .mount(&server)
        .await;

    let error = client.list_tags().await.expect_err("request times out");
    assert_eq!(error, ApiError::Normalized(NormalizedError::network()));
}

#[tokio::test]
async fn malformed_success_body_is_a_schema_violation() {
    let (server, client) = stub_server().await;
    let mut event = event_json("evt-2");
    event["end_date"] = json!("2025-03-31");
    Mock::given(method("POST"))
        .and(path("/api/v1/events/user_events/evt-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(event))
        .mount(&server)
        .await;

    let error = client
        .select_event(&EventId::new("evt-2"))
        .await
        .expect_err("dates are reversed");
    assert!(error.is_contract_violation());
    assert_eq!(error.to_string(), "end date must not precede start date");
}

#[tokio::test]
async fn created_event_round_trips_with_nulls_as_absent() {
    let (server, client) = stub_server().await;
    let day = |raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("valid date");
    let mut draft = EventDraft::new("Chess club", "Weekly blitz", day("2025-04-01"), day("2025-04-01"));
    draft.tags.insert("Games".to_owned());
    draft.repeatability = Repeatability::Repeating;

    Mock::given(method("POST"))
        .and(path("/api/v1/events/global_events/"))
        .and(body_json(json!({
            "title": "Chess club",
            "body": "Weekly blitz",
            "tags": ["Games"],
            "start_date": "2025-04-01",
            "end_date": "2025-04-01",
            "visability": "G",
            "repeatability": "R"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(event_json("evt-3")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/events/global_events/evt-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "event": event_json("evt-3"),
            "friends_going": 0,
            "participation_type": "C",
            "participation_id": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client.create_event(&draft).await.expect("event created");
    let fetched = client.fetch_event(&created.id).await.expect("event fetched");
    assert_eq!(fetched.event, created);
    assert_eq!(fetched.event.photo, None);
    assert_eq!(fetched.event.max_participants, None);
    assert_eq!(fetched.event.registration_start, None);
    assert_eq!(fetched.event.telegram_chat_link, None);
    assert!(!fetched.event.is_registration_available);
    assert_eq!(fetched.participation_id, None);
}

#[tokio::test]
async fn missing_own_profile_resolves_to_none() {
    let (server, client) = stub_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/profiles/my"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("")))
        .mount(&server)
        .await;

    assert_eq!(client.my_profile().await, Ok(None));
}

#[tokio::test]
async fn underage_profile_from_server_is_rejected() {
    let (server, client) = stub_server().await;
    let mut profile = profile_json("usr-9");
    profile["birth_date"] = json!("2009-01-01");
    Mock::given(method("GET"))
        .and(path("/api/v1/profiles/usr-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile))
        .mount(&server)
        .await;

    let error = client
        .fetch_profile(&ProfileId::new("usr-9"))
        .await
        .expect_err("birth date is too late");
    assert_eq!(error.to_string(), "members must be at least 17 years old");
}

#[tokio::test]
async fn leaving_an_event_returns_the_server_message() {
    let (server, client) = stub_server().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/events/user_events/evt-4"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Registration cancelled"})),
        )
        .mount(&server)
        .await;

    assert_eq!(
        client.deselect_event(&EventId::new("evt-4")).await,
        Ok("Registration cancelled".to_owned())
    );
}

#[tokio::test]
async fn ticket_scan_posts_the_participation_id() {
    let (server, client) = stub_server().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/events/scan_qr"))
        .and(body_json(json!({"participation_id": "ticket-7"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"user_id": "usr-2", "event_id": "evt-7"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let scan = client.scan_ticket("ticket-7").await.expect("ticket scanned");
    assert_eq!(scan.user_id, ProfileId::new("usr-2"));
    assert_eq!(scan.event_id, EventId::new("evt-7"));
}

#[tokio::test]
async fn invitation_flow_uses_the_friend_endpoints() {
    let (server, client) = stub_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/friends/check/tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json("usr-5")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/friends/new"))
        .and(body_json(json!({"invitation_id": "tok-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "tok-1"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/friends/list/usr-5"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([profile_json("usr-6"), profile_json("usr-7")])),
        )
        .mount(&server)
        .await;

    let token = InvitationToken::new("tok-1");
    let inviter = client.check_invitation(&token).await.expect("invitation valid");
    assert_eq!(inviter.display_name(), "Grace Hopper");
    assert_eq!(client.accept_invitation(&token).await, Ok(token.clone()));
    let friends = client.list_friends(&inviter.id).await.expect("friends listed");
    assert_eq!(friends.len(), 2);
}

struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _level: NotificationLevel, _message: &str) {}
}

#[tokio::test]
async fn session_builds_invitation_links() {
    let (server, client) = stub_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/friends/new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "tok-2"})))
        .mount(&server)
        .await;

    let session = Session::with_client(
        Arc::new(client),
        Arc::new(SilentNotifier),
        10,
        "https://t.me/stud_vstrecha_bot?startapp=",
    );
    assert_eq!(session.request_id(), request_id());
    assert_eq!(
        session.invitation_link().await,
        Ok("https://t.me/stud_vstrecha_bot?startapp=tok-2".to_owned())
    );
}

#[tokio::test]
async fn upload_sends_multipart_with_file_type() {
    let (server, client) = stub_server().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/files/upload"))
        .and(body_string_contains("name=\"file_type\""))
        .and(body_string_contains("avatar"))
        .and(body_string_contains("filename=\"me.png\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "file-1",
            "url": "https://cdn.example.test/file-1.png"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let upload = FileUpload {
        file_name: "me.png".to_owned(),
        mime_type: "image/png".to_owned(),
        bytes: b"not really a png".to_vec(),
    };
    let stored = client
        .upload_file(upload, FileKind::Avatar)
        .await
        .expect("file uploaded");
    assert_eq!(stored.id, "file-1");
}

#[tokio::test]
async fn editing_an_event_patches_it_by_id() {
    let (server, client) = stub_server().await;
    let day = |raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("valid date");
    let mut draft = EventDraft::new("Chess club", "Rapid this week", day("2025-04-01"), day("2025-04-02"));
    draft.place = Some("Room 204".to_owned());
    draft.max_participants = Some(30);
    draft.visibility = Visibility::Private;
    draft.registration_start = Utc.with_ymd_and_hms(2025, 3, 20, 10, 0, 0).single();

    let mut updated = event_json("evt-3");
    updated["body"] = json!("Rapid this week");
    updated["end_date"] = json!("2025-04-02");
    updated["place"] = json!("Room 204");
    updated["max_participants"] = json!(30);
    updated["visability"] = json!("P");
    Mock::given(method("PATCH"))
        .and(path("/api/v1/events/global_events/evt-3"))
        .and(body_json(json!({
            "title": "Chess club",
            "body": "Rapid this week",
            "tags": [],
            "place": "Room 204",
            "start_date": "2025-04-01",
            "end_date": "2025-04-02",
            "max_participants": 30,
            "visability": "P",
            "repeatability": "N",
            "registration_start_date": "2025-03-20T10:00:00Z"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(updated))
        .expect(1)
        .mount(&server)
        .await;

    let event = client
        .edit_event(&EventId::new("evt-3"), &draft)
        .await
        .expect("event edited");
    assert_eq!(event.place.as_deref(), Some("Room 204"));
    assert_eq!(event.max_participants, Some(30));
    assert_eq!(event.visibility, Visibility::Private);
}

#[tokio::test]
async fn creating_a_profile_posts_the_registration_payload() {
    let (server, client) = stub_server().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/profiles/"))
        .and(body_json(json!({
            "first_name": "Grace",
            "last_name": "Hopper",
            "gender": "F",
            "birth_date": "2000-12-09",
            "university": "HSE",
            "invitation": "inv-7"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json("usr-5")))
        .expect(1)
        .mount(&server)
        .await;

    let profile = NewProfile {
        first_name: "Grace".to_owned(),
        last_name: "Hopper".to_owned(),
        gender: Gender::Female,
        birth_date: NaiveDate::from_ymd_opt(2000, 12, 9).expect("valid date"),
        avatar: None,
        university: "HSE".to_owned(),
        bio: None,
        invitation: Some(InvitationToken::new("inv-7")),
    };
    let created = client.create_profile(&profile).await.expect("profile created");
    assert_eq!(created.id, ProfileId::new("usr-5"));
    assert_eq!(created.max_id, Some(42));
}

#[tokio::test]
async fn updating_a_profile_sends_only_changed_fields() {
    let (server, client) = stub_server().await;
    let mut stored = profile_json("usr-5");
    stored["university"] = json!("MIT");
    stored["bio"] = json!("Compilers");
    Mock::given(method("PATCH"))
        .and(path("/api/v1/profiles/"))
        .and(body_json(json!({
            "university": "MIT",
            "bio": "Compilers"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(stored))
        .expect(1)
        .mount(&server)
        .await;

    let patch = ProfilePatch {
        university: Some("MIT".to_owned()),
        bio: Some("Compilers".to_owned()),
        ..ProfilePatch::default()
    };
    let updated = client.update_profile(&patch).await.expect("profile updated");
    assert_eq!(updated.university, "MIT");
    assert_eq!(updated.bio.as_deref(), Some("Compilers"));
}

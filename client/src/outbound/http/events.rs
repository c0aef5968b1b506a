//! Event endpoints.

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;

use super::client::HttpApiClient;
use super::dto::{EventDto, EventListDto, ExtendedEventDto, MessageDto, TagsDto, TicketScanDto};
use crate::domain::ports::EventsApi;
use crate::domain::{
    ApiError, Event, EventDraft, EventId, EventPage, EventQuery, ExtendedEvent, TicketScan,
};

const EVENTS: &str = "events";
const GLOBAL_EVENTS: &str = "global_events";
const USER_EVENTS: &str = "user_events";

#[derive(Serialize)]
struct ScanRequest<'a> {
    participation_id: &'a str,
}

/// Which list a query targets; only the viewer's own list takes a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListScope {
    Global,
    Own,
}

/// Encode a list query as repeated query-string pairs.
fn list_query(query: &EventQuery, scope: ListScope) -> Vec<(&'static str, String)> {
    let mut pairs = vec![("limit", query.limit.to_string())];
    if let Some(cursor) = &query.cursor {
        pairs.push(("last_event_id", cursor.to_string()));
    }
    pairs.extend(query.filter.tags.iter().map(|tag| ("tags[]", tag.clone())));
    if let Some(visibility) = query.filter.visibility {
        pairs.push(("visability", visibility.code().to_owned()));
    }
    if let Some(repeatability) = query.filter.repeatability {
        pairs.push(("repeatability", repeatability.code().to_owned()));
    }
    if let (ListScope::Own, Some(period)) = (scope, query.filter.period) {
        pairs.push(("filter_type", period.as_str().to_owned()));
    }
    pairs
}

#[async_trait]
impl EventsApi for HttpApiClient {
    async fn select_event(&self, id: &EventId) -> Result<Event, ApiError> {
        let request = self.request(Method::POST, &[EVENTS, USER_EVENTS, id.as_str()])?;
        self.call::<EventDto>(request).await
    }

    async fn deselect_event(&self, id: &EventId) -> Result<String, ApiError> {
        let request = self.request(Method::DELETE, &[EVENTS, USER_EVENTS, id.as_str()])?;
        self.call::<MessageDto>(request).await
    }

    async fn create_event(&self, draft: &EventDraft) -> Result<Event, ApiError> {
        let request = self
            .request(Method::POST, &[EVENTS, GLOBAL_EVENTS, ""])?
            .json(draft);
        self.call::<EventDto>(request).await
    }

    async fn edit_event(&self, id: &EventId, draft: &EventDraft) -> Result<Event, ApiError> {
        let request = self
            .request(Method::PATCH, &[EVENTS, GLOBAL_EVENTS, id.as_str()])?
            .json(draft);
        self.call::<EventDto>(request).await
    }

    async fn fetch_event(&self, id: &EventId) -> Result<ExtendedEvent, ApiError> {
        let request = self.request(Method::GET, &[EVENTS, GLOBAL_EVENTS, id.as_str()])?;
        self.call::<ExtendedEventDto>(request).await
    }

    async fn list_global_events(&self, query: &EventQuery) -> Result<EventPage, ApiError> {
        let request = self
            .request(Method::GET, &[EVENTS, GLOBAL_EVENTS, ""])?
            .query(&list_query(query, ListScope::Global));
        self.call::<EventListDto>(request).await
    }

    async fn list_user_events(&self, query: &EventQuery) -> Result<EventPage, ApiError> {
        let request = self
            .request(Method::GET, &[EVENTS, USER_EVENTS, ""])?
            .query(&list_query(query, ListScope::Own));
        self.call::<EventListDto>(request).await
    }

    async fn list_tags(&self) -> Result<Vec<String>, ApiError> {
        let request = self.request(Method::GET, &[EVENTS, "tags", ""])?;
        self.call::<TagsDto>(request).await
    }

    async fn scan_ticket(&self, participation_id: &str) -> Result<TicketScan, ApiError> {
        let request = self
            .request(Method::POST, &[EVENTS, "scan_qr"])?
            .json(&ScanRequest { participation_id });
        self.call::<TicketScanDto>(request).await
    }
}

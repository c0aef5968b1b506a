//! Event list domains served to list stores.

use std::sync::Arc;

use async_trait::async_trait;

use super::ports::{EventsApi, PageSource};
use super::{ApiError, EventFilter, EventPage, EventQuery, ExtendedEvent};

/// Events visible to everyone.
pub struct GlobalEventsFeed<A: ?Sized> {
    api: Arc<A>,
}

impl<A: ?Sized> GlobalEventsFeed<A> {
    /// Serve pages from `api`.
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl<A> PageSource for GlobalEventsFeed<A>
where
    A: EventsApi + ?Sized,
{
    type Item = ExtendedEvent;
    type Filter = EventFilter;

    async fn fetch_page(&self, request: EventQuery) -> Result<EventPage, ApiError> {
        self.api.list_global_events(&request).await
    }
}

/// Events the viewer created or joined.
pub struct UserEventsFeed<A: ?Sized> {
    api: Arc<A>,
}

impl<A: ?Sized> UserEventsFeed<A> {
    /// Serve pages from `api`.
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl<A> PageSource for UserEventsFeed<A>
where
    A: EventsApi + ?Sized,
{
    type Item = ExtendedEvent;
    type Filter = EventFilter;

    async fn fetch_page(&self, request: EventQuery) -> Result<EventPage, ApiError> {
        self.api.list_user_events(&request).await
    }
}

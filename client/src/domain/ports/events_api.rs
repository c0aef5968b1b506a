//! Driven port for event endpoints.

use async_trait::async_trait;

use crate::domain::{
    ApiError, Event, EventDraft, EventId, EventPage, EventQuery, ExtendedEvent, TicketScan,
};

/// Event operations offered by the remote service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventsApi: Send + Sync {
    /// Register the viewer for an event.
    async fn select_event(&self, id: &EventId) -> Result<Event, ApiError>;

    /// Withdraw the viewer's registration; returns the server's confirmation.
    async fn deselect_event(&self, id: &EventId) -> Result<String, ApiError>;

    /// Publish a new event.
    async fn create_event(&self, draft: &EventDraft) -> Result<Event, ApiError>;

    /// Replace the editable fields of an existing event.
    async fn edit_event(&self, id: &EventId, draft: &EventDraft) -> Result<Event, ApiError>;

    /// Load one event with the viewer's context.
    async fn fetch_event(&self, id: &EventId) -> Result<ExtendedEvent, ApiError>;

    /// Page through events visible to everyone.
    async fn list_global_events(&self, query: &EventQuery) -> Result<EventPage, ApiError>;

    /// Page through events the viewer created or joined.
    async fn list_user_events(&self, query: &EventQuery) -> Result<EventPage, ApiError>;

    /// Tags the server accepts on events.
    async fn list_tags(&self) -> Result<Vec<String>, ApiError>;

    /// Check a participant in by the ticket shown as a QR code.
    async fn scan_ticket(&self, participation_id: &str) -> Result<TicketScan, ApiError>;
}

//! Process-wide wiring of the API client and its list stores.
//!
//! A [`Session`] is built once from [`ClientSettings`]: one HTTP client (and
//! so one request identifier) shared by both event list stores.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::config::{ClientSettings, SettingsError};
use crate::domain::ports::Notifier;
use crate::domain::{
    ApiError, GlobalEventsFeed, ListStore, RequestId, UserEventsFeed, create_invitation_link,
};
use crate::outbound::http::{ClientSetupError, HttpApiClient};

/// Store of events visible to everyone.
pub type GlobalEventsStore = ListStore<GlobalEventsFeed<HttpApiClient>>;
/// Store of the viewer's own events.
pub type UserEventsStore = ListStore<UserEventsFeed<HttpApiClient>>;

/// Failure to start a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Settings are incomplete or malformed.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// The HTTP client could not be built.
    #[error(transparent)]
    Client(#[from] ClientSetupError),
}

/// API client plus the stores built on it.
pub struct Session {
    api: Arc<HttpApiClient>,
    global_events: GlobalEventsStore,
    user_events: UserEventsStore,
    invite_link_base: String,
}

impl Session {
    /// Connect using `settings`; list failures are reported to `notifier`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when settings are unusable or the client
    /// cannot be built.
    pub fn connect(
        settings: &ClientSettings,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, SessionError> {
        let api = HttpApiClient::new(
            settings.base_url()?,
            settings.init_data()?,
            settings.timeout(),
        )?;
        info!(
            base_url = %api.base_url(),
            request_id = %api.request_id(),
            "session started"
        );
        Ok(Self::with_client(
            Arc::new(api),
            notifier,
            settings.page_size(),
            settings.invite_link_base(),
        ))
    }

    /// Assemble a session around an existing client.
    pub fn with_client(
        api: Arc<HttpApiClient>,
        notifier: Arc<dyn Notifier>,
        page_size: u32,
        invite_link_base: impl Into<String>,
    ) -> Self {
        let global_events = ListStore::new(
            "global events",
            Arc::new(GlobalEventsFeed::new(Arc::clone(&api))),
            Arc::clone(&notifier),
            page_size,
        );
        let user_events = ListStore::new(
            "your events",
            Arc::new(UserEventsFeed::new(Arc::clone(&api))),
            notifier,
            page_size,
        );
        Self {
            api,
            global_events,
            user_events,
            invite_link_base: invite_link_base.into(),
        }
    }

    /// The client implementing every API port.
    pub fn api(&self) -> &HttpApiClient {
        &self.api
    }

    /// Identifier attached to every request of this session.
    pub fn request_id(&self) -> RequestId {
        self.api.request_id()
    }

    /// Events visible to everyone.
    pub fn global_events(&self) -> &GlobalEventsStore {
        &self.global_events
    }

    /// Events the viewer created or joined.
    pub fn user_events(&self) -> &UserEventsStore {
        &self.user_events
    }

    /// Issue an invitation and return its shareable link.
    ///
    /// # Errors
    ///
    /// Propagates the API failure.
    pub async fn invitation_link(&self) -> Result<String, ApiError> {
        create_invitation_link(self.api.as_ref(), &self.invite_link_base).await
    }
}

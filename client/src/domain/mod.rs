//! Domain types, rules, ports, and list stores.
//!
//! Purpose: describe what the remote event service offers in strongly typed
//! terms and keep every rule (validation, registration windows, pagination
//! bookkeeping) free of transport details. Adapters under `outbound` speak
//! HTTP; nothing here does.
//!
//! Public surface:
//! - `Event`, `ExtendedEvent`, `EventDraft`, `EventFilter`: events and lists.
//! - `Profile`, `NewProfile`, `ProfilePatch`: member profiles.
//! - `ApiError`, `NormalizedError`, `SchemaValidationError`: failures.
//! - `ListStore` with `GlobalEventsFeed` / `UserEventsFeed`: paginated lists.
//! - `registration_status`: the registration-window rule.

pub mod error;
pub mod event;
pub mod feeds;
pub mod files;
pub mod friends;
pub mod list_store;
mod macros;
pub mod ports;
pub mod profile;
pub mod registration;
pub mod request_id;
pub mod validation;

pub use self::error::{ApiError, NormalizedError, SchemaValidationError};
pub use self::event::{
    Event, EventDraft, EventFilter, EventId, EventPage, EventPeriod, EventQuery, EventStatus,
    ExtendedEvent, Participation, Repeatability, TicketScan, Visibility,
};
pub use self::feeds::{GlobalEventsFeed, UserEventsFeed};
pub use self::files::{FileKind, FileUpload, UploadedFile};
pub use self::friends::{InvitationToken, create_invitation_link, invitation_link};
pub use self::list_store::{EVENTS_PER_PAGE, ListState, ListStore, LoadOutcome};
pub use self::profile::{Gender, NewProfile, Profile, ProfileId, ProfilePatch};
pub use self::registration::{RegistrationStatus, registration_status, registration_status_now};
pub use self::request_id::RequestId;

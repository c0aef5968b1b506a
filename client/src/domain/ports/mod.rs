//! Domain ports for the remote service and the host.
//!
//! Each API trait mirrors one resource of the REST service; the HTTP adapter
//! implements them all, and tests substitute mocks.

mod events_api;
mod files_api;
mod friends_api;
mod notifier;
mod page_source;
mod profiles_api;

#[cfg(test)]
pub use events_api::MockEventsApi;
pub use events_api::EventsApi;
#[cfg(test)]
pub use files_api::MockFilesApi;
pub use files_api::FilesApi;
#[cfg(test)]
pub use friends_api::MockFriendsApi;
pub use friends_api::FriendsApi;
#[cfg(test)]
pub use notifier::MockNotifier;
pub use notifier::{NotificationLevel, Notifier};
pub use page_source::PageSource;
#[cfg(test)]
pub use profiles_api::MockProfilesApi;
pub use profiles_api::ProfilesApi;

//! Driven port for profile endpoints.

use async_trait::async_trait;

use crate::domain::{ApiError, NewProfile, Profile, ProfileId, ProfilePatch};

/// Profile operations offered by the remote service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfilesApi: Send + Sync {
    /// The viewer's own profile, or `None` before registration.
    async fn my_profile(&self) -> Result<Option<Profile>, ApiError>;

    /// Another member's profile.
    async fn fetch_profile(&self, id: &ProfileId) -> Result<Profile, ApiError>;

    /// Register the viewer's profile.
    async fn create_profile(&self, profile: &NewProfile) -> Result<Profile, ApiError>;

    /// Change fields of the viewer's profile.
    async fn update_profile(&self, patch: &ProfilePatch) -> Result<Profile, ApiError>;
}

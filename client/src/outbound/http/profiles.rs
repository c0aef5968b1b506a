//! Profile endpoints.

use async_trait::async_trait;
use reqwest::Method;

use super::client::HttpApiClient;
use super::dto::{MaybeProfileDto, ProfileDto};
use crate::domain::ports::ProfilesApi;
use crate::domain::{ApiError, NewProfile, Profile, ProfileId, ProfilePatch};

const PROFILES: &str = "profiles";

#[async_trait]
impl ProfilesApi for HttpApiClient {
    async fn my_profile(&self) -> Result<Option<Profile>, ApiError> {
        let request = self.request(Method::GET, &[PROFILES, "my"])?;
        self.call::<MaybeProfileDto>(request).await
    }

    async fn fetch_profile(&self, id: &ProfileId) -> Result<Profile, ApiError> {
        let request = self.request(Method::GET, &[PROFILES, id.as_str()])?;
        self.call::<ProfileDto>(request).await
    }

    async fn create_profile(&self, profile: &NewProfile) -> Result<Profile, ApiError> {
        let request = self.request(Method::POST, &[PROFILES, ""])?.json(profile);
        self.call::<ProfileDto>(request).await
    }

    async fn update_profile(&self, patch: &ProfilePatch) -> Result<Profile, ApiError> {
        let request = self.request(Method::PATCH, &[PROFILES, ""])?.json(patch);
        self.call::<ProfileDto>(request).await
    }
}

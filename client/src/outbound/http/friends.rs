//! Friend and invitation endpoints.

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;

use super::client::HttpApiClient;
use super::dto::{InvitationDto, ProfileDto};
use crate::domain::ports::FriendsApi;
use crate::domain::{ApiError, InvitationToken, Profile, ProfileId};

const FRIENDS: &str = "friends";

#[derive(Serialize)]
struct AcceptRequest<'a> {
    invitation_id: &'a str,
}

#[async_trait]
impl FriendsApi for HttpApiClient {
    async fn check_invitation(&self, token: &InvitationToken) -> Result<Profile, ApiError> {
        let request = self.request(Method::GET, &[FRIENDS, "check", token.as_str()])?;
        self.call::<ProfileDto>(request).await
    }

    async fn create_invitation(&self) -> Result<InvitationToken, ApiError> {
        let request = self.request(Method::GET, &[FRIENDS, "new"])?;
        self.call::<InvitationDto>(request).await
    }

    async fn accept_invitation(
        &self,
        token: &InvitationToken,
    ) -> Result<InvitationToken, ApiError> {
        let request = self
            .request(Method::POST, &[FRIENDS, "new"])?
            .json(&AcceptRequest {
                invitation_id: token.as_str(),
            });
        self.call::<InvitationDto>(request).await
    }

    async fn list_friends(&self, id: &ProfileId) -> Result<Vec<Profile>, ApiError> {
        let request = self.request(Method::GET, &[FRIENDS, "list", id.as_str()])?;
        self.call::<Vec<ProfileDto>>(request).await
    }
}

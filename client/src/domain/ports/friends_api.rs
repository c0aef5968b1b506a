//! Driven port for the friend graph and invitations.

use async_trait::async_trait;

use crate::domain::{ApiError, InvitationToken, Profile, ProfileId};

/// Friend operations offered by the remote service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FriendsApi: Send + Sync {
    /// Profile of the member who issued `token`.
    async fn check_invitation(&self, token: &InvitationToken) -> Result<Profile, ApiError>;

    /// Issue a fresh invitation for the viewer.
    async fn create_invitation(&self) -> Result<InvitationToken, ApiError>;

    /// Accept an invitation, befriending its issuer.
    async fn accept_invitation(
        &self,
        token: &InvitationToken,
    ) -> Result<InvitationToken, ApiError>;

    /// Friends of a member.
    async fn list_friends(&self, id: &ProfileId) -> Result<Vec<Profile>, ApiError>;
}

//! Friend invitations.
//!
//! A member shares a link carrying an invitation token; whoever opens it can
//! look up the inviter and accept, which makes the two friends.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;

use super::error::{ApiError, NormalizedError};
use super::ports::FriendsApi;

/// Opaque invitation identifier issued by the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvitationToken(String);

impl InvitationToken {
    /// Wrap a raw token.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for InvitationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append a token to the deep-link prefix that opens the mini app.
///
/// # Examples
/// ```
/// use url::Url;
/// use vstrecha_client::domain::{InvitationToken, invitation_link};
///
/// let base = Url::parse("https://t.me/bot?startapp=").expect("valid URL");
/// let link = invitation_link(&base, &InvitationToken::new("abc"));
/// assert_eq!(link, "https://t.me/bot?startapp=abc");
/// ```
#[must_use]
pub fn invitation_link(base: &Url, token: &InvitationToken) -> String {
    format!("{base}{token}")
}

/// Ask the server for a fresh invitation and turn it into a shareable link.
///
/// # Errors
///
/// Propagates the API failure; a link prefix that cannot be parsed is
/// reported as a request setup failure.
pub async fn create_invitation_link<F>(api: &F, link_base: &str) -> Result<String, ApiError>
where
    F: FriendsApi + ?Sized,
{
    let base = Url::parse(link_base).map_err(|err| {
        NormalizedError::request_setup(format!("invalid invitation link base: {err}"))
    })?;
    let token = api.create_invitation().await?;
    info!(token = %token, "created friend invitation");
    Ok(invitation_link(&base, &token))
}

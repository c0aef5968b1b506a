//! Failure taxonomy of the API access layer.
//!
//! Every failure reaching a caller is either a [`NormalizedError`] (the server
//! or the transport failed) or a [`SchemaValidationError`] (the server
//! answered with a body that does not fit the declared shape).

use super::macros::define_api_error;
use super::validation::Issues;

define_api_error! {
    /// Server and transport failures collapsed into four kinds.
    pub enum NormalizedError {
        /// The server explicitly reported a human-readable problem.
        ServerDetail { detail: String } => "{detail}",
        /// No response reached the client.
        Network => "network error or server unavailable",
        /// The request could not be built or sent.
        RequestSetup { message: String } => "request could not be sent: {message}",
        /// The server answered with an error body of unexpected shape.
        Unknown => "unknown server error",
    }
}

/// Response body that failed validation against its declared shape.
///
/// The message is the first issue found; the full list stays attached for
/// diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SchemaValidationError {
    message: String,
    issues: Issues,
}

impl SchemaValidationError {
    /// Build from a non-empty issue list.
    #[must_use]
    pub fn from_issues(issues: Issues) -> Self {
        let message = issues
            .first_message()
            .unwrap_or("response did not match the expected shape")
            .to_owned();
        Self { message, issues }
    }

    /// Message of the first failed check.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Every failed check, in discovery order.
    #[must_use]
    pub fn issues(&self) -> &Issues {
        &self.issues
    }
}

/// Error returned by every API operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Server or transport failure.
    #[error(transparent)]
    Normalized(#[from] NormalizedError),
    /// Response body violated the declared shape.
    #[error(transparent)]
    Schema(#[from] SchemaValidationError),
}

impl ApiError {
    /// The normalized failure, when this is not a schema violation.
    #[must_use]
    pub fn as_normalized(&self) -> Option<&NormalizedError> {
        match self {
            Self::Normalized(error) => Some(error),
            Self::Schema(_) => None,
        }
    }

    /// Whether the server spoke but its words could not be trusted.
    #[must_use]
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::Schema(_) | Self::Normalized(NormalizedError::Unknown)
        )
    }

    /// Snake-case label for log fields.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Normalized(error) => error.kind(),
            Self::Schema(_) => "schema_validation",
        }
    }
}

//! Collapse transport and server failures into [`NormalizedError`].
//!
//! The decision only depends on how far the request got: built but never
//! answered, answered with an error status, or never built at all.

use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::NormalizedError;

/// How far a failed request got.
#[derive(Debug)]
pub(crate) enum TransportFailure<'a> {
    /// The server answered with a non-success status.
    Response { status: StatusCode, body: &'a [u8] },
    /// The request went out but no usable response came back.
    NoResponse { message: String },
    /// The request could not be constructed.
    Setup { message: String },
}

/// Normalize a failed request.
pub(crate) fn normalize(failure: TransportFailure<'_>) -> NormalizedError {
    match failure {
        TransportFailure::Response { status, body } => match server_detail(body) {
            Some(detail) => {
                debug!(status = status.as_u16(), %detail, "server declared an error");
                NormalizedError::server_detail(detail)
            }
            None => {
                warn!(
                    status = status.as_u16(),
                    body = %String::from_utf8_lossy(body),
                    "error response without a textual detail"
                );
                NormalizedError::unknown()
            }
        },
        TransportFailure::NoResponse { message } => {
            warn!(%message, "no response from server");
            NormalizedError::network()
        }
        TransportFailure::Setup { message } => NormalizedError::request_setup(message),
    }
}

/// Classify a reqwest error raised before a status line was read.
pub(crate) fn from_reqwest(error: &reqwest::Error) -> TransportFailure<'static> {
    if error.is_builder() {
        TransportFailure::Setup {
            message: error.to_string(),
        }
    } else {
        TransportFailure::NoResponse {
            message: error.to_string(),
        }
    }
}

/// The `detail` field of an error body, when it is a string.
fn server_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value.get("detail")?.as_str().map(str::to_owned)
}

//! Reqwest-backed client shared by every API adapter.
//!
//! The client carries two default headers on every request: a per-session
//! `X-Request-Id` and the `Authorization` credential built from the mini-app
//! init data. Transport owns nothing else: path joining, body decoding, and
//! failure normalization.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;
use url::Url;

use super::normalize::{TransportFailure, from_reqwest, normalize};
use super::schema::{IntoDomain, parse_response};
use crate::domain::{ApiError, NormalizedError, RequestId};

/// Header carrying the per-session request identifier.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Scheme prefix of the `Authorization` credential.
const AUTH_SCHEME: &str = "tma";

/// Failure to assemble an [`HttpApiClient`].
#[derive(Debug, Error)]
pub enum ClientSetupError {
    /// A default header cannot carry its value.
    #[error("{header} is not a valid header value: {source}")]
    InvalidHeader {
        /// Header being assembled.
        header: &'static str,
        /// Rejection reported by the header codec.
        #[source]
        source: InvalidHeaderValue,
    },
    /// The base URL cannot carry path segments.
    #[error("base URL cannot be used for API paths: {0}")]
    InvalidBaseUrl(Url),
    /// Reqwest refused the configuration.
    #[error("HTTP client could not be built: {0}")]
    Build(#[from] reqwest::Error),
}

/// Typed access to the REST service.
///
/// One instance serves every API port; clone the surrounding `Arc` rather
/// than building a second client, so the request identifier stays stable.
#[derive(Debug)]
pub struct HttpApiClient {
    client: Client,
    base_url: Url,
    request_id: RequestId,
}

impl HttpApiClient {
    /// Build a client with a freshly generated request identifier.
    /// ```rust,ignore
    /// let client = HttpApiClient::new(base_url, "query_id=...", Duration::from_secs(30))?;
    /// ```
    /// # Errors
    ///
    /// Returns [`ClientSetupError`] when the credential or base URL is
    /// unusable or reqwest cannot build its client.
    pub fn new(base_url: Url, init_data: &str, timeout: Duration) -> Result<Self, ClientSetupError> {
        Self::with_request_id(base_url, init_data, timeout, RequestId::generate())
    }

    /// Build a client that sends a fixed request identifier.
    ///
    /// # Errors
    ///
    /// See [`HttpApiClient::new`].
    pub fn with_request_id(
        base_url: Url,
        init_data: &str,
        timeout: Duration,
        request_id: RequestId,
    ) -> Result<Self, ClientSetupError> {
        if base_url.cannot_be_a_base() {
            return Err(ClientSetupError::InvalidBaseUrl(base_url));
        }
        let mut headers = HeaderMap::new();
        let mut credential = header_value("authorization", &format!("{AUTH_SCHEME} {init_data}"))?;
        credential.set_sensitive(true);
        headers.insert(AUTHORIZATION, credential);
        headers.insert(
            HeaderName::from_static(REQUEST_ID_HEADER),
            header_value(REQUEST_ID_HEADER, &request_id.to_string())?,
        );

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;
        debug!(base_url = %base_url, request_id = %request_id, "built API client");
        Ok(Self {
            client,
            base_url,
            request_id,
        })
    }

    /// Identifier sent with every request from this client.
    #[must_use]
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Root every relative path is resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve path segments against the base URL.
    ///
    /// An empty final segment yields a trailing slash. Segments are
    /// percent-encoded, so identifiers cannot escape their position.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, NormalizedError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                NormalizedError::request_setup(format!(
                    "base URL cannot carry a path: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Start a request to the given path.
    pub(crate) fn request(
        &self,
        method: Method,
        segments: &[&str],
    ) -> Result<RequestBuilder, NormalizedError> {
        Ok(self.client.request(method, self.endpoint(segments)?))
    }

    /// Send a request and convert its body through `D`.
    pub(crate) async fn call<D>(&self, request: RequestBuilder) -> Result<D::Output, ApiError>
    where
        D: DeserializeOwned + IntoDomain,
    {
        let body = self.send(request).await?;
        Ok(parse_response::<D>(&body)?)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>, NormalizedError> {
        let response = request
            .send()
            .await
            .map_err(|err| normalize(from_reqwest(&err)))?;
        let status = response.status();
        let url = response.url().clone();
        let body = response
            .bytes()
            .await
            .map_err(|err| normalize(from_reqwest(&err)))?;
        debug!(%url, status = status.as_u16(), bytes = body.len(), "API response");

        if !status.is_success() {
            return Err(normalize(TransportFailure::Response {
                status,
                body: body.as_ref(),
            }));
        }
        Ok(body.to_vec())
    }
}

fn header_value(header: &'static str, raw: &str) -> Result<HeaderValue, ClientSetupError> {
    HeaderValue::from_str(raw).map_err(|source| ClientSetupError::InvalidHeader { header, source })
}

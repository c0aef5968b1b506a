//! HTTP adapter for the REST service.
//!
//! One [`HttpApiClient`] implements every API port. Each resource lives in its
//! own module; decoding goes through wire DTOs and the schema gate.

mod client;
mod dto;
mod events;
mod files;
mod friends;
mod normalize;
mod profiles;
mod schema;

pub use client::{ClientSetupError, HttpApiClient, REQUEST_ID_HEADER};

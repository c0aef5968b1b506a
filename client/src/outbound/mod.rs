//! Outbound adapters implementing domain ports.
//!
//! - **http**: reqwest-backed client for the REST service
//! - **notifier**: notifications rendered as structured log records
//!
//! Adapters translate between domain types and wire representations. They
//! contain no business rules.

pub mod http;
pub mod notifier;

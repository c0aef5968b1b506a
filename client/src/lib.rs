//! Typed client for the Vstrecha event service.
//!
//! - `domain`: events, profiles, validation, ports, and list stores
//! - `outbound`: the reqwest adapter and a tracing-backed notifier
//! - `config`: OrthoConfig settings
//! - `session`: one client plus the event list stores built on it

pub mod config;
pub mod domain;
pub mod outbound;
pub mod session;

pub use config::ClientSettings;
pub use session::Session;

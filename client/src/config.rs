//! Client configuration loaded via OrthoConfig.
//!
//! Every field may come from `VSTRECHA_*` environment variables, a config
//! file, or CLI flags; accessors apply defaults for anything left unset.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::domain::EVENTS_PER_PAGE;

const DEFAULT_BASE_URL: &str = "https://max-total.ru/api/v1";
const DEFAULT_INVITE_LINK_BASE: &str = "https://t.me/stud_vstrecha_bot?startapp=";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration value that cannot be used.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// No init data was supplied.
    #[error("init data is required; set VSTRECHA_INIT_DATA")]
    MissingInitData,
    /// A URL setting does not parse.
    #[error("{field} is not a valid URL: {source}")]
    InvalidUrl {
        /// Name of the offending setting.
        field: &'static str,
        /// Parse failure.
        #[source]
        source: url::ParseError,
    },
}

/// Settings for reaching the REST service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "VSTRECHA")]
pub struct ClientSettings {
    /// Root of the REST API.
    pub base_url: Option<String>,
    /// Mini-app init data sent as the `tma` credential.
    pub init_data: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Items requested per list page.
    pub page_size: Option<u32>,
    /// Deep-link prefix that invitation tokens are appended to.
    pub invite_link_base: Option<String>,
}

impl ClientSettings {
    /// Parsed API root, falling back to the production service.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidUrl`] when the value does not parse.
    pub fn base_url(&self) -> Result<Url, SettingsError> {
        let raw = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        Url::parse(raw).map_err(|source| SettingsError::InvalidUrl {
            field: "base_url",
            source,
        })
    }

    /// The credential payload.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingInitData`] when unset or blank.
    pub fn init_data(&self) -> Result<&str, SettingsError> {
        self.init_data
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .ok_or(SettingsError::MissingInitData)
    }

    /// Request timeout, defaulting to thirty seconds.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS).max(1))
    }

    /// Page size, defaulting to [`EVENTS_PER_PAGE`].
    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(EVENTS_PER_PAGE).max(1)
    }

    /// Invitation link prefix, falling back to the production bot.
    pub fn invite_link_base(&self) -> &str {
        self.invite_link_base
            .as_deref()
            .unwrap_or(DEFAULT_INVITE_LINK_BASE)
    }
}

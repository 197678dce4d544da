//! # Client configuration — `storefront.toml`
//!
//! Fixed settings the client is built with. Nothing here is user input: the
//! backend address and the names of the persisted session entries are decided at
//! build/deploy time.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8000/api/"
//!
//! [session]
//! token_key = "token"
//! user_key = "user"
//! cookie_path = "/"
//! # cookie_max_age_secs = 604800   # omit for a browser-session cookie
//! ```
//!
//! All structs derive or implement `Default` with the production values, so a
//! missing or empty file is the default configuration.

use serde::{Deserialize, Serialize};

/// Top-level client configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Backend location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base address every endpoint path is resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:8000/api/".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Names and scope of the persisted session entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_token_key")]
    pub token_key: String,
    #[serde(default = "default_user_key")]
    pub user_key: String,
    #[serde(default = "default_cookie_path")]
    pub cookie_path: String,
    /// Cookie lifetime. `None` keeps the session until the browser closes.
    #[serde(default)]
    pub cookie_max_age_secs: Option<u64>,
}

fn default_token_key() -> String {
    "token".to_string()
}

fn default_user_key() -> String {
    "user".to_string()
}

fn default_cookie_path() -> String {
    "/".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_key: default_token_key(),
            user_key: default_user_key(),
            cookie_path: default_cookie_path(),
            cookie_max_age_secs: None,
        }
    }
}

impl ClientConfig {
    /// Builder method to point the client at another backend.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "storefront.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

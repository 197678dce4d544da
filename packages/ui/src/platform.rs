//! Platform-appropriate client construction.
//!
//! Returns an [`api::ApiClient`] over [`api::HttpTransport`] whose session
//! lives in:
//! - **Web** (WASM + `web` feature): cookies via [`store::CookieSessionStore`]
//! - **Native**: `<data_dir>/storefront/session.json` via [`store::FileSessionStore`]

use std::rc::Rc;

use api::{ApiClient, HttpTransport};
use store::ClientConfig;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformSessionStore = store::CookieSessionStore;
#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
pub type PlatformSessionStore = store::MemorySessionStore;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformSessionStore = store::FileSessionStore;

/// The client every view talks through. Cheap to clone.
pub type AppClient = ApiClient<HttpTransport, Rc<PlatformSessionStore>>;

pub fn make_client(config: &ClientConfig) -> AppClient {
    tracing::debug!(base_url = %config.api.base_url, "creating api client");
    ApiClient::new(
        HttpTransport::from_config(config),
        Rc::new(make_session_store(config)),
    )
}

#[cfg(all(target_arch = "wasm32", feature = "web"))]
fn make_session_store(config: &ClientConfig) -> PlatformSessionStore {
    store::CookieSessionStore::new(config.session.clone())
}

#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
fn make_session_store(_config: &ClientConfig) -> PlatformSessionStore {
    store::MemorySessionStore::new()
}

#[cfg(not(target_arch = "wasm32"))]
fn make_session_store(_config: &ClientConfig) -> PlatformSessionStore {
    store::FileSessionStore::new(data_dir())
}

#[cfg(not(target_arch = "wasm32"))]
fn data_dir() -> std::path::PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("storefront")
}

/// Configuration for this platform. `base_url_override` (usually baked in at
/// build time) wins over everything else. Native builds also read
/// `storefront.toml` from the data directory.
pub fn load_config(base_url_override: Option<&str>) -> ClientConfig {
    let config = read_config_file().unwrap_or_default();
    match base_url_override {
        Some(url) if !url.trim().is_empty() => config.with_base_url(url.trim()),
        _ => config,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn read_config_file() -> Option<ClientConfig> {
    let path = data_dir().join(ClientConfig::filename());
    let raw = std::fs::read_to_string(&path).ok()?;
    match ClientConfig::from_toml(&raw) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("ignoring unreadable {}: {e}", path.display());
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn read_config_file() -> Option<ClientConfig> {
    None
}

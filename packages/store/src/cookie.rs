//! # Cookie session store — browser-side persistence
//!
//! [`CookieSessionStore`] is the [`SessionStore`] used on the **web platform**. It
//! keeps the session in two first-party cookies so it survives page reloads and is
//! visible to every view in the tab:
//!
//! | Cookie (default name) | Value |
//! |-----------------------|-------|
//! | `token` | the bearer token, URI-encoded |
//! | `user` | the [`UserProfile`] as JSON, URI-encoded |
//!
//! Both are written with `path=/` so every route sees them. Names, path and
//! lifetime come from [`SessionConfig`].
//!
//! ## Atomicity
//!
//! A reader only reports a session when **both** cookies are present and the
//! profile parses. `set_session` writes the profile before the token and
//! `clear_session` removes the token first, so an interrupted write is read as
//! anonymous rather than as a token paired with the wrong profile.

use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

use crate::config::SessionConfig;
use crate::models::{Session, UserProfile};
use crate::session::SessionStore;

/// Cookie-backed SessionStore for the browser.
#[derive(Clone, Debug)]
pub struct CookieSessionStore {
    config: SessionConfig,
}

impl CookieSessionStore {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    fn document() -> Option<HtmlDocument> {
        web_sys::window()?.document()?.dyn_into::<HtmlDocument>().ok()
    }

    fn read(&self, name: &str) -> Option<String> {
        let jar = Self::document()?.cookie().ok()?;
        jar.split(';').find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            if key != name || value.is_empty() {
                return None;
            }
            js_sys::decode_uri_component(value).ok().map(String::from)
        })
    }

    fn write(&self, name: &str, value: &str) {
        let Some(doc) = Self::document() else {
            return;
        };
        let encoded = String::from(js_sys::encode_uri_component(value));
        let mut cookie = format!(
            "{name}={encoded}; path={}; SameSite=Lax",
            self.config.cookie_path
        );
        if let Some(secs) = self.config.cookie_max_age_secs {
            cookie.push_str(&format!("; max-age={secs}"));
        }
        if doc.set_cookie(&cookie).is_err() {
            tracing::warn!("Failed to write cookie {name}");
        }
    }

    fn remove(&self, name: &str) {
        let Some(doc) = Self::document() else {
            return;
        };
        let cookie = format!("{name}=; path={}; max-age=0", self.config.cookie_path);
        if doc.set_cookie(&cookie).is_err() {
            tracing::warn!("Failed to remove cookie {name}");
        }
    }
}

impl SessionStore for CookieSessionStore {
    fn get_session(&self) -> Option<Session> {
        let token = self.read(&self.config.token_key)?;
        let raw_user = self.read(&self.config.user_key)?;
        let user = serde_json::from_str::<UserProfile>(&raw_user).ok()?;
        Some(Session { token, user })
    }

    fn set_session(&self, token: &str, user: &UserProfile) {
        let raw_user = match serde_json::to_string(user) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to serialise user profile: {e}");
                return;
            }
        };
        self.write(&self.config.user_key, &raw_user);
        self.write(&self.config.token_key, token);
    }

    fn clear_session(&self) {
        self.remove(&self.config.token_key);
        self.remove(&self.config.user_key);
    }
}

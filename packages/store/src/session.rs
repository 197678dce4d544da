//! # SessionStore — the client's single source of truth for "who is logged in"
//!
//! Every back end implements the same three synchronous operations:
//!
//! | Method | Contract |
//! |--------|----------|
//! | [`get_session`](SessionStore::get_session) | Returns the stored [`Session`], or `None` for an anonymous visitor. Partial or unreadable entries read as `None`. |
//! | [`set_session`](SessionStore::set_session) | Replaces the token and profile in one step. |
//! | [`clear_session`](SessionStore::clear_session) | Removes both. Clearing an empty store is a no-op. |
//!
//! Reads never fail: a store that cannot be read degrades to "anonymous" and the
//! backend will ask the user to sign in again. Write failures are logged.
//!
//! Implementations: [`crate::MemorySessionStore`] (tests), [`crate::FileSessionStore`]
//! (native) and `CookieSessionStore` (browser, `web` feature).

use std::rc::Rc;
use std::sync::Arc;

use crate::models::{Session, UserProfile};

pub trait SessionStore {
    fn get_session(&self) -> Option<Session>;
    fn set_session(&self, token: &str, user: &UserProfile);
    fn clear_session(&self);

    /// Whether a session is present. Says nothing about whether the token is
    /// still accepted by the backend.
    fn is_authenticated(&self) -> bool {
        self.get_session().is_some()
    }

    /// The bearer token to attach to outgoing requests.
    fn token(&self) -> Option<String> {
        self.get_session().map(|s| s.token)
    }
}

impl<S: SessionStore + ?Sized> SessionStore for Rc<S> {
    fn get_session(&self) -> Option<Session> {
        (**self).get_session()
    }

    fn set_session(&self, token: &str, user: &UserProfile) {
        (**self).set_session(token, user)
    }

    fn clear_session(&self) {
        (**self).clear_session()
    }
}

impl<S: SessionStore + ?Sized> SessionStore for Arc<S> {
    fn get_session(&self) -> Option<Session> {
        (**self).get_session()
    }

    fn set_session(&self, token: &str, user: &UserProfile) {
        (**self).set_session(token, user)
    }

    fn clear_session(&self) {
        (**self).clear_session()
    }
}

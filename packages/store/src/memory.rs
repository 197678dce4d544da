use std::sync::{Arc, Mutex, PoisonError};

use crate::models::{Session, UserProfile};
use crate::session::SessionStore;

/// In-memory SessionStore for testing. Clones share the same slot, the way
/// every component in a browser tab shares one cookie jar.
#[derive(Clone, Debug, Default)]
pub struct MemorySessionStore {
    slot: Arc<Mutex<Option<Session>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that starts out signed in.
    pub fn signed_in(token: &str, user: UserProfile) -> Self {
        let store = Self::new();
        store.set_session(token, &user);
        store
    }
}

impl SessionStore for MemorySessionStore {
    fn get_session(&self) -> Option<Session> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_session(&self, token: &str, user: &UserProfile) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) =
            Some(Session::new(token, user.clone()));
    }

    fn clear_session(&self) {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}

//! Session context and hooks for the UI.

use dioxus::prelude::*;
use store::{ClientConfig, Session, SessionStore, UserProfile};

use crate::platform::{make_client, AppClient};

/// Reactive mirror of the session store. Components read this to decide what
/// to show; the store itself stays the source of truth.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub session: Option<Session>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.session.as_ref().map(|s| &s.user)
    }
}

/// Get the current session state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_session() -> Signal<SessionState> {
    use_context::<Signal<SessionState>>()
}

/// The shared API client.
pub fn use_client() -> AppClient {
    use_context::<AppClient>()
}

/// Re-read the store into the signal after anything that may have changed it.
pub fn sync_session(state: &mut Signal<SessionState>, client: &AppClient) {
    let session = client.session().get_session();
    if state.peek().session != session {
        state.set(SessionState { session });
    }
}

/// Provider component that owns the client and the session signal.
/// Wrap your app with this component.
#[component]
pub fn SessionProvider(config: ClientConfig, children: Element) -> Element {
    let client = use_context_provider(|| make_client(&config));
    use_context_provider(move || {
        let session = client.session().get_session();
        if let Some(session) = &session {
            tracing::debug!(username = %session.user.username, "restored session");
        }
        Signal::new(SessionState { session })
    });

    rsx! {
        {children}
    }
}

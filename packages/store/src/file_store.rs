//! # Filesystem-backed session store
//!
//! [`FileSessionStore`] keeps the session in a single JSON document so the token
//! and the profile are always replaced together. Used outside the browser
//! (native builds, local tooling).
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── session.json       # {"token": "...", "user": {...}}
//! ```
//!
//! Writes go to `session.json.tmp` first and are renamed into place, so a crash
//! mid-write leaves either the old session or the new one, never half of each.
//!
//! ## Platform data directories
//!
//! Use [`dirs::data_dir()`] to obtain a platform-appropriate base:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/storefront/` |
//! | Linux | `~/.local/share/storefront/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\storefront\` |

use std::path::PathBuf;

use crate::models::{Session, UserProfile};
use crate::session::SessionStore;

const SESSION_FILE: &str = "session.json";

/// Filesystem-backed SessionStore for native persistence.
#[derive(Clone, Debug)]
pub struct FileSessionStore {
    base: PathBuf,
}

impl FileSessionStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn session_path(&self) -> PathBuf {
        self.base.join(SESSION_FILE)
    }

    fn write(&self, session: &Session) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.base)?;
        let body = serde_json::to_vec_pretty(session)?;
        let tmp = self.base.join(format!("{SESSION_FILE}.tmp"));
        std::fs::write(&tmp, body)?;
        std::fs::rename(tmp, self.session_path())
    }
}

impl SessionStore for FileSessionStore {
    fn get_session(&self) -> Option<Session> {
        let raw = std::fs::read(self.session_path()).ok()?;
        match serde_json::from_slice(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!("Ignoring unreadable session file: {e}");
                None
            }
        }
    }

    fn set_session(&self, token: &str, user: &UserProfile) {
        let session = Session::new(token, user.clone());
        if let Err(e) = self.write(&session) {
            tracing::warn!("Failed to persist session: {e}");
        }
    }

    fn clear_session(&self) {
        match std::fs::remove_file(self.session_path()) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove session file: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "storefront_test_{}_{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    fn alice() -> UserProfile {
        UserProfile {
            id: 7,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            balance: Decimal::new(2550, 2),
        }
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = temp_dir("reopen");

        let store = FileSessionStore::new(dir.clone());
        store.set_session("tok-file", &alice());

        // Re-open from the same directory, like a page reload
        let reopened = FileSessionStore::new(dir.clone());
        let session = reopened.get_session().unwrap();
        assert_eq!(session.token, "tok-file");
        assert_eq!(session.user, alice());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_store_clear_is_idempotent() {
        let dir = temp_dir("clear");

        let store = FileSessionStore::new(dir.clone());
        store.clear_session();
        assert!(store.get_session().is_none());

        store.set_session("tok", &alice());
        store.clear_session();
        store.clear_session();
        assert!(store.get_session().is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_corrupt_file_reads_as_anonymous() {
        let dir = temp_dir("corrupt");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(SESSION_FILE), b"{ not json").unwrap();

        let store = FileSessionStore::new(dir.clone());
        assert!(store.get_session().is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }
}

//! # Users as they appear on the wire
//!
//! - [`UserRef`]: the `{id, username}` pair the backend nests inside products,
//!   comments, notifications and transactions. Some endpoints send only the
//!   primary key; that decodes to a `UserRef` with an empty username.
//! - [`Credentials`] / [`Registration`]: request bodies for `token/` and
//!   `register/`.
//! - [`AuthResponse`]: what both auth endpoints answer. Every field is optional
//!   because the backend variants disagree on which ones they send.

use serde::{Deserialize, Serialize};
use store::UserProfile;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireUserRef")]
pub struct UserRef {
    pub id: u64,
    pub username: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireUserRef {
    Nested {
        id: u64,
        #[serde(default)]
        username: String,
    },
    Id(u64),
}

impl From<WireUserRef> for UserRef {
    fn from(wire: WireUserRef) -> Self {
        match wire {
            WireUserRef::Nested { id, username } => Self { id, username },
            WireUserRef::Id(id) => Self {
                id,
                username: String::new(),
            },
        }
    }
}

impl From<&UserProfile> for UserRef {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.id,
            username: profile.username.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Sign-up form. `balance` is sent as typed so the backend's decimal
/// validator reports bad input, not the client.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub balance: String,
}

impl Registration {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.clone(), self.password.clone())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub refresh: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_ref_nested_or_bare_id() {
        let nested: UserRef = serde_json::from_str(r#"{"id": 2, "username": "alice"}"#).unwrap();
        assert_eq!(nested.username, "alice");

        let bare: UserRef = serde_json::from_str("7").unwrap();
        assert_eq!(bare, UserRef { id: 7, username: String::new() });
    }

    #[test]
    fn test_auth_response_without_user() {
        let response: AuthResponse =
            serde_json::from_str(r#"{"access": "a", "refresh": "r"}"#).unwrap();
        assert_eq!(response.access.as_deref(), Some("a"));
        assert!(response.user.is_none());
    }
}

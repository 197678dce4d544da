//! # Session models
//!
//! The two values the client persists between page loads:
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`UserProfile`] | The signed-in user's profile as returned by the backend at login or registration. Cached so the navbar and profile page can render without a round trip. |
//! | [`Session`] | The bearer token paired with that profile. Its presence is what "logged in" means for the client. |
//!
//! Both are `Serialize + Deserialize` because every back end stores them as JSON.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Profile of the authenticated user, cached next to the token.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    /// Wallet balance at the time the profile was cached.
    #[serde(default)]
    pub balance: Decimal,
}

/// An authenticated identity: the opaque credential plus the cached profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

impl Session {
    pub fn new(token: impl Into<String>, user: UserProfile) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserRef;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    #[default]
    Unread,
    Read,
}

/// A message addressed to the signed-in user. Only ever moves unread → read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireNotification")]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub from_user: Option<UserRef>,
    pub to_user: Option<UserRef>,
    pub status: NotificationStatus,
    pub created_at: Option<DateTime<Utc>>,
}

impl Notification {
    pub fn is_read(&self) -> bool {
        self.status == NotificationStatus::Read
    }
}

// Older backends send `is_read: bool` instead of `status`.
#[derive(Deserialize)]
struct WireNotification {
    id: u64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    from_user: Option<UserRef>,
    #[serde(default)]
    to_user: Option<UserRef>,
    #[serde(default)]
    status: Option<NotificationStatus>,
    #[serde(default)]
    is_read: Option<bool>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl From<WireNotification> for Notification {
    fn from(wire: WireNotification) -> Self {
        let status = wire.status.unwrap_or(match wire.is_read {
            Some(true) => NotificationStatus::Read,
            _ => NotificationStatus::Unread,
        });
        Self {
            id: wire.id,
            message: wire.message,
            from_user: wire.from_user,
            to_user: wire.to_user,
            status,
            created_at: wire.created_at,
        }
    }
}

/// Number of notifications still waiting for acknowledgement.
pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.is_read()).count()
}

use store::SessionStore;

use super::action::{authorize, require_loaded, settle, Action, ActionError};
use super::resource::Phase;
use crate::client::ApiClient;
use crate::models::Notification;
use crate::transport::Transport;

/// Acknowledge a notification. Returns `false` without a request when it is
/// already read; the caller reloads the list on `true`.
pub async fn mark_read<T: Transport, S: SessionStore>(
    client: &ApiClient<T, S>,
    phase: Phase,
    notification: &Notification,
) -> Result<bool, ActionError> {
    authorize(client.session(), Action::MarkRead)?;
    require_loaded(phase, Action::MarkRead)?;
    if notification.is_read() {
        return Ok(false);
    }
    client
        .mark_notification_read(notification.id)
        .await
        .map_err(|e| settle(client.session(), e))?;
    Ok(true)
}

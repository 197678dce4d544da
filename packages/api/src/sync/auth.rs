//! Session lifecycle: the only code that writes to the [`SessionStore`] besides
//! the 401 rule in [`super::action::settle`].

use store::{Session, SessionStore, UserProfile};

use super::action::{authorize, settle, Action, ActionError};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{AuthResponse, Credentials, Registration};
use crate::transport::Transport;

/// Exchange credentials for a token and store the session.
pub async fn login<T: Transport, S: SessionStore>(
    client: &ApiClient<T, S>,
    credentials: &Credentials,
) -> Result<Session, ActionError> {
    let response = client.login(credentials).await?;
    establish(client, response).await
}

/// Create an account and sign in. When the backend only acknowledges the
/// sign-up, log in with the same credentials.
pub async fn register<T: Transport, S: SessionStore>(
    client: &ApiClient<T, S>,
    form: &Registration,
) -> Result<Session, ActionError> {
    let response = client.register(form).await?;
    if response.access.is_some() {
        return establish(client, response).await;
    }
    tracing::debug!(username = %form.username, "registered without token, logging in");
    login(client, &form.credentials()).await
}

async fn establish<T: Transport, S: SessionStore>(
    client: &ApiClient<T, S>,
    response: AuthResponse,
) -> Result<Session, ActionError> {
    let token = response
        .access
        .ok_or_else(|| ApiError::Decode("auth response carried no access token".to_string()))?;
    let user = match response.user {
        Some(user) => user,
        None => client.current_user_with_token(&token).await?,
    };
    client.session().set_session(&token, &user);
    tracing::info!(username = %user.username, "signed in");
    Ok(Session::new(token, user))
}

/// Tell the backend, then forget the session whatever it answered.
pub async fn logout<T: Transport, S: SessionStore>(client: &ApiClient<T, S>) {
    if client.session().is_authenticated() {
        if let Err(e) = client.logout().await {
            tracing::warn!("logout request failed, clearing session anyway: {e}");
        }
    }
    client.session().clear_session();
    tracing::info!("signed out");
}

/// Re-read the signed-in user's profile and update the cached copy.
pub async fn refresh_profile<T: Transport, S: SessionStore>(
    client: &ApiClient<T, S>,
) -> Result<UserProfile, ActionError> {
    authorize(client.session(), Action::ViewAccount)?;
    let user = client
        .current_user()
        .await
        .map_err(|e| settle(client.session(), e))?;
    remember_user(client.session(), &user);
    Ok(user)
}

/// Replace the cached profile, keeping the stored token.
pub(crate) fn remember_user<S: SessionStore>(session: &S, user: &UserProfile) {
    // the token may have been cleared while the request was in flight
    if let Some(token) = session.token() {
        session.set_session(&token, user);
    }
}

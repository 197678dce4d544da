use store::SessionStore;

use super::resource::Phase;
use crate::error::{ApiError, FieldErrors};

/// Something a visitor asked for that may need an account: a mutation, or a
/// page the backend only serves to signed-in users.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Like,
    Comment,
    Buy,
    CreateProduct,
    DeleteProduct,
    MarkRead,
    ViewAccount,
    ViewProduct,
}

impl Action {
    /// Completes "Please login to ...".
    pub fn verb(self) -> &'static str {
        match self {
            Action::Like => "like products",
            Action::Comment => "add comments",
            Action::Buy => "buy products",
            Action::CreateProduct => "add products",
            Action::DeleteProduct => "delete products",
            Action::MarkRead => "manage notifications",
            Action::ViewAccount => "view your account",
            Action::ViewProduct => "view product details",
        }
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ActionError {
    #[error("please login to {}", .0.verb())]
    AuthenticationRequired(Action),
    #[error("cannot {} before the page has loaded", .0.verb())]
    NotReady(Action),
    #[error("{field}: {message}")]
    Invalid {
        field: &'static str,
        message: &'static str,
    },
    #[error("session expired")]
    SessionExpired,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// How a failure is shown. Every [`ActionError`] maps to exactly one.
#[derive(Clone, Debug, PartialEq)]
pub enum Feedback {
    /// Modal asking the visitor to sign in; the action is dropped.
    LoginPrompt(Action),
    /// Messages next to the offending inputs; the form keeps its values.
    Inline(FieldErrors),
    /// One-shot message.
    Notice(String),
    /// One-shot message for failures that may go away on their own.
    RetryNotice(String),
    /// The session was cleared; go to the login page.
    LoginRedirect,
}

impl ActionError {
    pub fn feedback(&self) -> Feedback {
        match self {
            ActionError::AuthenticationRequired(action) => Feedback::LoginPrompt(*action),
            ActionError::NotReady(action) => Feedback::Notice(format!(
                "Please wait for the page to load before you {}.",
                action.verb()
            )),
            ActionError::Invalid { field, message } => {
                Feedback::Inline(FieldErrors::single(field, message))
            }
            ActionError::SessionExpired => Feedback::LoginRedirect,
            ActionError::Api(err) => match err {
                ApiError::Validation(fields) => Feedback::Inline(fields.clone()),
                err if err.is_retryable() => Feedback::RetryNotice(err.user_message()),
                err => Feedback::Notice(err.user_message()),
            },
        }
    }
}

/// Refuse `action` up front when there is no session.
pub fn authorize<S: SessionStore>(session: &S, action: Action) -> Result<(), ActionError> {
    if !session.is_authenticated() {
        tracing::debug!(?action, "dropping action for anonymous visitor");
        return Err(ActionError::AuthenticationRequired(action));
    }
    Ok(())
}

/// Mutations of a resource are only offered once it has loaded.
pub fn require_loaded(phase: Phase, action: Action) -> Result<(), ActionError> {
    match phase {
        Phase::Loaded => Ok(()),
        _ => Err(ActionError::NotReady(action)),
    }
}

/// Classify a failed authenticated call. A 401 while a session is stored means
/// the token is no longer accepted: the session is cleared.
pub fn settle<S: SessionStore>(session: &S, err: ApiError) -> ActionError {
    if expire_on_rejection(session, &err) {
        ActionError::SessionExpired
    } else {
        ActionError::Api(err)
    }
}

/// Same rule for failed loads. Returns `true` when the session was cleared and
/// the view should send the visitor to the login page.
pub fn expire_on_rejection<S: SessionStore>(session: &S, err: &ApiError) -> bool {
    if err.is_unauthorized() && session.is_authenticated() {
        tracing::info!("token rejected by backend, clearing session");
        session.clear_session();
        return true;
    }
    false
}

/// What a failed load of a page behind `action` needs beyond its failed
/// state: a login redirect for a rejected token, or a login prompt when the
/// backend refuses an anonymous visitor.
pub fn load_rejection<S: SessionStore>(
    session: &S,
    err: &ApiError,
    action: Action,
) -> Option<Feedback> {
    if expire_on_rejection(session, err) {
        Some(Feedback::LoginRedirect)
    } else if err.is_unauthorized() {
        Some(Feedback::LoginPrompt(action))
    } else {
        None
    }
}

//! Per-view feedback: the login prompt, one-shot notices and inline field
//! errors. Every failure a view sees passes through [`ViewFeedback::apply`],
//! so nothing is dropped silently: field errors for inputs the view does not
//! render are turned into a notice.

use api::sync::{expire_on_rejection, load_rejection, Action, ActionError, Feedback};
use api::{ApiError, FieldErrors};
use dioxus::prelude::*;

use crate::platform::AppClient;
use crate::session::{sync_session, SessionState};
use crate::shell::NavTarget;

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub message: String,
    pub retryable: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewFeedback {
    pub login_prompt: Option<Action>,
    pub notice: Option<Notice>,
    pub field_errors: FieldErrors,
    /// Fields that have a [`FieldError`] under their input.
    rendered_fields: &'static [&'static str],
}

impl ViewFeedback {
    /// Feedback for a form that shows inline errors for `fields`.
    pub fn for_fields(fields: &'static [&'static str]) -> Self {
        Self {
            rendered_fields: fields,
            ..Self::default()
        }
    }

    pub fn clear(&mut self) {
        self.login_prompt = None;
        self.notice = None;
        self.field_errors = FieldErrors::new();
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice {
            message: message.into(),
            retryable: false,
        });
    }

    /// Record `feedback`. Returns `true` when the view must send the visitor to
    /// the login page.
    pub fn apply(&mut self, feedback: Feedback) -> bool {
        match feedback {
            Feedback::LoginPrompt(action) => self.login_prompt = Some(action),
            Feedback::Inline(errors) => self.show_inline(errors),
            Feedback::Notice(message) => self.info(message),
            Feedback::RetryNotice(message) => {
                self.notice = Some(Notice {
                    message,
                    retryable: true,
                })
            }
            Feedback::LoginRedirect => return true,
        }
        false
    }

    fn show_inline(&mut self, errors: FieldErrors) {
        let mut shown = FieldErrors::new();
        let mut unshown = FieldErrors::new();
        for field in errors.fields() {
            let target = if self.rendered_fields.iter().any(|f| *f == field) {
                &mut shown
            } else {
                &mut unshown
            };
            for message in errors.get(field) {
                target.push(field, message);
            }
        }
        if !unshown.is_empty() {
            self.info(unshown.to_string());
        }
        self.field_errors = shown;
    }
}

/// Show a failed action and follow a login redirect if it calls for one.
pub fn report_action_error(
    err: &ActionError,
    mut feedback: Signal<ViewFeedback>,
    mut session: Signal<SessionState>,
    client: &AppClient,
    on_navigate: EventHandler<NavTarget>,
) {
    tracing::debug!("action failed: {err}");
    if feedback.write().apply(err.feedback()) {
        sync_session(&mut session, client);
        on_navigate.call(NavTarget::Login);
    }
}

/// A failed load already sits in the view's resource; only a rejected token
/// needs extra handling.
pub fn report_load_error(
    err: &ApiError,
    mut session: Signal<SessionState>,
    client: &AppClient,
    on_navigate: EventHandler<NavTarget>,
) {
    if expire_on_rejection(client.session(), err) {
        sync_session(&mut session, client);
        on_navigate.call(NavTarget::Login);
    }
}

/// Like [`report_load_error`] for pages the backend may refuse to anonymous
/// visitors: such a refusal opens the login prompt for `action`.
pub fn report_members_load_error(
    err: &ApiError,
    action: Action,
    mut feedback: Signal<ViewFeedback>,
    mut session: Signal<SessionState>,
    client: &AppClient,
    on_navigate: EventHandler<NavTarget>,
) {
    let Some(rejection) = load_rejection(client.session(), err, action) else {
        return;
    };
    if feedback.write().apply(rejection) {
        sync_session(&mut session, client);
        on_navigate.call(NavTarget::Login);
    }
}

#[component]
pub fn NoticeBanner(mut feedback: Signal<ViewFeedback>) -> Element {
    let Some(notice) = feedback().notice else {
        return rsx! {};
    };
    let class = if notice.retryable {
        "notice notice-retry"
    } else {
        "notice"
    };

    rsx! {
        div {
            class,
            role: "alert",
            span { "{notice.message}" }
            if notice.retryable {
                span { class: "notice-hint", " Please try again." }
            }
            button {
                class: "notice-dismiss",
                r#type: "button",
                onclick: move |_| feedback.write().notice = None,
                "Dismiss"
            }
        }
    }
}

/// First server message for `field`, under its input.
#[component]
pub fn FieldError(feedback: Signal<ViewFeedback>, field: String) -> Element {
    let message = feedback().field_errors.first(&field).map(str::to_string);
    rsx! {
        if let Some(message) = message {
            div { class: "field-error", "{message}" }
        }
    }
}

use api::sync;
use api::Registration;
use dioxus::prelude::*;

use crate::feedback::{report_action_error, FieldError, NoticeBanner, ViewFeedback};
use crate::session::{sync_session, use_client, use_session};
use crate::shell::NavTarget;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Sign-up form. A successful registration signs the new user in.
#[component]
pub fn RegisterView(on_navigate: EventHandler<NavTarget>) -> Element {
    let client = use_client();
    let mut session = use_session();
    let mut form = use_signal(|| Registration {
        balance: "0.00".to_string(),
        ..Registration::default()
    });
    let mut feedback = use_signal(|| {
        ViewFeedback::for_fields(&[
            "username",
            "email",
            "password",
            "balance",
            "non_field_errors",
        ])
    });
    let mut busy = use_signal(|| false);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        let client = client.clone();
        let registration = form();
        spawn(async move {
            feedback.write().clear();
            busy.set(true);
            match sync::auth::register(&client, &registration).await {
                Ok(_) => {
                    sync_session(&mut session, &client);
                    on_navigate.call(NavTarget::Home);
                }
                Err(err) => report_action_error(&err, feedback, session, &client, on_navigate),
            }
            busy.set(false);
        });
    };

    let current = form();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "auth-page",
            form {
                class: "auth-card",
                onsubmit: on_submit,
                h1 { class: "view-title", "Register" }
                NoticeBanner { feedback }

                label { class: "form-label", r#for: "register-username", "Username" }
                input {
                    id: "register-username",
                    class: "form-input",
                    r#type: "text",
                    autocomplete: "username",
                    required: true,
                    value: "{current.username}",
                    oninput: move |evt: FormEvent| form.write().username = evt.value(),
                }
                FieldError { feedback, field: "username" }

                label { class: "form-label", r#for: "register-email", "Email" }
                input {
                    id: "register-email",
                    class: "form-input",
                    r#type: "email",
                    autocomplete: "email",
                    required: true,
                    value: "{current.email}",
                    oninput: move |evt: FormEvent| form.write().email = evt.value(),
                }
                FieldError { feedback, field: "email" }

                label { class: "form-label", r#for: "register-password", "Password" }
                input {
                    id: "register-password",
                    class: "form-input",
                    r#type: "password",
                    autocomplete: "new-password",
                    required: true,
                    value: "{current.password}",
                    oninput: move |evt: FormEvent| form.write().password = evt.value(),
                }
                FieldError { feedback, field: "password" }

                label { class: "form-label", r#for: "register-balance", "Starting balance" }
                input {
                    id: "register-balance",
                    class: "form-input",
                    r#type: "number",
                    min: "0",
                    step: "0.01",
                    value: "{current.balance}",
                    oninput: move |evt: FormEvent| form.write().balance = evt.value(),
                }
                FieldError { feedback, field: "balance" }
                FieldError { feedback, field: "non_field_errors" }

                button {
                    class: "btn btn-primary btn-block",
                    r#type: "submit",
                    disabled: busy(),
                    if busy() { "Creating account..." } else { "Register" }
                }
                p {
                    class: "view-muted",
                    "Already registered? "
                    button {
                        class: "btn-link",
                        r#type: "button",
                        onclick: move |_| on_navigate.call(NavTarget::Login),
                        "Login"
                    }
                }
            }
        }
    }
}

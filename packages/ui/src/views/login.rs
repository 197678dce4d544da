use api::sync;
use api::Credentials;
use dioxus::prelude::*;

use crate::feedback::{report_action_error, FieldError, NoticeBanner, ViewFeedback};
use crate::session::{sync_session, use_client, use_session};
use crate::shell::NavTarget;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

#[component]
pub fn LoginView(on_navigate: EventHandler<NavTarget>) -> Element {
    let client = use_client();
    let mut session = use_session();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut feedback =
        use_signal(|| ViewFeedback::for_fields(&["username", "password", "non_field_errors"]));
    let mut busy = use_signal(|| false);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        let client = client.clone();
        let credentials = Credentials::new(username(), password());
        spawn(async move {
            feedback.write().clear();
            busy.set(true);
            match sync::auth::login(&client, &credentials).await {
                Ok(_) => {
                    sync_session(&mut session, &client);
                    on_navigate.call(NavTarget::Home);
                }
                Err(err) => {
                    password.set(String::new());
                    report_action_error(&err, feedback, session, &client, on_navigate);
                }
            }
            busy.set(false);
        });
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "auth-page",
            form {
                class: "auth-card",
                onsubmit: on_submit,
                h1 { class: "view-title", "Login" }
                NoticeBanner { feedback }
                label { class: "form-label", r#for: "login-username", "Username" }
                input {
                    id: "login-username",
                    class: "form-input",
                    r#type: "text",
                    autocomplete: "username",
                    required: true,
                    value: "{username}",
                    oninput: move |evt: FormEvent| username.set(evt.value()),
                }
                FieldError { feedback, field: "username" }
                label { class: "form-label", r#for: "login-password", "Password" }
                input {
                    id: "login-password",
                    class: "form-input",
                    r#type: "password",
                    autocomplete: "current-password",
                    required: true,
                    value: "{password}",
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }
                FieldError { feedback, field: "password" }
                FieldError { feedback, field: "non_field_errors" }
                button {
                    class: "btn btn-primary btn-block",
                    r#type: "submit",
                    disabled: busy(),
                    if busy() { "Signing in..." } else { "Login" }
                }
                p {
                    class: "view-muted",
                    "No account yet? "
                    button {
                        class: "btn-link",
                        r#type: "button",
                        onclick: move |_| on_navigate.call(NavTarget::Register),
                        "Register"
                    }
                }
            }
        }
    }
}

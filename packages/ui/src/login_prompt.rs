use api::sync::Action;
use dioxus::prelude::*;

use crate::modal::Modal;
use crate::shell::NavTarget;

/// Shown when an anonymous visitor tries something that needs an account.
#[component]
pub fn LoginPrompt(
    action: Action,
    on_close: EventHandler<()>,
    on_navigate: EventHandler<NavTarget>,
) -> Element {
    let verb = action.verb();
    rsx! {
        Modal {
            title: "Login Required",
            on_close,
            p { class: "modal-body", "Please login to {verb}." }
            div {
                class: "modal-footer",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| on_close.call(()),
                    "Close"
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| on_navigate.call(NavTarget::Login),
                    "Login"
                }
            }
        }
    }
}

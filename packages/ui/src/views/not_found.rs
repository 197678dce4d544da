use dioxus::prelude::*;

use crate::shell::NavTarget;

#[component]
pub fn NotFoundView(path: String, on_navigate: EventHandler<NavTarget>) -> Element {
    rsx! {
        div {
            class: "empty-state",
            h1 { class: "view-title", "Page not found" }
            p { class: "view-muted", "Nothing lives at /{path}." }
            button {
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| on_navigate.call(NavTarget::Home),
                "Back to products"
            }
        }
    }
}

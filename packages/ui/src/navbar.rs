use api::sync;
use dioxus::prelude::*;

use crate::session::{sync_session, use_client, use_session};
use crate::shell::{nav_items, NavTarget};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Top bar with the affordances for the current session.
#[component]
pub fn Navbar(on_navigate: EventHandler<NavTarget>) -> Element {
    let mut session = use_session();
    let client = use_client();
    let state = session();

    let logout = use_callback(move |_: ()| {
        let client = client.clone();
        spawn(async move {
            sync::auth::logout(&client).await;
            sync_session(&mut session, &client);
            on_navigate.call(NavTarget::Login);
        });
    });

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        nav {
            class: "navbar",
            button {
                class: "navbar-brand",
                r#type: "button",
                onclick: move |_| on_navigate.call(NavTarget::Home),
                "Marketplace"
            }
            div {
                class: "navbar-links",
                for item in nav_items(state.is_authenticated()) {
                    if let Some(target) = item.target {
                        button {
                            key: "{item.label}",
                            class: "navbar-link",
                            r#type: "button",
                            onclick: move |_| on_navigate.call(target),
                            "{item.label}"
                        }
                    } else {
                        button {
                            key: "{item.label}",
                            class: "navbar-link navbar-logout",
                            r#type: "button",
                            onclick: move |_| logout.call(()),
                            "{item.label}"
                        }
                    }
                }
            }
            if let Some(user) = state.user() {
                span {
                    class: "navbar-user",
                    "{user.username} · ${user.balance}"
                }
            }
        }
    }
}

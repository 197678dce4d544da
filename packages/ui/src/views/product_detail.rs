use api::sync::{self, Action, ResourceCell};
use api::Product;
use dioxus::prelude::*;

use crate::feedback::{
    report_action_error, report_members_load_error, FieldError, NoticeBanner, ViewFeedback,
};
use crate::login_prompt::LoginPrompt;
use crate::session::{sync_session, use_client, use_session};
use crate::shell::NavTarget;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// One product with its comments, like toggle, purchase and (for the owner)
/// delete. Every successful action reloads the product from the backend.
#[component]
pub fn ProductDetailView(id: u64, on_navigate: EventHandler<NavTarget>) -> Element {
    let client = use_client();
    let mut session = use_session();
    let mut product = use_signal(ResourceCell::<Product>::new);
    let mut comment = use_signal(String::new);
    let mut feedback = use_signal(|| ViewFeedback::for_fields(&["content"]));
    let mut busy = use_signal(|| false);

    let load = {
        let client = client.clone();
        use_callback(move |id: u64| {
            let client = client.clone();
            let ticket = product.write().begin_load();
            spawn(async move {
                let result = client.product(id).await;
                if let Err(err) = &result {
                    report_members_load_error(
                        err,
                        Action::ViewProduct,
                        feedback,
                        session,
                        &client,
                        on_navigate,
                    );
                }
                product.write().finish_load(ticket, result);
            });
        })
    };

    // reload when the route switches to another product
    use_effect(use_reactive(&id, move |id| load.call(id)));

    let on_like = {
        let client = client.clone();
        move |_| {
            let client = client.clone();
            let phase = product.peek().phase();
            spawn(async move {
                feedback.write().clear();
                match sync::products::toggle_like(&client, phase, id).await {
                    Ok(_) => load.call(id),
                    Err(err) => report_action_error(&err, feedback, session, &client, on_navigate),
                }
            });
        }
    };

    let on_buy = {
        let client = client.clone();
        move |_| {
            let client = client.clone();
            let phase = product.peek().phase();
            spawn(async move {
                feedback.write().clear();
                busy.set(true);
                match sync::products::buy(&client, phase, id).await {
                    Ok(receipt) => {
                        sync_session(&mut session, &client);
                        feedback
                            .write()
                            .info(receipt.message.unwrap_or_else(|| "Product purchased successfully!".to_string()));
                        load.call(id);
                    }
                    Err(err) => report_action_error(&err, feedback, session, &client, on_navigate),
                }
                busy.set(false);
            });
        }
    };

    let on_delete = {
        let client = client.clone();
        move |_| {
            let client = client.clone();
            let phase = product.peek().phase();
            spawn(async move {
                feedback.write().clear();
                match sync::products::delete_product(&client, phase, id).await {
                    Ok(()) => on_navigate.call(NavTarget::Home),
                    Err(err) => report_action_error(&err, feedback, session, &client, on_navigate),
                }
            });
        }
    };

    let on_comment = {
        let client = client.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let client = client.clone();
            let phase = product.peek().phase();
            let text = comment();
            spawn(async move {
                feedback.write().clear();
                match sync::products::submit_comment(&client, phase, id, &text).await {
                    Ok(()) => {
                        comment.set(String::new());
                        load.call(id);
                    }
                    Err(err) => report_action_error(&err, feedback, session, &client, on_navigate),
                }
            });
        }
    };

    let cell = product.read();
    let prompt = feedback().login_prompt;

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "view-page",
            NoticeBanner { feedback }

            if let Some(err) = cell.state().error() {
                div {
                    class: "empty-state",
                    p { "Could not load this product. " {err.user_message()} }
                    if err.is_unauthorized() {
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: move |_| on_navigate.call(NavTarget::Login),
                            "Login"
                        }
                    } else {
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| load.call(id),
                            "Retry"
                        }
                    }
                }
            } else if let Some(p) = cell.state().value() {
                div {
                    class: "detail-grid",
                    if let Some(image) = &p.image {
                        img { class: "detail-image", src: "{image}", alt: "{p.name}" }
                    }
                    div {
                        h1 { class: "view-title", "{p.name}" }
                        p { class: "view-muted", "By {p.owner.username}" }
                        p { class: "product-price", "${p.price}" }
                        p { class: "detail-description", "{p.description}" }
                        div {
                            class: "detail-actions",
                            button {
                                class: if p.is_liked_by_current_user { "btn btn-liked" } else { "btn btn-secondary" },
                                r#type: "button",
                                onclick: on_like,
                                if p.is_liked_by_current_user { "♥ Liked ({p.like_count})" } else { "♡ Like ({p.like_count})" }
                            }
                            if p.is_owner {
                                button {
                                    class: "btn btn-danger",
                                    r#type: "button",
                                    onclick: on_delete,
                                    "Delete"
                                }
                            } else {
                                button {
                                    class: "btn btn-success",
                                    r#type: "button",
                                    disabled: busy(),
                                    onclick: on_buy,
                                    if busy() { "Buying..." } else { "Buy Now" }
                                }
                            }
                        }
                    }
                }

                div {
                    class: "comments",
                    h2 { class: "view-section-title", "Comments ({p.comment_count})" }
                    form {
                        class: "comment-form",
                        onsubmit: on_comment,
                        textarea {
                            class: "form-input",
                            rows: "3",
                            placeholder: "Add a comment...",
                            value: "{comment}",
                            oninput: move |evt: FormEvent| comment.set(evt.value()),
                        }
                        FieldError { feedback, field: "content" }
                        button { class: "btn btn-primary", r#type: "submit", "Post Comment" }
                    }
                    if p.comments.is_empty() {
                        p { class: "view-muted", "No comments yet." }
                    }
                    for c in p.comments.iter() {
                        div {
                            key: "{c.id}",
                            class: "comment-card",
                            h4 { class: "comment-author", "{c.author.username}" }
                            p { "{c.content}" }
                            if let Some(at) = c.created_at {
                                small { class: "view-muted", {at.format("%Y-%m-%d %H:%M").to_string()} }
                            }
                        }
                    }
                }
            } else {
                p { class: "view-muted", "Loading..." }
            }
        }

        if let Some(action) = prompt {
            LoginPrompt {
                action,
                on_close: move |_| feedback.write().login_prompt = None,
                on_navigate,
            }
        }
    }
}

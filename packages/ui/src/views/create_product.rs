use api::sync;
use api::{FilePart, NewProduct};
use dioxus::prelude::*;

use crate::feedback::{report_action_error, FieldError, NoticeBanner, ViewFeedback};
use crate::login_prompt::LoginPrompt;
use crate::session::{use_client, use_session};
use crate::shell::NavTarget;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Add-product form. On failure the typed values stay put so the user can fix
/// the flagged fields and resubmit.
#[component]
pub fn CreateProductView(on_navigate: EventHandler<NavTarget>) -> Element {
    let client = use_client();
    let session = use_session();
    let mut form = use_signal(NewProduct::default);
    let mut feedback = use_signal(|| {
        ViewFeedback::for_fields(&["name", "desc", "price", "image", "non_field_errors"])
    });
    let mut busy = use_signal(|| false);

    let on_image = move |evt: FormEvent| async move {
        let Some(engine) = evt.files() else {
            return;
        };
        let Some(name) = engine.files().into_iter().next() else {
            form.write().image = None;
            return;
        };
        match engine.read_file(&name).await {
            Some(bytes) => form.write().image = Some(FilePart::new(name, bytes)),
            None => {
                tracing::warn!(file = %name, "could not read selected image");
                feedback.write().info("Could not read the selected image.");
            }
        }
    };

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        let client = client.clone();
        let product = form();
        spawn(async move {
            feedback.write().clear();
            busy.set(true);
            match sync::products::create_product(&client, &product).await {
                Ok(()) => on_navigate.call(NavTarget::Home),
                Err(err) => report_action_error(&err, feedback, session, &client, on_navigate),
            }
            busy.set(false);
        });
    };

    let current = form();
    let prompt = feedback().login_prompt;

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "view-page",
            form {
                class: "form-card",
                onsubmit: on_submit,
                h1 { class: "view-title", "Add Product" }
                NoticeBanner { feedback }

                label { class: "form-label", r#for: "product-name", "Name" }
                input {
                    id: "product-name",
                    class: "form-input",
                    r#type: "text",
                    required: true,
                    value: "{current.name}",
                    oninput: move |evt: FormEvent| form.write().name = evt.value(),
                }
                FieldError { feedback, field: "name" }

                label { class: "form-label", r#for: "product-description", "Description" }
                textarea {
                    id: "product-description",
                    class: "form-input",
                    rows: "4",
                    value: "{current.description}",
                    oninput: move |evt: FormEvent| form.write().description = evt.value(),
                }
                FieldError { feedback, field: "desc" }

                label { class: "form-label", r#for: "product-price", "Price" }
                input {
                    id: "product-price",
                    class: "form-input",
                    r#type: "number",
                    min: "0",
                    step: "0.01",
                    required: true,
                    value: "{current.price}",
                    oninput: move |evt: FormEvent| form.write().price = evt.value(),
                }
                FieldError { feedback, field: "price" }

                label { class: "form-label", r#for: "product-image", "Image" }
                input {
                    id: "product-image",
                    class: "form-input",
                    r#type: "file",
                    accept: "image/*",
                    onchange: on_image,
                }
                if let Some(image) = &current.image {
                    p { class: "view-muted", "Selected: {image.file_name}" }
                }
                FieldError { feedback, field: "image" }
                FieldError { feedback, field: "non_field_errors" }

                div {
                    class: "form-actions",
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| on_navigate.call(NavTarget::Home),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: busy(),
                        if busy() { "Saving..." } else { "Add Product" }
                    }
                }
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

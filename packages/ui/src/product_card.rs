use api::Product;
use dioxus::prelude::*;

use crate::shell::NavTarget;

/// One listing on the home page grid.
#[component]
pub fn ProductCard(product: Product, on_navigate: EventHandler<NavTarget>) -> Element {
    let target = NavTarget::Product(product.id);
    let summary = product.summary(100);

    rsx! {
        div {
            class: "product-card",
            if let Some(image) = &product.image {
                img {
                    class: "product-card-image",
                    src: "{image}",
                    alt: "{product.name}",
                }
            }
            div {
                class: "product-card-body",
                h3 { class: "product-card-title", "{product.name}" }
                p { class: "view-muted", "By {product.owner.username}" }
                p { class: "product-card-text", "{summary}" }
                div {
                    class: "product-card-footer",
                    span { class: "product-price", "${product.price}" }
                    span { class: "view-muted", "♥ {product.like_count} · 💬 {product.comment_count}" }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| on_navigate.call(target),
                    "View Details"
                }
            }
        }
    }
}

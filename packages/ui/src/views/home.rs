use api::sync::{listing_view, ListingView, ResourceCell};
use api::Product;
use dioxus::prelude::*;

use crate::feedback::report_load_error;
use crate::product_card::ProductCard;
use crate::session::{use_client, use_session};
use crate::shell::NavTarget;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Public product listing with a client-side search box.
#[component]
pub fn HomeView(on_navigate: EventHandler<NavTarget>) -> Element {
    let client = use_client();
    let session = use_session();
    let mut products = use_signal(ResourceCell::<Vec<Product>>::new);
    let mut search = use_signal(String::new);

    let load = use_callback(move |_: ()| {
        let client = client.clone();
        let ticket = products.write().begin_load();
        spawn(async move {
            let result = client.public_products().await;
            if let Err(err) = &result {
                report_load_error(err, session, &client, on_navigate);
            }
            products.write().finish_load(ticket, result);
        });
    });

    use_effect(move || load.call(()));

    let cell = products.read();
    let query = search();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "view-page",
            div {
                class: "view-header",
                h1 { class: "view-title", "Products" }
                input {
                    class: "search-input",
                    r#type: "search",
                    placeholder: "Search by product or seller",
                    value: "{query}",
                    oninput: move |evt: FormEvent| search.set(evt.value()),
                }
            }

            {match listing_view(cell.state(), &query) {
                ListingView::Loading => rsx! {
                    p { class: "view-muted", "Loading products..." }
                },
                ListingView::Empty => rsx! {
                    div {
                        class: "empty-state",
                        p { "No products available yet." }
                    }
                },
                ListingView::NoMatches => rsx! {
                    div {
                        class: "empty-state",
                        p { "No products match \"{query}\"." }
                    }
                },
                ListingView::Failed(err) => rsx! {
                    div {
                        class: "empty-state",
                        p { "Could not load products. " {err.user_message()} }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| load.call(()),
                            "Retry"
                        }
                    }
                },
                ListingView::Items(items) => rsx! {
                    div {
                        class: "product-grid",
                        for product in items {
                            ProductCard {
                                key: "{product.id}",
                                product: product.clone(),
                                on_navigate,
                            }
                        }
                    }
                },
            }}
        }
    }
}

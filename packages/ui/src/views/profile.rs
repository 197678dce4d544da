use api::sync::{load_profile, ProfileData, ResourceCell};
use api::{Transaction, TransactionKind};
use dioxus::prelude::*;

use crate::feedback::report_load_error;
use crate::product_card::ProductCard;
use crate::session::{sync_session, use_client, use_session};
use crate::shell::NavTarget;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Account page: the user, their listings and wallet history, loaded as one
/// resource. The cached user is shown until the fresh copy arrives.
#[component]
pub fn ProfileView(on_navigate: EventHandler<NavTarget>) -> Element {
    let client = use_client();
    let mut session = use_session();
    let mut data = use_signal(ResourceCell::<ProfileData>::new);

    let load = use_callback(move |_: ()| {
        let client = client.clone();
        let ticket = data.write().begin_load();
        spawn(async move {
            let result = load_profile(&client).await;
            match &result {
                Ok(_) => sync_session(&mut session, &client),
                Err(err) => report_load_error(err, session, &client, on_navigate),
            }
            data.write().finish_load(ticket, result);
        });
    });

    use_effect(move || load.call(()));

    let cell = data.read();
    let user = match cell.state().value() {
        Some(profile) => Some(profile.user.clone()),
        None => session().user().cloned(),
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "view-page",

            if let Some(user) = user {
                div {
                    class: "profile-card",
                    h1 { class: "view-title", "{user.username}" }
                    p { class: "view-muted", "{user.email}" }
                    p { class: "profile-balance", "Balance: ${user.balance}" }
                }
            }

            if let Some(err) = cell.state().error() {
                div {
                    class: "empty-state",
                    p { "Could not load your account. " {err.user_message()} }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| load.call(()),
                        "Retry"
                    }
                }
            } else if let Some(profile) = cell.state().value() {
                h2 { class: "view-section-title", "My Products" }
                if profile.products.is_empty() {
                    div {
                        class: "empty-state",
                        p { "You have not listed any products yet." }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: move |_| on_navigate.call(NavTarget::AddProduct),
                            "Add Product"
                        }
                    }
                } else {
                    div {
                        class: "product-grid",
                        for product in profile.products.iter() {
                            ProductCard {
                                key: "{product.id}",
                                product: product.clone(),
                                on_navigate,
                            }
                        }
                    }
                }

                h2 { class: "view-section-title", "Transactions" }
                if profile.transactions.is_empty() {
                    p { class: "view-muted", "No transactions yet." }
                } else {
                    table {
                        class: "tx-table",
                        thead {
                            tr {
                                th { "Date" }
                                th { "Type" }
                                th { "With" }
                                th { "Amount" }
                            }
                        }
                        tbody {
                            for tx in profile.transactions.iter() {
                                TransactionRow { key: "{tx.id}", tx: tx.clone() }
                            }
                        }
                    }
                }
            } else {
                p { class: "view-muted", "Loading your account..." }
            }
        }
    }
}

#[component]
fn TransactionRow(tx: Transaction) -> Element {
    let (label, class, other) = match tx.kind {
        TransactionKind::Deposit => ("Sale", "tx-amount tx-in", &tx.sender),
        TransactionKind::Withdraw => ("Purchase", "tx-amount tx-out", &tx.receiver),
    };
    let date = tx
        .created_at
        .map(|at| at.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let amount = tx.signed_amount();
    let amount = if amount.is_sign_negative() {
        amount.to_string()
    } else {
        format!("+{amount}")
    };

    rsx! {
        tr {
            td { "{date}" }
            td { "{label}" }
            td { "{other.username}" }
            td { class, "{amount}" }
        }
    }
}

//! # API crate: the storefront's REST client and data-sync layer
//!
//! Everything a view needs to talk to the backend, independent of Dioxus.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`transport`] | `ApiRequest`/`RawResponse` and the [`Transport`] trait |
//! | [`http`] | [`HttpTransport`], the reqwest implementation used in the browser |
//! | [`client`] | [`ApiClient`]: bearer injection, status mapping, body decoding |
//! | [`endpoints`] | One typed method per backend route |
//! | [`models`] | Wire types: products, comments, notifications, transactions, auth payloads |
//! | [`error`] | [`ApiError`] and [`FieldErrors`] |
//! | [`sync`] | Resource state machine, mutation gating and the session lifecycle |
//!
//! ## Request path
//!
//! A view calls a [`sync`] function (or an endpoint directly for plain loads),
//! which goes through [`ApiClient::execute`]: the token from the
//! [`store::SessionStore`] is attached, the transport sends the request once,
//! and the response becomes either decoded data or an [`ApiError`].

pub mod client;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod models;
pub mod sync;
pub mod transport;

#[cfg(test)]
mod testing;

pub use client::ApiClient;
pub use error::{ApiError, FieldErrors};
pub use http::HttpTransport;
pub use models::{
    Comment, Credentials, NewProduct, Notification, NotificationStatus, Product, ProductQuery,
    Registration, Transaction, TransactionKind, UserRef,
};
pub use transport::{ApiRequest, FilePart, Method, Transport};

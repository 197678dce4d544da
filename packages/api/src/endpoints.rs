//! Typed wrappers around the backend routes.
//!
//! Paths are relative to the configured base address. Which calls need a
//! session is up to the backend; the client simply attaches the token whenever
//! one is stored.

use serde_json::json;
use store::{SessionStore, UserProfile};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{
    AuthResponse, Credentials, LikeStatus, NewProduct, Notification, Product, ProductQuery,
    PurchaseReceipt, Registration, Transaction,
};
use crate::transport::{ApiRequest, Transport};

impl<T: Transport, S: SessionStore> ApiClient<T, S> {
    // -- auth --

    /// `POST register/`. Backends that only acknowledge the sign-up answer
    /// without a token; the result is then an empty [`AuthResponse`].
    pub async fn register(&self, form: &Registration) -> Result<AuthResponse, ApiError> {
        self.fetch_or_default(ApiRequest::post("register/").json(form)?)
            .await
    }

    /// `POST token/`.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        self.fetch(ApiRequest::post("token/").json(credentials)?).await
    }

    /// `GET auth/user/` with the stored session.
    pub async fn current_user(&self) -> Result<UserProfile, ApiError> {
        self.fetch(ApiRequest::get("auth/user/")).await
    }

    /// `GET auth/user/` with a token that is not stored yet.
    pub async fn current_user_with_token(&self, token: &str) -> Result<UserProfile, ApiError> {
        self.fetch(ApiRequest::get("auth/user/").bearer(token)).await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.send(ApiRequest::post("logout/")).await
    }

    // -- products --

    pub async fn public_products(&self) -> Result<Vec<Product>, ApiError> {
        self.fetch_list(ApiRequest::get("products/public/")).await
    }

    pub async fn products(&self, query: &ProductQuery) -> Result<Vec<Product>, ApiError> {
        let mut request = ApiRequest::get("products/");
        request.query = query.to_query();
        self.fetch_list(request).await
    }

    pub async fn product(&self, id: u64) -> Result<Product, ApiError> {
        self.fetch(ApiRequest::get(format!("products/{id}/"))).await
    }

    pub async fn create_product(&self, product: &NewProduct) -> Result<(), ApiError> {
        self.send(ApiRequest::post("products/create/").multipart(product.to_form()))
            .await
    }

    pub async fn delete_product(&self, id: u64) -> Result<(), ApiError> {
        self.send(ApiRequest::delete(format!("products/{id}/"))).await
    }

    /// Flip the current user's like. The backend decides the direction.
    pub async fn toggle_like(&self, id: u64) -> Result<LikeStatus, ApiError> {
        self.fetch_or_default(ApiRequest::post(format!("products/{id}/like/")))
            .await
    }

    pub async fn add_comment(&self, id: u64, content: &str) -> Result<(), ApiError> {
        let request = ApiRequest::post(format!("products/{id}/comment/"))
            .json(&json!({ "content": content, "product": id }))?;
        self.send(request).await
    }

    pub async fn buy(&self, id: u64) -> Result<PurchaseReceipt, ApiError> {
        self.fetch_or_default(ApiRequest::post(format!("products/{id}/buy/")))
            .await
    }

    // -- notifications & wallet --

    pub async fn notifications(&self) -> Result<Vec<Notification>, ApiError> {
        self.fetch_list(ApiRequest::get("notifications/")).await
    }

    pub async fn mark_notification_read(&self, id: u64) -> Result<(), ApiError> {
        self.send(ApiRequest::post(format!("notifications/{id}/read/")))
            .await
    }

    pub async fn transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        self.fetch_list(ApiRequest::get("transactions/")).await
    }
}

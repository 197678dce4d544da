//! # Products and comments
//!
//! [`Product`] is a read-only snapshot of one listing as seen by the current
//! user. The per-viewer fields (`is_liked_by_current_user`, `is_owner`) and the
//! counters are only meaningful for the session that fetched them, so views
//! re-fetch after every mutation instead of editing a snapshot in place.
//!
//! [`NewProduct`] is the create form; it always goes out as multipart because
//! the image travels in the same request as the scalar fields.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::user::UserRef;
use crate::transport::{FilePart, MultipartForm};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    #[serde(rename = "desc", default)]
    pub description: String,
    pub price: Decimal,
    /// Absolute or backend-relative image URL.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(rename = "user")]
    pub owner: UserRef,
    #[serde(default)]
    pub like_count: u32,
    #[serde(default)]
    pub comment_count: u32,
    #[serde(rename = "is_liked_by_user", default)]
    pub is_liked_by_current_user: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_owner: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Oldest first, as the backend orders them.
    #[serde(default)]
    pub comments: Vec<Comment>,
}

// `is_owner` is `null` for anonymous viewers on some backend versions.
fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

impl Product {
    /// Description cut to `max_chars`, for cards.
    pub fn summary(&self, max_chars: usize) -> String {
        let text = self.description.trim();
        if text.chars().count() <= max_chars {
            return text.to_string();
        }
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut.trim_end())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub content: String,
    #[serde(rename = "user")]
    pub author: UserRef,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Server-side filters for `GET products/`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductQuery {
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// Only the signed-in user's own listings.
    pub mine: bool,
}

impl ProductQuery {
    pub fn mine() -> Self {
        Self {
            mine: true,
            ..Self::default()
        }
    }

    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(min) = self.min_price {
            query.push(("min_price".to_string(), min.to_string()));
        }
        if let Some(max) = self.max_price {
            query.push(("max_price".to_string(), max.to_string()));
        }
        if self.mine {
            query.push(("my_products".to_string(), "true".to_string()));
        }
        query
    }
}

/// The add-product form as typed by the user.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    /// Sent verbatim; the backend validates it.
    pub price: String,
    pub image: Option<FilePart>,
}

impl NewProduct {
    pub fn to_form(&self) -> MultipartForm {
        let form = MultipartForm::new()
            .text("name", self.name.clone())
            .text("desc", self.description.clone())
            .text("price", self.price.clone());
        match &self.image {
            Some(image) => form.file("image", image.clone()),
            None => form,
        }
    }
}

/// Answer to a like toggle.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct LikeStatus {
    #[serde(default)]
    pub liked: Option<bool>,
}

/// Answer to a purchase.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PurchaseReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub balance: Option<Decimal>,
}

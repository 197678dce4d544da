//! Wire models for the storefront backend.
//!
//! Field names follow the Rust side; `#[serde(rename)]` maps them onto the
//! backend's JSON (`desc`, `user`, `is_liked_by_user`, `tx_type`, ...).

mod notification;
mod product;
mod transaction;
mod user;

pub use notification::{unread_count, Notification, NotificationStatus};
pub use product::{Comment, LikeStatus, NewProduct, Product, ProductQuery, PurchaseReceipt};
pub use transaction::{Transaction, TransactionKind};
pub use user::{AuthResponse, Credentials, Registration, UserRef};

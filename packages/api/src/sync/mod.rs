//! # Resource data-sync
//!
//! How views keep their copy of server state honest.
//!
//! Every view holds one [`ResourceCell`] per remote resource and drives it
//! through
//!
//! ```text
//! Idle ──load──▶ Loading ──ok──▶ Loaded ──mutation ok──▶ Loading ...
//!                   │
//!                   └──err──▶ Failed (empty state, no automatic retry)
//! ```
//!
//! Rules the functions in this module enforce:
//!
//! | Rule | Where |
//! |------|-------|
//! | Anonymous visitors never reach the network for a mutation | [`authorize`] |
//! | Mutations need a loaded snapshot | [`require_loaded`] |
//! | Blank comments are refused client-side | [`products::submit_comment`] |
//! | A 401 with a stored session clears it and redirects to login | [`settle`], [`expire_on_rejection`] |
//! | An anonymous visitor refused by a members-only page gets a login prompt | [`load_rejection`] |
//! | Late responses for superseded or discarded loads are ignored | [`ResourceCell::finish_load`] |
//!
//! Mutations never patch the snapshot. On `Ok` the view calls
//! [`ResourceCell::begin_load`] again and waits for the authoritative copy.

mod action;
mod listing;
mod resource;

pub mod auth;
pub mod notifications;
pub mod products;
pub mod profile;

pub use action::{
    authorize, expire_on_rejection, load_rejection, require_loaded, settle, Action, ActionError,
    Feedback,
};
pub use listing::{listing_view, matches_search, ListingView};
pub use profile::{load_profile, ProfileData};
pub use resource::{LoadTicket, Phase, Resource, ResourceCell};

//! Shared storefront UI: session context, the navbar, dialogs and one view per
//! page. Views never touch the router; they report where to go through an
//! `on_navigate` handler that the platform crate maps onto its routes.

pub mod feedback;
pub mod platform;
pub mod session;
pub mod shell;
pub mod views;

mod login_prompt;
mod modal;
mod navbar;
mod product_card;

pub use feedback::{NoticeBanner, ViewFeedback};
pub use login_prompt::LoginPrompt;
pub use modal::Modal;
pub use navbar::Navbar;
pub use platform::{load_config, make_client, AppClient};
pub use product_card::ProductCard;
pub use session::{sync_session, use_client, use_session, SessionProvider, SessionState};
pub use shell::{nav_items, Access, NavItem, NavTarget};

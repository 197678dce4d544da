pub mod config;
pub mod models;
pub mod session;

mod memory;
pub use memory::MemorySessionStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileSessionStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod cookie;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use cookie::CookieSessionStore;

pub use config::{ApiConfig, ClientConfig, SessionConfig};
pub use models::{Session, UserProfile};
pub use session::SessionStore;

//! Arena backend adapters
//!
//! [`HttpArenaBackend`] implements the
//! [`ArenaBackend`](hunger_application::ArenaBackend) port over the
//! backend's JSON API.

mod http;
mod types;

pub use http::HttpArenaBackend;

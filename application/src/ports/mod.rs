//! Ports (interfaces) for the application layer
//!
//! Adapters for these live in the infrastructure and presentation crates.

pub mod arena_backend;
pub mod game_event_logger;
pub mod progress;

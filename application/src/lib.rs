//! Application layer for hunger-games
//!
//! This crate contains the game session use case and the ports it drives.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    arena_backend::{ArenaBackend, BackendError, BackendHealth},
    game_event_logger::{GameEventLogger, NoGameEventLogger},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::play_game::{GameSession, PlayGameError, RoundReport};

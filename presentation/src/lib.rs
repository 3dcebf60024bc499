//! Presentation layer for hunger-games
//!
//! This crate contains CLI definitions, console formatting, reveal pacing,
//! wait indicators, and the interactive game REPL.

pub mod cli;
pub mod config;
pub mod game;
pub mod output;
pub mod progress;
pub mod reveal;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use config::{Pacing, ReplConfig};
pub use game::{GameRepl, ReplCommand};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{CountdownReporter, SimpleProgress};
pub use reveal::RevealPacer;

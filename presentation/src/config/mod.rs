//! Presentation-level configuration
//!
//! Display and pacing settings for the game REPL, decoupled from the
//! file format they are loaded from.

use std::path::PathBuf;
use std::time::Duration;

/// Delays used to reveal already-fetched results one at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub answer_reveal: Duration,
    pub vote_reveal: Duration,
    pub tally_pause: Duration,
    pub winner_pause: Duration,
    /// Starting value of the wait countdown
    pub countdown_secs: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            answer_reveal: Duration::from_millis(1000),
            vote_reveal: Duration::from_millis(1500),
            tally_pause: Duration::from_millis(1000),
            winner_pause: Duration::from_millis(2000),
            countdown_secs: 35,
        }
    }
}

impl Pacing {
    /// No reveal delays at all
    pub fn instant() -> Self {
        Self {
            answer_reveal: Duration::ZERO,
            vote_reveal: Duration::ZERO,
            tally_pause: Duration::ZERO,
            winner_pause: Duration::ZERO,
            ..Self::default()
        }
    }
}

/// REPL configuration for the presentation layer
#[derive(Debug, Clone, Default)]
pub struct ReplConfig {
    /// Path to history file; defaults to the platform data directory
    pub history_file: Option<PathBuf>,
    /// Shown in connection error messages
    pub backend_url: String,
}

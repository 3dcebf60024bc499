//! Reveal pacing configuration from TOML (`[pacing]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw pacing configuration from TOML
///
/// All delays are purely cosmetic; the backend delivers each batch at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePacingConfig {
    /// Delay before each answer is shown
    pub answer_reveal_ms: u64,
    /// Delay before each vote is shown
    pub vote_reveal_ms: u64,
    /// Pause between the last vote and the result
    pub tally_pause_ms: u64,
    /// Pause before the winner screen
    pub winner_pause_ms: u64,
    /// Starting value of the countdown shown while a batch is pending
    pub countdown_secs: u64,
}

impl Default for FilePacingConfig {
    fn default() -> Self {
        Self {
            answer_reveal_ms: 1000,
            vote_reveal_ms: 1500,
            tally_pause_ms: 1000,
            winner_pause_ms: 2000,
            countdown_secs: 35,
        }
    }
}

impl FilePacingConfig {
    /// No artificial delays. The countdown start is kept.
    pub fn instant(&self) -> Self {
        Self {
            answer_reveal_ms: 0,
            vote_reveal_ms: 0,
            tally_pause_ms: 0,
            winner_pause_ms: 0,
            countdown_secs: self.countdown_secs,
        }
    }

    pub fn answer_reveal(&self) -> Duration {
        Duration::from_millis(self.answer_reveal_ms)
    }

    pub fn vote_reveal(&self) -> Duration {
        Duration::from_millis(self.vote_reveal_ms)
    }

    pub fn tally_pause(&self) -> Duration {
        Duration::from_millis(self.tally_pause_ms)
    }

    pub fn winner_pause(&self) -> Duration {
        Duration::from_millis(self.winner_pause_ms)
    }
}

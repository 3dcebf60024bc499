//! Game stages

use serde::{Deserialize, Serialize};

/// Stage of the game. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Waiting for the user to type a question
    Input,
    /// Waiting for the answer batch from the backend
    Answering,
    /// Answers are in; waiting for the user to start the vote
    Answers,
    /// Waiting for the vote batch, or for a manual tie-break
    Voting,
    /// A participant was eliminated; waiting for the next round
    Eliminated,
    /// One participant remains. Terminal until restart.
    Winner,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Input => "input",
            Stage::Answering => "answering",
            Stage::Answers => "answers",
            Stage::Voting => "voting",
            Stage::Eliminated => "eliminated",
            Stage::Winner => "winner",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::Input => "Awaiting Question",
            Stage::Answering => "Tributes Answering",
            Stage::Answers => "Answers Revealed",
            Stage::Voting => "Voting",
            Stage::Eliminated => "Elimination",
            Stage::Winner => "Victor Crowned",
        }
    }

    /// Whether the game is waiting on a backend batch in this stage
    pub fn awaits_backend(&self) -> bool {
        matches!(self, Stage::Answering | Stage::Voting)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Winner)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

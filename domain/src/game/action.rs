//! Inputs to the game state machine

use super::epoch::Epoch;
use crate::participant::ParticipantId;
use crate::round::{Answer, Vote};
use serde::{Deserialize, Serialize};

/// Why a backend request produced no usable batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchFailure {
    /// The backend asked us to cool down (HTTP 429)
    RateLimited { message: String },
    /// Network, status, or decode failure
    Failed { reason: String },
}

impl FetchFailure {
    pub fn rate_limited(message: impl Into<String>) -> Self {
        FetchFailure::RateLimited {
            message: message.into(),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        FetchFailure::Failed {
            reason: reason.into(),
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, FetchFailure::RateLimited { .. })
    }

    pub fn description(&self) -> &str {
        match self {
            FetchFailure::RateLimited { message } => message,
            FetchFailure::Failed { reason } => reason,
        }
    }
}

impl std::fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchFailure::RateLimited { message } => write!(f, "rate limited: {}", message),
            FetchFailure::Failed { reason } => write!(f, "{}", reason),
        }
    }
}

/// Everything that can happen to a game
///
/// User intents (`SubmitQuestion`, `StartVote`, `BreakTie`, `NextRound`,
/// `Restart`) and backend completions (`*Received`, `*Failed`) share one
/// message type so the whole game is driven through
/// [`GameState::apply`](super::GameState::apply).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameAction {
    SubmitQuestion(String),
    AnswersReceived { epoch: Epoch, answers: Vec<Answer> },
    AnswersFailed { epoch: Epoch, failure: FetchFailure },
    StartVote,
    VotesReceived { epoch: Epoch, votes: Vec<Vote> },
    VotesFailed { epoch: Epoch, failure: FetchFailure },
    BreakTie(ParticipantId),
    NextRound,
    Restart,
}

impl GameAction {
    /// Short verb used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            GameAction::SubmitQuestion(_) => "submit a question",
            GameAction::AnswersReceived { .. } => "record answers",
            GameAction::AnswersFailed { .. } => "abort answering",
            GameAction::StartVote => "start the vote",
            GameAction::VotesReceived { .. } => "record votes",
            GameAction::VotesFailed { .. } => "abort voting",
            GameAction::BreakTie(_) => "break a tie",
            GameAction::NextRound => "advance to the next round",
            GameAction::Restart => "restart",
        }
    }
}

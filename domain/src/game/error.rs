//! State machine errors

use super::stage::Stage;
use crate::core::error::DomainError;
use crate::participant::ParticipantId;
use thiserror::Error;

/// Rejected actions. The state is never modified when one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Cannot {action} during the {stage} stage")]
    InvalidTransition { stage: Stage, action: &'static str },

    #[error("Participant {0} is not one of the tied candidates")]
    NotATieCandidate(ParticipantId),

    #[error("The game is over; restart to play again")]
    GameOver,

    #[error("No question recorded for this round")]
    MissingQuestion,

    #[error("Vote tally produced no candidates")]
    EmptyTally,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl GameError {
    /// Whether the error only means "not now" rather than bad input
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, GameError::InvalidTransition { .. })
    }
}

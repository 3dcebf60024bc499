//! Domain error types

use crate::participant::ParticipantId;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Unknown participant: {0}")]
    UnknownParticipant(ParticipantId),

    #[error("Participant {0} has already been eliminated")]
    AlreadyEliminated(ParticipantId),
}

impl DomainError {
    /// Check if this error refers to a participant id the roster doesn't know
    pub fn is_unknown_participant(&self) -> bool {
        matches!(self, DomainError::UnknownParticipant(_))
    }
}

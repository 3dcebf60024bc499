//! Answer value object

use crate::participant::ParticipantId;
use serde::{Deserialize, Serialize};

/// One participant's answer to the round's question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub participant: ParticipantId,
    pub text: String,
}

impl Answer {
    pub fn new(participant: impl Into<ParticipantId>, text: impl Into<String>) -> Self {
        Self {
            participant: participant.into(),
            text: text.into(),
        }
    }
}

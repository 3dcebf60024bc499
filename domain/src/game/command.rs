//! Outbound requests emitted by the state machine

use super::epoch::Epoch;
use crate::core::question::Question;
use crate::participant::Participant;
use crate::round::Answer;

/// Ask the backend for one answer per alive participant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswersRequest {
    pub epoch: Epoch,
    pub question: Question,
    /// Alive participants only
    pub participants: Vec<Participant>,
}

/// Ask the backend for one vote per alive participant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VotesRequest {
    pub epoch: Epoch,
    pub question: Question,
    pub answers: Vec<Answer>,
}

/// A fetch the caller must perform and report back with the same epoch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchAnswers(AnswersRequest),
    FetchVotes(VotesRequest),
}

impl Command {
    pub fn epoch(&self) -> Epoch {
        match self {
            Command::FetchAnswers(request) => request.epoch,
            Command::FetchVotes(request) => request.epoch,
        }
    }
}

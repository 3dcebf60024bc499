//! Events emitted by the state machine

use super::epoch::Epoch;
use super::stage::Stage;
use crate::participant::ParticipantId;
use crate::round::ValidationIssue;
use serde::{Deserialize, Serialize};

/// How loudly a notice should be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeSeverity {
    /// The backend asked for a cooldown
    Cooldown,
    /// Blocking error the user must acknowledge
    Alert,
}

/// User-facing message left behind by an aborted request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub severity: NoticeSeverity,
    pub message: String,
}

impl Notice {
    pub fn cooldown(message: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Cooldown,
            message: message.into(),
        }
    }

    pub fn alert(message: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Alert,
            message: message.into(),
        }
    }
}

/// Which backend request an event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    Answers,
    Votes,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::Answers => "answers",
            RequestKind::Votes => "votes",
        }
    }
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Something that happened to the game as the result of an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    QuestionAsked {
        round: u32,
        question: String,
        epoch: Epoch,
    },
    AnswersRecorded {
        round: u32,
        count: usize,
    },
    VotingStarted {
        round: u32,
        epoch: Epoch,
    },
    VotesRecorded {
        round: u32,
        count: usize,
    },
    TieBreakRequired {
        round: u32,
        candidates: Vec<ParticipantId>,
        votes: usize,
    },
    Eliminated {
        round: u32,
        participant: ParticipantId,
        votes: usize,
    },
    WinnerCrowned {
        round: u32,
        participant: ParticipantId,
    },
    RoundAdvanced {
        round: u32,
    },
    RequestAborted {
        request: RequestKind,
        returned_to: Stage,
        reason: String,
        rate_limited: bool,
    },
    ResponseIssues {
        request: RequestKind,
        rejected: bool,
        issues: Vec<ValidationIssue>,
    },
    StaleResponseDiscarded {
        request: RequestKind,
        epoch: Epoch,
        current: Epoch,
    },
    Restarted,
}

impl GameEvent {
    /// Stable identifier used in structured logs
    pub fn event_type(&self) -> &'static str {
        match self {
            GameEvent::QuestionAsked { .. } => "question_asked",
            GameEvent::AnswersRecorded { .. } => "answers_recorded",
            GameEvent::VotingStarted { .. } => "voting_started",
            GameEvent::VotesRecorded { .. } => "votes_recorded",
            GameEvent::TieBreakRequired { .. } => "tie_break_required",
            GameEvent::Eliminated { .. } => "eliminated",
            GameEvent::WinnerCrowned { .. } => "winner_crowned",
            GameEvent::RoundAdvanced { .. } => "round_advanced",
            GameEvent::RequestAborted { .. } => "request_aborted",
            GameEvent::ResponseIssues { .. } => "response_issues",
            GameEvent::StaleResponseDiscarded { .. } => "stale_response_discarded",
            GameEvent::Restarted => "restarted",
        }
    }
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::QuestionAsked { round, question, .. } => {
                write!(f, "round {} question: {}", round, question)
            }
            GameEvent::AnswersRecorded { count, .. } => write!(f, "{} answers recorded", count),
            GameEvent::VotingStarted { round, .. } => write!(f, "voting started in round {}", round),
            GameEvent::VotesRecorded { count, .. } => write!(f, "{} votes recorded", count),
            GameEvent::TieBreakRequired {
                candidates, votes, ..
            } => {
                let ids: Vec<String> = candidates.iter().map(|id| id.to_string()).collect();
                write!(f, "tie at {} votes between {}", votes, ids.join(", "))
            }
            GameEvent::Eliminated {
                participant, votes, ..
            } => write!(f, "participant {} eliminated with {} votes", participant, votes),
            GameEvent::WinnerCrowned { participant, .. } => {
                write!(f, "participant {} is the last one standing", participant)
            }
            GameEvent::RoundAdvanced { round } => write!(f, "round {} begins", round),
            GameEvent::RequestAborted {
                request,
                returned_to,
                reason,
                ..
            } => write!(
                f,
                "{} request aborted ({}); back to {}",
                request, reason, returned_to
            ),
            GameEvent::ResponseIssues {
                request,
                rejected,
                issues,
            } => write!(
                f,
                "{} batch had {} issue(s){}",
                request,
                issues.len(),
                if *rejected { ", rejected" } else { "" }
            ),
            GameEvent::StaleResponseDiscarded {
                request,
                epoch,
                current,
            } => write!(
                f,
                "discarded stale {} response from {} (current {})",
                request, epoch, current
            ),
            GameEvent::Restarted => write!(f, "game restarted"),
        }
    }
}

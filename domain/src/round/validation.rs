//! Backend response validation
//!
//! The backend is expected to return exactly one answer and one vote per
//! alive participant, and nobody votes for themselves. Nothing on the wire
//! enforces that, so every batch is checked against the roster before it is
//! recorded. Whether a problem rejects the batch depends on the
//! [`ResponsePolicy`].

use super::answer::Answer;
use super::vote::Vote;
use crate::participant::{ParticipantId, Roster};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// How to treat batches that break the one-per-alive-participant contract
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponsePolicy {
    /// Reject the whole batch on any issue (default)
    #[default]
    Strict,
    /// Record the batch as-is and only report issues
    Lenient,
}

impl ResponsePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponsePolicy::Strict => "strict",
            ResponsePolicy::Lenient => "lenient",
        }
    }

    /// Whether a batch with these issues must be rejected
    pub fn rejects(&self, issues: &[ValidationIssue]) -> bool {
        match self {
            ResponsePolicy::Strict => !issues.is_empty(),
            ResponsePolicy::Lenient => false,
        }
    }
}

impl FromStr for ResponsePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(ResponsePolicy::Strict),
            "lenient" => Ok(ResponsePolicy::Lenient),
            other => Err(format!(
                "unknown response policy '{}' (expected 'strict' or 'lenient')",
                other
            )),
        }
    }
}

impl std::fmt::Display for ResponsePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single contract violation found in a backend batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum ValidationIssue {
    UnknownParticipant { id: ParticipantId },
    NotAlive { id: ParticipantId },
    DuplicateAnswer { id: ParticipantId },
    MissingAnswer { id: ParticipantId },
    DuplicateVoter { id: ParticipantId },
    SelfVote { id: ParticipantId },
    TargetNotAlive { voter: ParticipantId, target: ParticipantId },
    MissingVote { id: ParticipantId },
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationIssue::UnknownParticipant { id } => write!(f, "unknown participant {}", id),
            ValidationIssue::NotAlive { id } => write!(f, "participant {} is eliminated", id),
            ValidationIssue::DuplicateAnswer { id } => write!(f, "participant {} answered twice", id),
            ValidationIssue::MissingAnswer { id } => write!(f, "no answer from participant {}", id),
            ValidationIssue::DuplicateVoter { id } => write!(f, "participant {} voted twice", id),
            ValidationIssue::SelfVote { id } => write!(f, "participant {} voted for itself", id),
            ValidationIssue::TargetNotAlive { voter, target } => {
                write!(f, "participant {} voted for non-alive participant {}", voter, target)
            }
            ValidationIssue::MissingVote { id } => write!(f, "no vote from participant {}", id),
        }
    }
}

/// Check that an answer batch has exactly one answer per alive participant
pub fn validate_answers(roster: &Roster, answers: &[Answer]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for answer in answers {
        let id = answer.participant;
        if !roster.contains(id) {
            issues.push(ValidationIssue::UnknownParticipant { id });
        } else if !roster.is_alive(id) {
            issues.push(ValidationIssue::NotAlive { id });
        } else if !seen.insert(id) {
            issues.push(ValidationIssue::DuplicateAnswer { id });
        }
    }

    issues.extend(
        roster
            .alive()
            .filter(|p| !seen.contains(&p.id))
            .map(|p| ValidationIssue::MissingAnswer { id: p.id }),
    );

    issues
}

/// Check that a vote batch has exactly one valid vote per alive participant
pub fn validate_votes(roster: &Roster, votes: &[Vote]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut voters = HashSet::new();

    for vote in votes {
        let voter = vote.voter;
        if !roster.contains(voter) {
            issues.push(ValidationIssue::UnknownParticipant { id: voter });
            continue;
        }
        if !roster.is_alive(voter) {
            issues.push(ValidationIssue::NotAlive { id: voter });
            continue;
        }
        if !voters.insert(voter) {
            issues.push(ValidationIssue::DuplicateVoter { id: voter });
            continue;
        }
        if vote.is_self_vote() {
            issues.push(ValidationIssue::SelfVote { id: voter });
        } else if !roster.is_alive(vote.voted_for) {
            issues.push(ValidationIssue::TargetNotAlive {
                voter,
                target: vote.voted_for,
            });
        }
    }

    issues.extend(
        roster
            .alive()
            .filter(|p| !voters.contains(&p.id))
            .map(|p| ValidationIssue::MissingVote { id: p.id }),
    );

    issues
}

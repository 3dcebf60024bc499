//! Vote value object

use crate::participant::ParticipantId;
use serde::{Deserialize, Serialize};

/// A single elimination vote cast by one participant against another
///
/// # Example
///
/// ```
/// use hunger_domain::round::Vote;
///
/// let vote = Vote::new(1, 4, "Too cynical for this crowd.");
/// assert_eq!(vote.voted_for.get(), 4);
/// assert!(!vote.is_self_vote());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub voter: ParticipantId,
    pub voted_for: ParticipantId,
    pub reason: String,
}

impl Vote {
    pub fn new(
        voter: impl Into<ParticipantId>,
        voted_for: impl Into<ParticipantId>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            voter: voter.into(),
            voted_for: voted_for.into(),
            reason: reason.into(),
        }
    }

    pub fn is_self_vote(&self) -> bool {
        self.voter == self.voted_for
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_vote() {
        assert!(Vote::new(3, 3, "me").is_self_vote());
        assert!(!Vote::new(3, 2, "them").is_self_vote());
    }
}

//! Vote tallying
//!
//! Counts the votes against every alive participant and decides whether the
//! round has a single loser or needs a manual tie-break.

use super::vote::Vote;
use crate::participant::{ParticipantId, Roster};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What the tally decided
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TallyOutcome {
    /// Exactly one participant received the most votes
    Eliminate(ParticipantId),
    /// Several participants share the most votes; the user must pick one
    Tie(Vec<ParticipantId>),
}

impl TallyOutcome {
    pub fn is_tie(&self) -> bool {
        matches!(self, TallyOutcome::Tie(_))
    }
}

/// Vote counts for the alive participants of a round
///
/// Only votes whose target is alive are counted. The candidates are every
/// alive participant whose count equals the maximum, so with no votes at
/// all everyone alive is tied at zero.
///
/// # Example
///
/// ```
/// use hunger_domain::round::{TallyOutcome, Vote, VoteTally};
/// use hunger_domain::{ParticipantId, Roster};
///
/// let roster = Roster::standard();
/// let votes = vec![
///     Vote::new(1, 2, "Too practical"),
///     Vote::new(3, 2, "Boring"),
///     Vote::new(2, 3, "Naive"),
/// ];
///
/// let tally = VoteTally::compute(&roster, &votes);
/// assert_eq!(tally.max(), 2);
/// assert_eq!(tally.outcome(), TallyOutcome::Eliminate(ParticipantId::new(2)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    counts: BTreeMap<ParticipantId, usize>,
    max: usize,
    candidates: Vec<ParticipantId>,
}

impl VoteTally {
    /// Tally `votes` against the alive participants of `roster`
    pub fn compute(roster: &Roster, votes: &[Vote]) -> Self {
        let mut counts: BTreeMap<ParticipantId, usize> =
            roster.alive().map(|p| (p.id, 0)).collect();

        for vote in votes {
            if let Some(count) = counts.get_mut(&vote.voted_for) {
                *count += 1;
            }
        }

        let max = counts.values().copied().max().unwrap_or(0);
        let candidates = counts
            .iter()
            .filter(|(_, count)| **count == max)
            .map(|(id, _)| *id)
            .collect();

        Self {
            counts,
            max,
            candidates,
        }
    }

    /// Votes received by `id` (zero for eliminated or unknown ids)
    pub fn count_for(&self, id: ParticipantId) -> usize {
        self.counts.get(&id).copied().unwrap_or(0)
    }

    /// The highest vote count (the elimination threshold)
    pub fn max(&self) -> usize {
        self.max
    }

    /// Alive participants at the threshold, in id order
    pub fn candidates(&self) -> &[ParticipantId] {
        &self.candidates
    }

    /// Counts per alive participant, in id order
    pub fn counts(&self) -> impl Iterator<Item = (ParticipantId, usize)> + '_ {
        self.counts.iter().map(|(id, count)| (*id, *count))
    }

    /// Total number of counted votes
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn outcome(&self) -> TallyOutcome {
        match self.candidates.as_slice() {
            [single] => TallyOutcome::Eliminate(*single),
            tied => TallyOutcome::Tie(tied.to_vec()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> ParticipantId {
        ParticipantId::new(n)
    }

    #[test]
    fn test_single_loser_scenario() {
        // 1→2, 2→3, 3→2, everyone else →2
        let roster = Roster::standard();
        let mut votes = vec![
            Vote::new(1, 2, "a"),
            Vote::new(2, 3, "b"),
            Vote::new(3, 2, "c"),
        ];
        for voter in 4..=8 {
            votes.push(Vote::new(voter, 2, "d"));
        }

        let tally = VoteTally::compute(&roster, &votes);
        assert_eq!(tally.count_for(id(2)), 7);
        assert_eq!(tally.count_for(id(3)), 1);
        assert_eq!(tally.max(), 7);
        assert_eq!(tally.candidates(), &[id(2)]);
        assert_eq!(tally.outcome(), TallyOutcome::Eliminate(id(2)));
    }

    #[test]
    fn test_four_four_split_is_tie() {
        let roster = Roster::standard();
        let votes: Vec<Vote> = (1..=8)
            .map(|voter| {
                let target = if voter <= 4 { 7 } else { 1 };
                Vote::new(voter, target, "split")
            })
            .collect();

        let tally = VoteTally::compute(&roster, &votes);
        assert_eq!(tally.max(), 4);
        assert_eq!(tally.outcome(), TallyOutcome::Tie(vec![id(1), id(7)]));
        assert!(tally.outcome().is_tie());
    }

    #[test]
    fn test_votes_for_eliminated_not_counted() {
        let mut roster = Roster::standard();
        roster.eliminate(id(5)).unwrap();
        let votes = vec![
            Vote::new(1, 5, "ghost"),
            Vote::new(2, 5, "ghost"),
            Vote::new(3, 4, "real"),
        ];

        let tally = VoteTally::compute(&roster, &votes);
        assert_eq!(tally.count_for(id(5)), 0);
        assert_eq!(tally.total(), 1);
        assert_eq!(tally.outcome(), TallyOutcome::Eliminate(id(4)));
        assert!(tally.counts().all(|(pid, _)| pid != id(5)));
    }

    #[test]
    fn test_no_votes_ties_everyone_alive() {
        let mut roster = Roster::standard();
        roster.eliminate(id(1)).unwrap();

        let tally = VoteTally::compute(&roster, &[]);
        assert_eq!(tally.max(), 0);
        assert_eq!(tally.candidates().len(), 7);
        assert!(!tally.candidates().contains(&id(1)));
    }

    #[test]
    fn test_tie_set_matches_max_property() {
        // Exhaustively rotate targets over a three-way split and check the
        // tie set is exactly the alive ids at the max count.
        let roster = Roster::standard();
        for shift in 0..8u32 {
            let votes: Vec<Vote> = (1..=8u32)
                .map(|voter| Vote::new(voter, ((voter + shift) % 3) + 1, ""))
                .collect();
            let tally = VoteTally::compute(&roster, &votes);

            let expected: Vec<ParticipantId> = tally
                .counts()
                .filter(|(_, count)| *count == tally.max())
                .map(|(pid, _)| pid)
                .collect();
            assert_eq!(tally.candidates(), expected.as_slice());
        }
    }
}

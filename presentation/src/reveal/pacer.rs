//! Timed, one-at-a-time reveal of batches that are already fetched

use crate::config::Pacing;
use hunger_domain::{Answer, ParticipantId, Vote};
use std::collections::HashMap;
use std::time::Duration;

/// Sleeps between items so a batch reads like it arrives piece by piece
#[derive(Debug, Clone, Copy)]
pub struct RevealPacer {
    pacing: Pacing,
}

impl RevealPacer {
    pub fn new(pacing: Pacing) -> Self {
        Self { pacing }
    }

    pub fn pacing(&self) -> &Pacing {
        &self.pacing
    }

    /// Show each answer after the answer delay
    pub async fn reveal_answers<F>(&self, answers: &[Answer], show: F)
    where
        F: FnMut(usize, &Answer),
    {
        reveal(answers, self.pacing.answer_reveal, show).await;
    }

    /// Show each vote after the vote delay, with the target's running count
    pub async fn reveal_votes<F>(&self, votes: &[Vote], mut show: F)
    where
        F: FnMut(&Vote, usize),
    {
        let counts = running_counts(votes);
        reveal(votes, self.pacing.vote_reveal, |i, vote| show(vote, counts[i])).await;
    }

    pub async fn tally_pause(&self) {
        pause(self.pacing.tally_pause).await;
    }

    pub async fn winner_pause(&self) {
        pause(self.pacing.winner_pause).await;
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

async fn reveal<T, F>(items: &[T], delay: Duration, mut show: F)
where
    F: FnMut(usize, &T),
{
    for (i, item) in items.iter().enumerate() {
        pause(delay).await;
        show(i, item);
    }
}

/// For each vote, how many votes its target has received so far
pub fn running_counts(votes: &[Vote]) -> Vec<usize> {
    let mut seen: HashMap<ParticipantId, usize> = HashMap::new();
    votes
        .iter()
        .map(|vote| {
            let count = seen.entry(vote.voted_for).or_insert(0);
            *count += 1;
            *count
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[test]
    fn test_running_counts() {
        let votes = vec![
            Vote::new(1, 2, ""),
            Vote::new(2, 3, ""),
            Vote::new(3, 2, ""),
            Vote::new(4, 2, ""),
        ];
        assert_eq!(running_counts(&votes), vec![1, 1, 2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_votes_revealed_one_delay_apart() {
        let pacer = RevealPacer::new(Pacing::default());
        let votes = vec![Vote::new(1, 2, "a"), Vote::new(3, 2, "b")];
        let start = Instant::now();
        let mut seen = Vec::new();

        pacer
            .reveal_votes(&votes, |vote, count| {
                seen.push((vote.voter.get(), count, start.elapsed()));
            })
            .await;

        assert_eq!(
            seen,
            vec![
                (1, 1, Duration::from_millis(1500)),
                (3, 2, Duration::from_millis(3000)),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_instant_pacing_has_no_delay() {
        let pacer = RevealPacer::new(Pacing::instant());
        let answers = vec![Answer::new(1, "x"), Answer::new(2, "y")];
        let start = Instant::now();
        let mut order = Vec::new();

        pacer
            .reveal_answers(&answers, |i, answer| order.push((i, answer.participant.get())))
            .await;
        pacer.winner_pause().await;

        assert_eq!(order, vec![(0, 1), (1, 2)]);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}

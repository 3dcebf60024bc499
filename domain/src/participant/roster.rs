//! The fixed roster of eight personalities

use super::entities::{Participant, ParticipantId};
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Number of participants in every game
pub const PARTICIPANT_COUNT: usize = 8;

const PERSONALITIES: [(u32, &str, &str); PARTICIPANT_COUNT] = [
    (1, "The Philosopher", "Deep thinker, questions everything"),
    (2, "The Pragmatist", "Practical, solution-oriented"),
    (3, "The Optimist", "Positive, sees the bright side"),
    (4, "The Skeptic", "Doubtful, questions claims"),
    (5, "The Empath", "Emotional, understanding"),
    (6, "The Rebel", "Contrarian, challenges norms"),
    (7, "The Analyst", "Data-driven, logical"),
    (8, "The Visionary", "Future-focused, innovative"),
];

/// All participants of a game, in id order
///
/// # Example
///
/// ```
/// use hunger_domain::{ParticipantId, Roster};
///
/// let mut roster = Roster::standard();
/// assert_eq!(roster.alive_count(), 8);
///
/// roster.eliminate(ParticipantId::new(6)).unwrap();
/// assert_eq!(roster.alive_count(), 7);
/// assert!(!roster.is_alive(ParticipantId::new(6)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    /// The eight standard personalities, all alive
    pub fn standard() -> Self {
        Self {
            participants: PERSONALITIES
                .iter()
                .map(|(id, name, trait_description)| {
                    Participant::new(*id, *name, *trait_description)
                })
                .collect(),
        }
    }

    pub fn all(&self) -> &[Participant] {
        &self.participants
    }

    pub fn alive(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter().filter(|p| p.is_alive())
    }

    pub fn alive_ids(&self) -> Vec<ParticipantId> {
        self.alive().map(|p| p.id).collect()
    }

    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    pub fn get(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: ParticipantId) -> bool {
        self.get(id).is_some()
    }

    pub fn is_alive(&self, id: ParticipantId) -> bool {
        self.get(id).is_some_and(Participant::is_alive)
    }

    /// Eliminate exactly one participant
    ///
    /// Every other participant's alive flag is left untouched.
    pub fn eliminate(&mut self, id: ParticipantId) -> Result<&Participant, DomainError> {
        let participant = self
            .participants
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(DomainError::UnknownParticipant(id))?;

        if !participant.is_alive() {
            return Err(DomainError::AlreadyEliminated(id));
        }

        participant.mark_eliminated();
        Ok(participant)
    }

    /// The last participant standing, if exactly one is alive
    pub fn sole_survivor(&self) -> Option<&Participant> {
        let mut alive = self.alive();
        match (alive.next(), alive.next()) {
            (Some(survivor), None) => Some(survivor),
            _ => None,
        }
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::standard()
    }
}

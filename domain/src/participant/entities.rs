//! Participant entities

use serde::{Deserialize, Serialize};
use std::num::ParseIntError;
use std::str::FromStr;

/// Stable identity of a participant for the lifetime of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(u32);

impl ParticipantId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for ParticipantId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl FromStr for ParticipantId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().trim_start_matches('#').parse().map(Self)
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A personality competing in the arena (Entity)
///
/// The alive flag is only ever flipped by [`Roster::eliminate`](super::Roster::eliminate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    #[serde(rename = "trait")]
    pub trait_description: String,
    alive: bool,
}

impl Participant {
    /// Create a new, alive participant
    pub fn new(
        id: impl Into<ParticipantId>,
        name: impl Into<String>,
        trait_description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            trait_description: trait_description.into(),
            alive: true,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub(crate) fn mark_eliminated(&mut self) {
        self.alive = false;
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (#{})", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_id_parse() {
        assert_eq!("3".parse::<ParticipantId>(), Ok(ParticipantId::new(3)));
        assert_eq!(" #7 ".parse::<ParticipantId>(), Ok(ParticipantId::new(7)));
        assert!("seven".parse::<ParticipantId>().is_err());
    }

    #[test]
    fn test_participant_serializes_trait_field() {
        let p = Participant::new(1, "The Philosopher", "Deep thinker, questions everything");
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["trait"], "Deep thinker, questions everything");
        assert_eq!(json["alive"], true);
    }

    #[test]
    fn test_display() {
        let p = Participant::new(5, "The Empath", "Emotional, understanding");
        assert_eq!(p.to_string(), "The Empath (#5)");
    }
}

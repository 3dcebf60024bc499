//! Participants and the roster they compete in

pub mod entities;
pub mod roster;

pub use entities::{Participant, ParticipantId};
pub use roster::{PARTICIPANT_COUNT, Roster};

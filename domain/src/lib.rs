//! Domain layer for hunger-games
//!
//! This crate contains the core game rules, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Roster
//!
//! Eight fixed AI personalities compete. Each round they answer the same
//! question, then vote to eliminate one of the others. The last one alive wins.
//!
//! ## Game state machine
//!
//! [`GameState`] moves through [`Stage`]s in response to [`GameAction`]s.
//! Requests to the backend are returned as [`Command`]s tagged with an
//! [`Epoch`], so responses that arrive after a restart are dropped.

pub mod core;
pub mod game;
pub mod participant;
pub mod round;

// Re-export commonly used types
pub use core::{error::DomainError, question::Question, string::truncate};
pub use game::{
    AnswersRequest, Command, Epoch, FetchFailure, GameAction, GameError, GameEvent, GameState,
    Notice, NoticeSeverity, RequestKind, Stage, Transition, VotesRequest,
};
pub use participant::{PARTICIPANT_COUNT, Participant, ParticipantId, Roster};
pub use round::{
    Answer, ResponsePolicy, TallyOutcome, ValidationIssue, Vote, VoteTally, validate_answers,
    validate_votes,
};

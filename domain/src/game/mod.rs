//! The elimination game as a pure state machine
//!
//! Actions go in through [`GameState::apply`]; events and an optional
//! backend [`Command`] come out. Nothing in here performs I/O.

pub mod action;
pub mod command;
pub mod epoch;
pub mod error;
pub mod event;
pub mod stage;
pub mod state;

pub use action::{FetchFailure, GameAction};
pub use command::{AnswersRequest, Command, VotesRequest};
pub use epoch::Epoch;
pub use error::GameError;
pub use event::{GameEvent, Notice, NoticeSeverity, RequestKind};
pub use stage::Stage;
pub use state::{GameState, Transition};

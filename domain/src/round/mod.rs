//! Per-round records: answers, votes, and their tally

pub mod answer;
pub mod tally;
pub mod validation;
pub mod vote;

pub use answer::Answer;
pub use tally::{TallyOutcome, VoteTally};
pub use validation::{ResponsePolicy, ValidationIssue, validate_answers, validate_votes};
pub use vote::Vote;

//! Reveal pacing

pub mod pacer;

pub use pacer::RevealPacer;

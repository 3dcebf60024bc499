//! Use cases for the application layer

pub mod play_game;

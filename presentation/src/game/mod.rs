//! Interactive game loop and its command grammar

pub mod command;
pub mod repl;

pub use command::ReplCommand;
pub use repl::GameRepl;

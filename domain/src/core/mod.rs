//! Core domain concepts shared across all subdomains.
//!
//! - [`question::Question`]: a validated question to put to the arena
//! - [`error::DomainError`]: domain-level errors
//! - [`string::truncate`]: display helper for long model output

pub mod error;
pub mod question;
pub mod string;

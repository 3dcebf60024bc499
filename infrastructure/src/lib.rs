//! Infrastructure layer for hunger-games
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod backend;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use backend::HttpArenaBackend;
pub use config::{
    ConfigIssue, ConfigIssueCode, ConfigLoader, DEFAULT_BASE_URL, FileBackendConfig, FileConfig,
    FileGameConfig, FileOutputConfig, FilePacingConfig, Severity,
};
pub use logging::JsonlGameEventLogger;

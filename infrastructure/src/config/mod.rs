//! Configuration file loading for hunger-games
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `HUNGER_GAMES_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./hunger-games.toml` or `./.hunger-games.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/hunger-games/config.toml`
//! 5. Default values

mod file_config;
mod loader;
mod validation;

pub use file_config::{
    DEFAULT_BASE_URL, FileBackendConfig, FileConfig, FileGameConfig, FileOutputConfig,
    FilePacingConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
pub use validation::{ConfigIssue, ConfigIssueCode, Severity};

//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to domain types on use.

mod backend;
mod game;
mod output;
mod pacing;

pub use backend::{DEFAULT_BASE_URL, FileBackendConfig};
pub use game::FileGameConfig;
pub use output::FileOutputConfig;
pub use pacing::FilePacingConfig;

use super::validation::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Arena backend connection
    pub backend: FileBackendConfig,
    /// Reveal delays and countdown
    pub pacing: FilePacingConfig,
    /// Game rules
    pub game: FileGameConfig,
    /// Terminal output
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.backend.validate();
        issues.extend(self.game.parse_policy().1);
        issues
    }

    pub fn has_errors(&self) -> bool {
        self.validate().iter().any(ConfigIssue::is_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::validation::ConfigIssueCode;
    use hunger_domain::ResponsePolicy;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[backend]
base_url = "https://arena.example.com"
timeout_secs = 45

[pacing]
answer_reveal_ms = 200
vote_reveal_ms = 300
countdown_secs = 20

[game]
policy = "lenient"

[output]
color = false
show_progress = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.backend.base_url, "https://arena.example.com");
        assert_eq!(config.backend.timeout_secs, 45);
        assert_eq!(config.pacing.answer_reveal_ms, 200);
        assert_eq!(config.pacing.vote_reveal_ms, 300);
        // Unset keys keep their defaults
        assert_eq!(config.pacing.tally_pause_ms, 1000);
        assert_eq!(config.pacing.winner_pause_ms, 2000);
        assert_eq!(config.pacing.countdown_secs, 20);
        assert_eq!(config.game.parse_policy().0, ResponsePolicy::Lenient);
        assert!(!config.output.color);
        assert!(!config.output.show_progress);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[backend]
base_url = "http://10.0.0.2:8080"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.backend.base_url, "http://10.0.0.2:8080");
        assert_eq!(config.backend.timeout_secs, 120);
        assert_eq!(config.pacing, FilePacingConfig::default());
        assert!(config.output.color);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.backend.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.pacing.answer_reveal_ms, 1000);
        assert_eq!(config.pacing.vote_reveal_ms, 1500);
        assert_eq!(config.pacing.countdown_secs, 35);
        assert_eq!(config.game.policy, "strict");
        assert!(config.output.show_progress);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
        assert!(!config.has_errors());
    }

    #[test]
    fn test_validate_collects_all_issues() {
        let toml_str = r#"
[backend]
base_url = "  "

[game]
policy = "chaotic"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();

        assert_eq!(issues.len(), 2);
        assert!(matches!(issues[0].code, ConfigIssueCode::EmptyValue { .. }));
        assert!(matches!(
            issues[1].code,
            ConfigIssueCode::InvalidEnumValue { .. }
        ));
        assert!(config.has_errors());
    }

    #[test]
    fn test_instant_pacing_keeps_countdown() {
        let pacing = FilePacingConfig::default().instant();
        assert_eq!(pacing.answer_reveal_ms, 0);
        assert_eq!(pacing.winner_pause_ms, 0);
        assert_eq!(pacing.countdown_secs, 35);
    }
}

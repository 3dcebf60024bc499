//! Backend configuration from TOML (`[backend]` section)

use crate::config::validation::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Raw backend configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    /// Base URL of the arena backend, without a trailing `/api`
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 120,
        }
    }
}

impl FileBackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let url = self.base_url.trim();

        if url.is_empty() {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::EmptyValue {
                    field: "backend.base_url".to_string(),
                },
                message: "backend.base_url cannot be empty".to_string(),
            });
        } else if !(url.starts_with("http://") || url.starts_with("https://")) {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::InvalidUrl {
                    field: "backend.base_url".to_string(),
                    value: self.base_url.clone(),
                },
                message: format!(
                    "backend.base_url: '{}' must start with http:// or https://",
                    self.base_url
                ),
            });
        }

        if self.timeout_secs == 0 {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::ZeroValue {
                    field: "backend.timeout_secs".to_string(),
                },
                message: "backend.timeout_secs cannot be 0".to_string(),
            });
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_scheme_less_url() {
        let config = FileBackendConfig {
            base_url: "localhost:5000".to_string(),
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(matches!(issues[0].code, ConfigIssueCode::InvalidUrl { .. }));
        assert!(issues[0].is_error());
    }

    #[test]
    fn test_zero_timeout() {
        let config = FileBackendConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(
            config
                .validate()
                .iter()
                .any(|i| matches!(i.code, ConfigIssueCode::ZeroValue { .. }))
        );
    }
}

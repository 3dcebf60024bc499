//! Game rules configuration from TOML (`[game]` section)

use crate::config::validation::{ConfigIssue, ConfigIssueCode, Severity};
use hunger_domain::ResponsePolicy;
use serde::{Deserialize, Serialize};

/// Raw game configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGameConfig {
    /// Response validation policy: "strict" or "lenient"
    pub policy: String,
}

impl Default for FileGameConfig {
    fn default() -> Self {
        Self {
            policy: ResponsePolicy::default().as_str().to_string(),
        }
    }
}

impl FileGameConfig {
    /// Parse the policy, falling back to strict on unknown values.
    pub fn parse_policy(&self) -> (ResponsePolicy, Vec<ConfigIssue>) {
        match self.policy.parse::<ResponsePolicy>() {
            Ok(policy) => (policy, Vec::new()),
            Err(_) => (
                ResponsePolicy::default(),
                vec![ConfigIssue {
                    severity: Severity::Warning,
                    code: ConfigIssueCode::InvalidEnumValue {
                        field: "game.policy".to_string(),
                        value: self.policy.clone(),
                        valid_values: vec!["strict".to_string(), "lenient".to_string()],
                    },
                    message: format!(
                        "game.policy: unknown value '{}', falling back to 'strict'",
                        self.policy
                    ),
                }],
            ),
        }
    }
}

//! Question value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// The question put to the arena for one round (Value Object)
///
/// Surrounding whitespace is trimmed; a question that is empty after
/// trimming cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Question {
    content: String,
}

impl Question {
    /// Create a new question, rejecting blank input
    pub fn new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidQuestion(
                "question cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            content: trimmed.to_string(),
        })
    }

    /// Try to create a new question, returning None if invalid
    pub fn try_new(content: impl Into<String>) -> Option<Self> {
        Self::new(content).ok()
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<String> for Question {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Question::new(s)
    }
}

impl TryFrom<&str> for Question {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Question::new(s)
    }
}

impl From<Question> for String {
    fn from(q: Question) -> Self {
        q.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_creation() {
        let q = Question::new("Is a hot dog a sandwich?").unwrap();
        assert_eq!(q.content(), "Is a hot dog a sandwich?");
    }

    #[test]
    fn test_question_is_trimmed() {
        let q = Question::new("  What is courage?\n").unwrap();
        assert_eq!(q.content(), "What is courage?");
    }

    #[test]
    fn test_blank_question_rejected() {
        assert!(matches!(
            Question::new(""),
            Err(DomainError::InvalidQuestion(_))
        ));
        assert!(Question::try_new("   ").is_none());
        assert!(Question::try_new("\t\n").is_none());
    }

    #[test]
    fn test_try_from_str() {
        let q: Question = "Should AI vote?".try_into().unwrap();
        assert_eq!(q.to_string(), "Should AI vote?");
    }

    #[test]
    fn test_deserialize_rejects_blank() {
        assert!(serde_json::from_str::<Question>("\"  \"").is_err());
        let q: Question = serde_json::from_str("\"Why?\"").unwrap();
        assert_eq!(q.into_content(), "Why?");
    }
}

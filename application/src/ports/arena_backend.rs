//! Arena backend port
//!
//! Defines the interface to the remote service that writes the
//! participants' answers and votes.

use async_trait::async_trait;
use hunger_domain::{Answer, AnswersRequest, FetchFailure, Vote, VotesRequest};
use thiserror::Error;

/// Errors that can occur while talking to the arena backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// HTTP 429. `message` is meant for the player.
    #[error("Rate limited: {message}")]
    RateLimited {
        message: String,
        retry_after: Option<String>,
    },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Request timed out")]
    Timeout,
}

impl BackendError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, BackendError::RateLimited { .. })
    }

    /// Text shown to the player when the request is aborted
    pub fn user_message(&self) -> String {
        match self {
            BackendError::RateLimited { message, .. } => message.clone(),
            BackendError::Status { body, .. } if !body.is_empty() => body.clone(),
            other => other.to_string(),
        }
    }
}

impl From<BackendError> for FetchFailure {
    fn from(error: BackendError) -> Self {
        match error {
            BackendError::RateLimited { message, .. } => FetchFailure::rate_limited(message),
            other => FetchFailure::failed(other.user_message()),
        }
    }
}

/// Result of `GET /health`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendHealth {
    pub status: String,
    pub model: Option<String>,
    pub api_key_configured: Option<bool>,
    pub redis_connected: Option<bool>,
    pub request_limit: Option<u64>,
}

impl BackendHealth {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy") || self.status.eq_ignore_ascii_case("ok")
    }
}

/// Gateway to the answer and vote generators
///
/// Implementations (adapters) live in the infrastructure layer. Each call
/// returns the whole batch at once; pacing is a presentation concern.
#[async_trait]
pub trait ArenaBackend: Send + Sync {
    /// One answer per participant in the request
    async fn generate_answers(&self, request: &AnswersRequest)
    -> Result<Vec<Answer>, BackendError>;

    /// One vote per answering participant
    async fn generate_votes(&self, request: &VotesRequest) -> Result<Vec<Vote>, BackendError>;

    async fn health(&self) -> Result<BackendHealth, BackendError>;
}

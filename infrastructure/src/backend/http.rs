//! HTTP adapter for the arena backend
//!
//! Talks to the JSON API with `reqwest`:
//!
//! | Call | Endpoint |
//! |------|----------|
//! | answers | `POST {base}/api/answers` |
//! | votes | `POST {base}/api/vote` |
//! | health | `GET {base}/health` |

use super::types::{
    AnswerPayload, AnswersRequestBody, AnswersResponseBody, ErrorBody, HealthBody,
    PersonalityPayload, VotesRequestBody, VotesResponseBody,
};
use crate::config::FileBackendConfig;
use async_trait::async_trait;
use hunger_application::{ArenaBackend, BackendError, BackendHealth};
use hunger_domain::{Answer, AnswersRequest, Vote, VotesRequest, truncate};
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

/// Longest error body kept in [`BackendError::Status`]
const MAX_ERROR_BODY: usize = 200;

const DEFAULT_RATE_LIMIT_MESSAGE: &str = "Rate limit exceeded. Please try again later.";

/// [`ArenaBackend`] over HTTP
#[derive(Debug, Clone)]
pub struct HttpArenaBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpArenaBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("hunger-games/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BackendError::Connection(e.to_string()))?;

        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &FileBackendConfig) -> Result<Self, BackendError> {
        Self::new(&config.base_url, config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, BackendError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;
        decode(response).await
    }
}

#[async_trait]
impl ArenaBackend for HttpArenaBackend {
    async fn generate_answers(
        &self,
        request: &AnswersRequest,
    ) -> Result<Vec<Answer>, BackendError> {
        let body = AnswersRequestBody {
            question: request.question.content(),
            personalities: request
                .participants
                .iter()
                .map(PersonalityPayload::from)
                .collect(),
        };

        let response: AnswersResponseBody = self.post("/api/answers", &body).await?;
        info!("Received {} answers", response.responses.len());
        Ok(response.responses.into_iter().map(Answer::from).collect())
    }

    async fn generate_votes(&self, request: &VotesRequest) -> Result<Vec<Vote>, BackendError> {
        let body = VotesRequestBody {
            question: request.question.content(),
            responses: request.answers.iter().map(AnswerPayload::from).collect(),
        };

        let response: VotesResponseBody = self.post("/api/vote", &body).await?;
        info!("Received {} votes", response.votes.len());
        Ok(response.votes.into_iter().map(Vote::from).collect())
    }

    async fn health(&self) -> Result<BackendHealth, BackendError> {
        let url = self.url("/health");
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(map_transport_error)?;
        let body: HealthBody = decode(response).await?;
        Ok(body.into())
    }
}

fn map_transport_error(error: reqwest::Error) -> BackendError {
    if error.is_timeout() {
        BackendError::Timeout
    } else {
        BackendError::Connection(error.to_string())
    }
}

/// Turn a response into `T`, or into the matching [`BackendError`].
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
    let status = response.status();
    let text = response.text().await.map_err(map_transport_error)?;

    if status == StatusCode::TOO_MANY_REQUESTS {
        let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
        return Err(BackendError::RateLimited {
            message: body
                .describe()
                .unwrap_or_else(|| DEFAULT_RATE_LIMIT_MESSAGE.to_string()),
            retry_after: body.retry_after,
        });
    }

    if !status.is_success() {
        let body = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|b| b.describe())
            .unwrap_or_else(|| truncate(text.trim(), MAX_ERROR_BODY));
        return Err(BackendError::Status {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&text).map_err(|e| BackendError::Decode(e.to_string()))
}

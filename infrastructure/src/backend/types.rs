//! Wire types for the arena backend's JSON API

use hunger_application::BackendHealth;
use hunger_domain::{Answer, Participant, Vote};
use serde::{Deserialize, Serialize};

/// One personality as sent to `POST /api/answers`
#[derive(Debug, Serialize)]
pub struct PersonalityPayload<'a> {
    pub id: u32,
    pub name: &'a str,
    #[serde(rename = "trait")]
    pub trait_description: &'a str,
}

impl<'a> From<&'a Participant> for PersonalityPayload<'a> {
    fn from(participant: &'a Participant) -> Self {
        Self {
            id: participant.id.get(),
            name: &participant.name,
            trait_description: &participant.trait_description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnswersRequestBody<'a> {
    pub question: &'a str,
    pub personalities: Vec<PersonalityPayload<'a>>,
}

/// `{id, answer}`, used in both directions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerPayload {
    pub id: u32,
    pub answer: String,
}

impl From<&Answer> for AnswerPayload {
    fn from(answer: &Answer) -> Self {
        Self {
            id: answer.participant.get(),
            answer: answer.text.clone(),
        }
    }
}

impl From<AnswerPayload> for Answer {
    fn from(payload: AnswerPayload) -> Self {
        Answer::new(payload.id, payload.answer)
    }
}

#[derive(Debug, Deserialize)]
pub struct AnswersResponseBody {
    pub responses: Vec<AnswerPayload>,
}

#[derive(Debug, Serialize)]
pub struct VotesRequestBody<'a> {
    pub question: &'a str,
    pub responses: Vec<AnswerPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VotePayload {
    pub voter: u32,
    pub voted_for: u32,
    #[serde(default)]
    pub reason: String,
}

impl From<VotePayload> for Vote {
    fn from(payload: VotePayload) -> Self {
        Vote::new(payload.voter, payload.voted_for, payload.reason)
    }
}

#[derive(Debug, Deserialize)]
pub struct VotesResponseBody {
    pub votes: Vec<VotePayload>,
}

/// Error body returned with 429 and 503
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub retry_after: Option<String>,
}

impl ErrorBody {
    /// The most user-facing text available
    pub fn describe(&self) -> Option<String> {
        self.message.clone().or_else(|| self.error.clone())
    }
}

#[derive(Debug, Deserialize)]
pub struct HealthBody {
    pub status: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub api_key_configured: Option<bool>,
    #[serde(default)]
    pub redis_connected: Option<bool>,
    #[serde(default)]
    pub request_limit: Option<u64>,
}

impl From<HealthBody> for BackendHealth {
    fn from(body: HealthBody) -> Self {
        Self {
            status: body.status,
            model: body.model,
            api_key_configured: body.api_key_configured,
            redis_connected: body.redis_connected,
            request_limit: body.request_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hunger_domain::Roster;

    #[test]
    fn test_personality_uses_trait_key() {
        let roster = Roster::standard();
        let body = AnswersRequestBody {
            question: "Why?",
            personalities: roster.alive().map(PersonalityPayload::from).collect(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["personalities"][0]["id"], 1);
        assert_eq!(json["personalities"][0]["name"], "The Philosopher");
        assert_eq!(
            json["personalities"][0]["trait"],
            "Deep thinker, questions everything"
        );
        assert_eq!(json["personalities"].as_array().unwrap().len(), 8);
    }

    #[test]
    fn test_vote_reads_camel_case() {
        let body: VotesResponseBody = serde_json::from_str(
            r#"{"votes": [{"voter": 1, "votedFor": 4, "reason": "Too gloomy"}, {"voter": 2, "votedFor": 4}]}"#,
        )
        .unwrap();
        let votes: Vec<Vote> = body.votes.into_iter().map(Vote::from).collect();
        assert_eq!(votes[0], Vote::new(1, 4, "Too gloomy"));
        assert_eq!(votes[1].reason, "");
    }
}

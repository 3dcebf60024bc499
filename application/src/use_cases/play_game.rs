//! Play Game use case.
//!
//! Drives a [`GameState`] against an [`ArenaBackend`]. User intents are
//! applied to the state machine, any resulting fetch is run against the
//! backend, and the outcome is applied back as a completion action.
//!
//! The state lives behind an async mutex that is released before every
//! backend await, so [`GameSession::restart`] can run while a fetch is in
//! flight. The late response is then dropped by the epoch check.

use crate::ports::arena_backend::{ArenaBackend, BackendError, BackendHealth};
use crate::ports::game_event_logger::{GameEventLogger, NoGameEventLogger};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use hunger_domain::{
    AnswersRequest, Command, GameAction, GameError, GameEvent, GameState, ParticipantId,
    RequestKind, ResponsePolicy, Transition, VotesRequest, truncate,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Errors that can occur while playing
#[derive(Error, Debug)]
pub enum PlayGameError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

impl PlayGameError {
    /// Whether the action was simply not available in the current stage
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, PlayGameError::Game(e) if e.is_invalid_transition())
    }
}

/// What one session call did
#[derive(Debug, Clone)]
pub struct RoundReport {
    /// Every event emitted, in order, including the backend completion
    pub events: Vec<GameEvent>,
    /// State after the call
    pub snapshot: GameState,
}

impl RoundReport {
    pub fn contains(&self, event_type: &str) -> bool {
        self.events.iter().any(|e| e.event_type() == event_type)
    }

    /// Whether the backend response was dropped because the game moved on
    pub fn was_discarded(&self) -> bool {
        self.contains("stale_response_discarded")
    }
}

/// One game against one backend
pub struct GameSession<B: ArenaBackend> {
    backend: B,
    state: Mutex<GameState>,
    progress: Arc<dyn ProgressNotifier>,
    event_logger: Arc<dyn GameEventLogger>,
}

impl<B: ArenaBackend> GameSession<B> {
    pub fn new(backend: B) -> Self {
        Self::with_policy(backend, ResponsePolicy::default())
    }

    pub fn with_policy(backend: B, policy: ResponsePolicy) -> Self {
        Self {
            backend,
            state: Mutex::new(GameState::new(policy)),
            progress: Arc::new(NoProgress),
            event_logger: Arc::new(NoGameEventLogger),
        }
    }

    /// Create with a progress notifier.
    pub fn with_progress(mut self, progress: Arc<dyn ProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    /// Create with a game event logger.
    pub fn with_event_logger(mut self, logger: Arc<dyn GameEventLogger>) -> Self {
        self.event_logger = logger;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // ==================== User intents ====================

    /// Put a question to the alive participants and wait for their answers
    pub async fn ask(&self, question: impl Into<String>) -> Result<RoundReport, PlayGameError> {
        let question = question.into();
        info!("Asking: {}", truncate(question.trim(), 100));
        self.apply_and_run(GameAction::SubmitQuestion(question))
            .await
    }

    /// Ask the participants to vote on the current answers
    pub async fn start_vote(&self) -> Result<RoundReport, PlayGameError> {
        info!("Starting vote");
        self.apply_and_run(GameAction::StartVote).await
    }

    /// Resolve a pending tie by eliminating `id`
    pub async fn break_tie(&self, id: ParticipantId) -> Result<RoundReport, PlayGameError> {
        info!("Tie broken by player: eliminating {}", id);
        self.apply_and_run(GameAction::BreakTie(id)).await
    }

    pub async fn next_round(&self) -> Result<RoundReport, PlayGameError> {
        self.apply_and_run(GameAction::NextRound).await
    }

    /// Start over from round 1. Always succeeds.
    pub async fn restart(&self) -> RoundReport {
        let mut state = self.state.lock().await;
        let events = match state.apply(GameAction::Restart) {
            Ok(transition) => transition.events,
            Err(e) => {
                // Restart is valid in every stage
                warn!("Restart rejected: {}", e);
                Vec::new()
            }
        };
        let snapshot = state.clone();
        drop(state);

        info!("Game restarted (epoch {})", snapshot.epoch());
        self.record(&events);
        RoundReport { events, snapshot }
    }

    pub async fn snapshot(&self) -> GameState {
        self.state.lock().await.clone()
    }

    pub async fn check_health(&self) -> Result<BackendHealth, PlayGameError> {
        Ok(self.backend.health().await?)
    }

    // ==================== Internals ====================

    async fn apply_and_run(&self, action: GameAction) -> Result<RoundReport, PlayGameError> {
        let transition = self.apply(action).await?;
        let mut events = transition.events;

        if let Some(command) = transition.command {
            events.extend(self.run(command).await?);
        }

        Ok(RoundReport {
            events,
            snapshot: self.snapshot().await,
        })
    }

    async fn apply(&self, action: GameAction) -> Result<Transition, GameError> {
        let transition = {
            let mut state = self.state.lock().await;
            state.apply(action)?
        };
        self.record(&transition.events);
        Ok(transition)
    }

    /// Perform one fetch and feed the outcome back into the state machine.
    async fn run(&self, command: Command) -> Result<Vec<GameEvent>, PlayGameError> {
        let completion = match command {
            Command::FetchAnswers(request) => self.fetch_answers(request).await,
            Command::FetchVotes(request) => self.fetch_votes(request).await,
        };
        Ok(self.apply(completion).await?.events)
    }

    async fn fetch_answers(&self, request: AnswersRequest) -> GameAction {
        let kind = RequestKind::Answers;
        debug!(
            "Requesting {} answers ({})",
            request.participants.len(),
            request.epoch
        );
        self.progress.on_request_start(kind);
        let result = self.backend.generate_answers(&request).await;
        self.progress.on_request_complete(kind, result.is_ok());

        match result {
            Ok(answers) => GameAction::AnswersReceived {
                epoch: request.epoch,
                answers,
            },
            Err(e) => {
                warn!("Answer request failed: {}", e);
                GameAction::AnswersFailed {
                    epoch: request.epoch,
                    failure: e.into(),
                }
            }
        }
    }

    async fn fetch_votes(&self, request: VotesRequest) -> GameAction {
        let kind = RequestKind::Votes;
        debug!(
            "Requesting votes on {} answers ({})",
            request.answers.len(),
            request.epoch
        );
        self.progress.on_request_start(kind);
        let result = self.backend.generate_votes(&request).await;
        self.progress.on_request_complete(kind, result.is_ok());

        match result {
            Ok(votes) => GameAction::VotesReceived {
                epoch: request.epoch,
                votes,
            },
            Err(e) => {
                warn!("Vote request failed: {}", e);
                GameAction::VotesFailed {
                    epoch: request.epoch,
                    failure: e.into(),
                }
            }
        }
    }

    fn record(&self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::ResponseIssues {
                    issues, rejected, ..
                } => {
                    for issue in issues {
                        warn!("Backend batch issue: {}", issue);
                    }
                    if *rejected {
                        warn!("{}", event);
                    }
                }
                GameEvent::RequestAborted { .. } | GameEvent::StaleResponseDiscarded { .. } => {
                    warn!("{}", event);
                }
                _ => debug!("{}", event),
            }
            self.event_logger.log(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use hunger_domain::{Answer, Stage, Vote};
    use std::collections::VecDeque;
    use std::sync::Mutex as StdMutex;
    use tokio::sync::Notify;

    // ==================== Test Mocks ====================

    /// Answers default to one per requested participant; votes must be queued.
    #[derive(Default)]
    struct MockBackend {
        answers: StdMutex<VecDeque<Result<Vec<Answer>, BackendError>>>,
        votes: StdMutex<VecDeque<Result<Vec<Vote>, BackendError>>>,
        answer_calls: StdMutex<Vec<AnswersRequest>>,
        /// When set, `generate_answers` signals `entered` and then waits on `release`
        gate: Option<(Arc<Notify>, Arc<Notify>)>,
    }

    impl MockBackend {
        fn with_answers(self, result: Result<Vec<Answer>, BackendError>) -> Self {
            self.answers.lock().unwrap().push_back(result);
            self
        }

        fn with_votes(self, result: Result<Vec<Vote>, BackendError>) -> Self {
            self.votes.lock().unwrap().push_back(result);
            self
        }
    }

    #[async_trait]
    impl ArenaBackend for MockBackend {
        async fn generate_answers(
            &self,
            request: &AnswersRequest,
        ) -> Result<Vec<Answer>, BackendError> {
            self.answer_calls.lock().unwrap().push(request.clone());
            if let Some((entered, release)) = &self.gate {
                entered.notify_one();
                release.notified().await;
            }
            let queued = self.answers.lock().unwrap().pop_front();
            queued.unwrap_or_else(|| {
                Ok(request
                    .participants
                    .iter()
                    .map(|p| Answer::new(p.id, format!("{} says hi", p.name)))
                    .collect())
            })
        }

        async fn generate_votes(&self, _request: &VotesRequest) -> Result<Vec<Vote>, BackendError> {
            self.votes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(BackendError::Decode("no votes queued".to_string())))
        }

        async fn health(&self) -> Result<BackendHealth, BackendError> {
            Ok(BackendHealth {
                status: "healthy".to_string(),
                ..Default::default()
            })
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        calls: StdMutex<Vec<(RequestKind, Option<bool>)>>,
    }

    impl ProgressNotifier for RecordingProgress {
        fn on_request_start(&self, kind: RequestKind) {
            self.calls.lock().unwrap().push((kind, None));
        }

        fn on_request_complete(&self, kind: RequestKind, success: bool) {
            self.calls.lock().unwrap().push((kind, Some(success)));
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        types: StdMutex<Vec<&'static str>>,
    }

    impl GameEventLogger for RecordingLogger {
        fn log(&self, event: &GameEvent) {
            self.types.lock().unwrap().push(event.event_type());
        }
    }

    /// Everyone votes for `target`; `target` votes for `fallback`
    fn votes_against(alive: &[u32], target: u32) -> Vec<Vote> {
        let fallback = alive.iter().copied().find(|id| *id != target).unwrap();
        alive
            .iter()
            .map(|&voter| {
                if voter == target {
                    Vote::new(voter, fallback, "you")
                } else {
                    Vote::new(voter, target, "them")
                }
            })
            .collect()
    }

    const ALL: [u32; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_ask_records_answers() {
        let progress = Arc::new(RecordingProgress::default());
        let session = GameSession::new(MockBackend::default()).with_progress(progress.clone());

        let report = session.ask("What is courage?").await.unwrap();

        assert_eq!(report.snapshot.stage(), Stage::Answers);
        assert_eq!(report.snapshot.answers().len(), 8);
        assert!(report.contains("question_asked"));
        assert!(report.contains("answers_recorded"));
        assert_eq!(
            *progress.calls.lock().unwrap(),
            vec![
                (RequestKind::Answers, None),
                (RequestKind::Answers, Some(true))
            ]
        );
    }

    #[tokio::test]
    async fn test_rate_limited_ask_returns_to_input() {
        let backend = MockBackend::default().with_answers(Err(BackendError::RateLimited {
            message: "You can only play one game every 12 hours.".to_string(),
            retry_after: Some("12h 0m".to_string()),
        }));
        let session = GameSession::new(backend);

        let report = session.ask("Anyone?").await.unwrap();
        let state = report.snapshot;

        assert_eq!(state.stage(), Stage::Input);
        assert!(state.answers().is_empty());
        assert_eq!(state.round(), 1);
        assert_eq!(
            state.notice().map(|n| n.message.as_str()),
            Some("You can only play one game every 12 hours.")
        );
    }

    #[tokio::test]
    async fn test_full_round_eliminates_single_loser() {
        let backend = MockBackend::default().with_votes(Ok(votes_against(&ALL, 5)));
        let logger = Arc::new(RecordingLogger::default());
        let session = GameSession::new(backend).with_event_logger(logger.clone());

        session.ask("Pineapple on pizza?").await.unwrap();
        let report = session.start_vote().await.unwrap();

        assert_eq!(report.snapshot.stage(), Stage::Eliminated);
        assert_eq!(report.snapshot.eliminated().unwrap().id.get(), 5);
        assert_eq!(
            *logger.types.lock().unwrap(),
            vec![
                "question_asked",
                "answers_recorded",
                "voting_started",
                "votes_recorded",
                "eliminated"
            ]
        );

        let report = session.next_round().await.unwrap();
        assert_eq!(report.snapshot.round(), 2);

        // Eliminated participants are not asked again
        session.ask("Round two?").await.unwrap();
        let calls = session.backend().answer_calls.lock().unwrap();
        assert_eq!(calls.last().unwrap().participants.len(), 7);
    }

    #[tokio::test]
    async fn test_tie_then_break() {
        let split: Vec<Vote> = ALL
            .iter()
            .map(|&voter| Vote::new(voter, if voter <= 4 { 8 } else { 1 }, "split"))
            .collect();
        let session = GameSession::new(MockBackend::default().with_votes(Ok(split)));

        session.ask("Tea or coffee?").await.unwrap();
        let report = session.start_vote().await.unwrap();
        assert!(report.contains("tie_break_required"));
        assert!(report.snapshot.is_tie_pending());

        let err = session.break_tie(ParticipantId::new(4)).await.unwrap_err();
        assert!(matches!(
            err,
            PlayGameError::Game(GameError::NotATieCandidate(_))
        ));

        let report = session.break_tie(ParticipantId::new(8)).await.unwrap();
        assert_eq!(report.snapshot.stage(), Stage::Eliminated);
        assert_eq!(report.snapshot.eliminated().unwrap().id.get(), 8);
    }

    #[tokio::test]
    async fn test_vote_failure_returns_to_answers() {
        let backend =
            MockBackend::default().with_votes(Err(BackendError::Connection("reset".to_string())));
        let progress = Arc::new(RecordingProgress::default());
        let session = GameSession::new(backend).with_progress(progress.clone());

        session.ask("Cats?").await.unwrap();
        let report = session.start_vote().await.unwrap();

        assert_eq!(report.snapshot.stage(), Stage::Answers);
        assert!(report.snapshot.notice().is_none());
        assert!(report.contains("request_aborted"));
        assert_eq!(
            progress.calls.lock().unwrap().last(),
            Some(&(RequestKind::Votes, Some(false)))
        );
    }

    #[tokio::test]
    async fn test_invalid_action_is_reported() {
        let session = GameSession::new(MockBackend::default());
        let err = session.start_vote().await.unwrap_err();
        assert!(err.is_invalid_transition());
        assert_eq!(session.snapshot().await.stage(), Stage::Input);
    }

    #[tokio::test]
    async fn test_restart_during_fetch_discards_late_answers() {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let backend = MockBackend {
            gate: Some((entered.clone(), release.clone())),
            ..Default::default()
        };
        let session = Arc::new(GameSession::new(backend));

        let asking = {
            let session = session.clone();
            tokio::spawn(async move { session.ask("Slow one?").await })
        };

        entered.notified().await;
        assert_eq!(session.snapshot().await.stage(), Stage::Answering);

        let restarted = session.restart().await;
        assert_eq!(restarted.snapshot.stage(), Stage::Input);
        release.notify_one();

        let report = asking.await.unwrap().unwrap();
        assert!(report.was_discarded());

        let state = session.snapshot().await;
        assert_eq!(state.stage(), Stage::Input);
        assert_eq!(state.round(), 1);
        assert!(state.question().is_none());
        assert!(state.answers().is_empty());
        assert_eq!(state.roster().alive_count(), 8);
    }

    #[tokio::test]
    async fn test_lenient_policy_accepts_partial_votes() {
        let partial = vec![Vote::new(1, 3, "a"), Vote::new(2, 3, "b")];
        let session = GameSession::with_policy(
            MockBackend::default().with_votes(Ok(partial)),
            ResponsePolicy::Lenient,
        );

        session.ask("Quick vote?").await.unwrap();
        let report = session.start_vote().await.unwrap();

        assert!(report.contains("response_issues"));
        assert_eq!(report.snapshot.eliminated().unwrap().id.get(), 3);
    }

    #[tokio::test]
    async fn test_check_health() {
        let session = GameSession::new(MockBackend::default());
        assert!(session.check_health().await.unwrap().is_healthy());
    }
}

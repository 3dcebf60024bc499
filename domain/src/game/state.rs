//! Game state and its reducer
//!
//! [`GameState::apply`] is the only way to change a game. Each call either
//! returns an error and leaves the state untouched, or commits the change and
//! returns a [`Transition`] with the events that happened and, when the
//! game needs data from the backend, the [`Command`] to run.
//!
//! ```text
//! input ──submit──▶ answering ──answers──▶ answers ──vote──▶ voting
//!   ▲                   │ fail/429                   ▲          │
//!   └───────────────────┘                            └── fail ──┤
//!   ▲                                                           │ tally
//!   │                               ┌─── tie ◀──────────────────┤
//!   │                               ▼ pick                      ▼
//!   └──────── next round ──── eliminated ──── 1 left ──▶ winner
//! ```

use super::action::{FetchFailure, GameAction};
use super::command::{AnswersRequest, Command, VotesRequest};
use super::epoch::Epoch;
use super::error::GameError;
use super::event::{GameEvent, Notice, RequestKind};
use super::stage::Stage;
use crate::core::question::Question;
use crate::participant::{Participant, ParticipantId, Roster};
use crate::round::{
    Answer, ResponsePolicy, TallyOutcome, ValidationIssue, Vote, VoteTally, validate_answers,
    validate_votes,
};
use serde::Serialize;

/// Result of a successfully applied action
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    pub events: Vec<GameEvent>,
    pub command: Option<Command>,
}

impl Transition {
    fn with_events(events: Vec<GameEvent>) -> Self {
        Self {
            events,
            command: None,
        }
    }

    fn with_command(events: Vec<GameEvent>, command: Command) -> Self {
        Self {
            events,
            command: Some(command),
        }
    }
}

/// Complete state of one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    roster: Roster,
    round: u32,
    stage: Stage,
    question: Option<Question>,
    answers: Vec<Answer>,
    votes: Vec<Vote>,
    /// Computed when the votes arrive, before anyone is eliminated
    tally: Option<VoteTally>,
    tie_candidates: Vec<ParticipantId>,
    eliminated: Option<ParticipantId>,
    notice: Option<Notice>,
    epoch: Epoch,
    policy: ResponsePolicy,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(ResponsePolicy::default())
    }
}

impl GameState {
    /// A fresh game: eight alive participants, round 1, waiting for a question
    pub fn new(policy: ResponsePolicy) -> Self {
        Self {
            roster: Roster::standard(),
            round: 1,
            stage: Stage::Input,
            question: None,
            answers: Vec::new(),
            votes: Vec::new(),
            tally: None,
            tie_candidates: Vec::new(),
            eliminated: None,
            notice: None,
            epoch: Epoch::initial(),
            policy,
        }
    }

    // ==================== Accessors ====================

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn votes(&self) -> &[Vote] {
        &self.votes
    }

    /// Non-empty only while a tie-break is pending
    pub fn tie_candidates(&self) -> &[ParticipantId] {
        &self.tie_candidates
    }

    pub fn is_tie_pending(&self) -> bool {
        self.stage == Stage::Voting && !self.tie_candidates.is_empty()
    }

    /// Participant eliminated in the current round
    pub fn eliminated(&self) -> Option<&Participant> {
        self.eliminated.and_then(|id| self.roster.get(id))
    }

    pub fn winner(&self) -> Option<&Participant> {
        match self.stage {
            Stage::Winner => self.roster.sole_survivor(),
            _ => None,
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn policy(&self) -> ResponsePolicy {
        self.policy
    }

    /// Tally of the recorded votes, as counted before the elimination
    pub fn tally(&self) -> Option<&VoteTally> {
        self.tally.as_ref()
    }

    pub fn can_advance(&self) -> bool {
        self.stage == Stage::Eliminated && self.roster.alive_count() >= 2
    }

    // ==================== Reducer ====================

    /// Apply one action
    pub fn apply(&mut self, action: GameAction) -> Result<Transition, GameError> {
        let name = action.name();
        match action {
            GameAction::SubmitQuestion(text) => self.submit_question(text, name),
            GameAction::AnswersReceived { epoch, answers } => {
                self.receive_answers(epoch, answers, name)
            }
            GameAction::AnswersFailed { epoch, failure } => {
                self.fail_answers(epoch, failure, name)
            }
            GameAction::StartVote => self.start_vote(name),
            GameAction::VotesReceived { epoch, votes } => self.receive_votes(epoch, votes, name),
            GameAction::VotesFailed { epoch, failure } => self.fail_votes(epoch, failure, name),
            GameAction::BreakTie(id) => self.break_tie(id, name),
            GameAction::NextRound => self.next_round(name),
            GameAction::Restart => Ok(self.restart()),
        }
    }

    fn require_stage(&self, expected: Stage, action: &'static str) -> Result<(), GameError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(GameError::InvalidTransition {
                stage: self.stage,
                action,
            })
        }
    }

    /// `Some` when the response must be dropped because a newer request
    /// or a restart has happened since it was issued.
    fn stale(&self, request: RequestKind, epoch: Epoch) -> Option<Transition> {
        (epoch != self.epoch).then(|| {
            Transition::with_events(vec![GameEvent::StaleResponseDiscarded {
                request,
                epoch,
                current: self.epoch,
            }])
        })
    }

    fn submit_question(
        &mut self,
        text: String,
        action: &'static str,
    ) -> Result<Transition, GameError> {
        self.require_stage(Stage::Input, action)?;
        let question = Question::new(text)?;

        self.epoch = self.epoch.next();
        self.stage = Stage::Answering;
        self.question = Some(question.clone());
        self.answers.clear();
        self.votes.clear();
        self.tally = None;
        self.notice = None;

        let event = GameEvent::QuestionAsked {
            round: self.round,
            question: question.content().to_string(),
            epoch: self.epoch,
        };
        let request = AnswersRequest {
            epoch: self.epoch,
            question,
            participants: self.roster.alive().cloned().collect(),
        };
        Ok(Transition::with_command(
            vec![event],
            Command::FetchAnswers(request),
        ))
    }

    fn receive_answers(
        &mut self,
        epoch: Epoch,
        answers: Vec<Answer>,
        action: &'static str,
    ) -> Result<Transition, GameError> {
        if let Some(stale) = self.stale(RequestKind::Answers, epoch) {
            return Ok(stale);
        }
        self.require_stage(Stage::Answering, action)?;

        let issues = validate_answers(&self.roster, &answers);
        let mut events = Vec::new();
        if let Some(event) = self.issues_event(RequestKind::Answers, &issues) {
            events.push(event);
        }

        if self.policy.rejects(&issues) {
            let reason = format!("malformed answer batch: {}", join_issues(&issues));
            self.notice = Some(Notice::alert(format!(
                "The arena returned a malformed answer batch ({})",
                join_issues(&issues)
            )));
            self.return_to_input();
            events.push(GameEvent::RequestAborted {
                request: RequestKind::Answers,
                returned_to: Stage::Input,
                reason,
                rate_limited: false,
            });
            return Ok(Transition::with_events(events));
        }

        events.push(GameEvent::AnswersRecorded {
            round: self.round,
            count: answers.len(),
        });
        self.answers = answers;
        self.stage = Stage::Answers;
        self.notice = None;
        Ok(Transition::with_events(events))
    }

    fn fail_answers(
        &mut self,
        epoch: Epoch,
        failure: FetchFailure,
        action: &'static str,
    ) -> Result<Transition, GameError> {
        if let Some(stale) = self.stale(RequestKind::Answers, epoch) {
            return Ok(stale);
        }
        self.require_stage(Stage::Answering, action)?;

        self.notice = Some(match &failure {
            FetchFailure::RateLimited { message } => Notice::cooldown(message.clone()),
            FetchFailure::Failed { reason } => Notice::alert(reason.clone()),
        });
        self.return_to_input();

        Ok(Transition::with_events(vec![GameEvent::RequestAborted {
            request: RequestKind::Answers,
            returned_to: Stage::Input,
            reason: failure.description().to_string(),
            rate_limited: failure.is_rate_limited(),
        }]))
    }

    /// Abort the answer request. The question is kept so it can be resubmitted.
    fn return_to_input(&mut self) {
        self.stage = Stage::Input;
        self.answers.clear();
        self.votes.clear();
        self.tally = None;
    }

    fn start_vote(&mut self, action: &'static str) -> Result<Transition, GameError> {
        self.require_stage(Stage::Answers, action)?;
        let question = self.question.clone().ok_or(GameError::MissingQuestion)?;

        self.epoch = self.epoch.next();
        self.stage = Stage::Voting;
        self.votes.clear();
        self.tally = None;
        self.tie_candidates.clear();
        self.notice = None;

        let request = VotesRequest {
            epoch: self.epoch,
            question,
            answers: self.answers.clone(),
        };
        Ok(Transition::with_command(
            vec![GameEvent::VotingStarted {
                round: self.round,
                epoch: self.epoch,
            }],
            Command::FetchVotes(request),
        ))
    }

    fn receive_votes(
        &mut self,
        epoch: Epoch,
        votes: Vec<Vote>,
        action: &'static str,
    ) -> Result<Transition, GameError> {
        if let Some(stale) = self.stale(RequestKind::Votes, epoch) {
            return Ok(stale);
        }
        self.require_stage(Stage::Voting, action)?;
        if self.is_tie_pending() {
            return Err(GameError::InvalidTransition {
                stage: self.stage,
                action,
            });
        }

        let issues = validate_votes(&self.roster, &votes);
        let mut events = Vec::new();
        if let Some(event) = self.issues_event(RequestKind::Votes, &issues) {
            events.push(event);
        }

        if self.policy.rejects(&issues) {
            self.stage = Stage::Answers;
            events.push(GameEvent::RequestAborted {
                request: RequestKind::Votes,
                returned_to: Stage::Answers,
                reason: format!("malformed vote batch: {}", join_issues(&issues)),
                rate_limited: false,
            });
            return Ok(Transition::with_events(events));
        }

        let tally = VoteTally::compute(&self.roster, &votes);
        events.push(GameEvent::VotesRecorded {
            round: self.round,
            count: votes.len(),
        });

        match tally.outcome() {
            TallyOutcome::Eliminate(loser) => {
                self.eliminate(loser, tally.max(), &mut events)?;
                self.votes = votes;
                self.tally = Some(tally);
            }
            TallyOutcome::Tie(candidates) if candidates.is_empty() => {
                return Err(GameError::EmptyTally);
            }
            TallyOutcome::Tie(candidates) => {
                events.push(GameEvent::TieBreakRequired {
                    round: self.round,
                    candidates: candidates.clone(),
                    votes: tally.max(),
                });
                self.tie_candidates = candidates;
                self.votes = votes;
                self.tally = Some(tally);
            }
        }

        Ok(Transition::with_events(events))
    }

    fn fail_votes(
        &mut self,
        epoch: Epoch,
        failure: FetchFailure,
        action: &'static str,
    ) -> Result<Transition, GameError> {
        if let Some(stale) = self.stale(RequestKind::Votes, epoch) {
            return Ok(stale);
        }
        self.require_stage(Stage::Voting, action)?;

        self.stage = Stage::Answers;
        self.votes.clear();
        self.tally = None;
        self.tie_candidates.clear();

        Ok(Transition::with_events(vec![GameEvent::RequestAborted {
            request: RequestKind::Votes,
            returned_to: Stage::Answers,
            reason: failure.description().to_string(),
            rate_limited: failure.is_rate_limited(),
        }]))
    }

    fn break_tie(&mut self, id: ParticipantId, action: &'static str) -> Result<Transition, GameError> {
        self.require_stage(Stage::Voting, action)?;
        if self.tie_candidates.is_empty() {
            return Err(GameError::InvalidTransition {
                stage: self.stage,
                action,
            });
        }
        if !self.tie_candidates.contains(&id) {
            return Err(GameError::NotATieCandidate(id));
        }

        let votes = self.tally.as_ref().map_or(0, |tally| tally.count_for(id));
        let mut events = Vec::new();
        self.eliminate(id, votes, &mut events)?;
        Ok(Transition::with_events(events))
    }

    /// Flip exactly one alive flag and move to `eliminated`, or straight on
    /// to `winner` when a single participant is left.
    fn eliminate(
        &mut self,
        id: ParticipantId,
        votes: usize,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), GameError> {
        self.roster.eliminate(id)?;
        self.eliminated = Some(id);
        self.tie_candidates.clear();
        self.stage = Stage::Eliminated;
        events.push(GameEvent::Eliminated {
            round: self.round,
            participant: id,
            votes,
        });

        if let Some(survivor) = self.roster.sole_survivor() {
            events.push(GameEvent::WinnerCrowned {
                round: self.round,
                participant: survivor.id,
            });
            self.stage = Stage::Winner;
        }
        Ok(())
    }

    fn next_round(&mut self, action: &'static str) -> Result<Transition, GameError> {
        if self.stage == Stage::Winner {
            return Err(GameError::GameOver);
        }
        self.require_stage(Stage::Eliminated, action)?;
        if self.roster.alive_count() < 2 {
            return Err(GameError::GameOver);
        }

        self.round += 1;
        self.stage = Stage::Input;
        self.question = None;
        self.answers.clear();
        self.votes.clear();
        self.tally = None;
        self.eliminated = None;
        self.notice = None;

        Ok(Transition::with_events(vec![GameEvent::RoundAdvanced {
            round: self.round,
        }]))
    }

    /// Reset everything except the policy. The epoch moves forward so any
    /// in-flight response is discarded when it lands.
    fn restart(&mut self) -> Transition {
        let epoch = self.epoch.next();
        *self = Self {
            epoch,
            ..Self::new(self.policy)
        };
        Transition::with_events(vec![GameEvent::Restarted])
    }

    fn issues_event(&self, request: RequestKind, issues: &[ValidationIssue]) -> Option<GameEvent> {
        (!issues.is_empty()).then(|| GameEvent::ResponseIssues {
            request,
            rejected: self.policy.rejects(issues),
            issues: issues.to_vec(),
        })
    }
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

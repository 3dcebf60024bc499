//! REPL (Read-Eval-Print Loop) for playing the game

use super::command::ReplCommand;
use crate::config::ReplConfig;
use crate::output::console::ConsoleFormatter;
use crate::reveal::RevealPacer;
use hunger_application::{ArenaBackend, GameSession, PlayGameError, RoundReport};
use hunger_domain::{GameEvent, GameState, ParticipantId, Stage};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;
use tracing::debug;

/// Interactive game REPL
pub struct GameRepl<B: ArenaBackend + 'static> {
    session: GameSession<B>,
    pacer: RevealPacer,
    config: ReplConfig,
}

impl<B: ArenaBackend + 'static> GameRepl<B> {
    pub fn new(session: GameSession<B>, pacer: RevealPacer) -> Self {
        Self {
            session,
            pacer,
            config: ReplConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self.history_path();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome().await;

        loop {
            let state = self.session.snapshot().await;
            let readline = rl.readline(&ConsoleFormatter::prompt(&state));

            match readline {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    let command = ReplCommand::parse(line, state.is_tie_pending());
                    if matches!(command, ReplCommand::Ask(_)) {
                        let _ = rl.add_history_entry(line);
                    }

                    if self.handle(command).await {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn history_path(&self) -> Option<PathBuf> {
        self.config
            .history_file
            .clone()
            .or_else(|| dirs::data_dir().map(|p| p.join("hunger-games").join("history.txt")))
    }

    async fn print_welcome(&self) {
        let state = self.session.snapshot().await;
        println!();
        println!("{}", ConsoleFormatter::title());
        println!();
        println!("Eight AI personalities enter. One leaves.");
        println!();
        print!("{}", ConsoleFormatter::roster(state.roster()));
        print!("{}", ConsoleFormatter::help());
        println!();
        println!("{}", ConsoleFormatter::next_step(&state));
    }

    /// Execute one command. Returns true if the REPL should exit.
    pub async fn handle(&self, command: ReplCommand) -> bool {
        debug!("REPL command: {:?}", command);
        match command {
            ReplCommand::Ask(question) => self.ask(&question).await,
            ReplCommand::Vote => self.vote().await,
            ReplCommand::Pick(id) => self.pick(id).await,
            ReplCommand::Next => self.next_round().await,
            ReplCommand::Restart => self.restart().await,
            ReplCommand::Status => {
                print!("{}", ConsoleFormatter::status(&self.session.snapshot().await));
            }
            ReplCommand::Help => print!("{}", ConsoleFormatter::help()),
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Invalid(usage) => println!("{}", usage),
            ReplCommand::Unknown(command) => {
                println!("Unknown command: {}", command);
                println!("Type /help for available commands");
            }
        }
        false
    }

    async fn ask(&self, question: &str) {
        let state = self.session.snapshot().await;
        if state.stage() == Stage::Input {
            print!("{}", ConsoleFormatter::round_banner(&state));
        }

        let report = match self.session.ask(question).await {
            Ok(report) => report,
            Err(e) => return self.report_error(e).await,
        };
        if report.was_discarded() {
            return;
        }

        let state = &report.snapshot;
        match state.stage() {
            Stage::Answers => {
                if let Some(question) = state.question() {
                    print!("\n{}", ConsoleFormatter::question(question.content()));
                }
                self.pacer
                    .reveal_answers(state.answers(), |_, answer| {
                        if let Some(participant) = state.roster().get(answer.participant) {
                            print!("{}", ConsoleFormatter::answer(participant, answer));
                        }
                    })
                    .await;
                println!();
            }
            _ => {
                if let Some(notice) = state.notice() {
                    print!(
                        "{}",
                        ConsoleFormatter::notice(notice, &self.config.backend_url)
                    );
                }
            }
        }
        println!("{}", ConsoleFormatter::next_step(state));
    }

    async fn vote(&self) {
        let report = match self.session.start_vote().await {
            Ok(report) => report,
            Err(e) => return self.report_error(e).await,
        };
        if report.was_discarded() {
            return;
        }

        let state = &report.snapshot;
        if state.stage() == Stage::Answers {
            // Vote failures are only logged; the round stays playable
            println!(
                "{}",
                ConsoleFormatter::error("The vote could not be completed. Type /vote to retry.")
            );
            return;
        }

        println!();
        self.pacer
            .reveal_votes(state.votes(), |vote, count| {
                println!("{}", ConsoleFormatter::vote(state.roster(), vote, count));
            })
            .await;

        self.pacer.tally_pause().await;
        if let Some(tally) = state.tally() {
            print!("{}", ConsoleFormatter::tally(state.roster(), tally));
        }

        if state.is_tie_pending() {
            let votes = state.tally().map_or(0, |t| t.max());
            print!(
                "{}",
                ConsoleFormatter::tie(state.roster(), state.tie_candidates(), votes)
            );
            return;
        }

        self.show_elimination(&report).await;
    }

    async fn pick(&self, id: ParticipantId) {
        match self.session.break_tie(id).await {
            Ok(report) => self.show_elimination(&report).await,
            Err(e) => self.report_error(e).await,
        }
    }

    async fn next_round(&self) {
        match self.session.next_round().await {
            Ok(report) => {
                print!("{}", ConsoleFormatter::round_banner(&report.snapshot));
                println!("{}", ConsoleFormatter::next_step(&report.snapshot));
            }
            Err(e) => self.report_error(e).await,
        }
    }

    async fn restart(&self) {
        let report = self.session.restart().await;
        println!("\nA new game begins. All eight tributes return.\n");
        print!("{}", ConsoleFormatter::roster(report.snapshot.roster()));
        println!("{}", ConsoleFormatter::next_step(&report.snapshot));
    }

    async fn show_elimination(&self, report: &RoundReport) {
        let state = &report.snapshot;

        for event in &report.events {
            match event {
                GameEvent::Eliminated {
                    participant, votes, ..
                } => {
                    if let Some(p) = state.roster().get(*participant) {
                        print!("{}", ConsoleFormatter::eliminated(p, *votes));
                    }
                }
                GameEvent::WinnerCrowned { .. } => {
                    self.pacer.winner_pause().await;
                    if let Some(winner) = state.winner() {
                        println!("\n{}", ConsoleFormatter::winner(winner));
                    }
                }
                _ => {}
            }
        }

        if state.stage() != Stage::Winner {
            println!("{}", ConsoleFormatter::next_step(state));
        }
    }

    async fn report_error(&self, error: PlayGameError) {
        println!("{}", ConsoleFormatter::error(&error));
        if error.is_invalid_transition() {
            let state: GameState = self.session.snapshot().await;
            println!("{}", ConsoleFormatter::next_step(&state));
        }
    }
}

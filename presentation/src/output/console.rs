//! Console output formatter for the game

use colored::Colorize;
use hunger_domain::{
    Answer, GameState, Notice, NoticeSeverity, Participant, ParticipantId, Roster, Stage, Vote,
    VoteTally, truncate,
};

/// Longest vote reason shown in the reveal
const MAX_REASON_LEN: usize = 100;

/// Formats game state for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn title() -> String {
        Self::header("AI HUNGER GAMES")
    }

    /// The eight tributes, with eliminated ones struck out
    pub fn roster(roster: &Roster) -> String {
        let mut output = String::new();
        for p in roster.all() {
            let line = format!("  #{} {:<16} {}", p.id, p.name, p.trait_description.dimmed());
            if p.is_alive() {
                output.push_str(&line);
            } else {
                output.push_str(&format!("{}", line.strikethrough().red()));
            }
            output.push('\n');
        }
        output
    }

    pub fn round_banner(state: &GameState) -> String {
        Self::section_header(&format!(
            "Round {} - {} tributes remain",
            state.round(),
            state.roster().alive_count()
        ))
    }

    pub fn question(question: &str) -> String {
        format!("{} {}\n", "Question:".cyan().bold(), question)
    }

    pub fn answer(participant: &Participant, answer: &Answer) -> String {
        format!(
            "\n{}\n{}\n",
            format!("── {} ──", participant).yellow().bold(),
            answer.text.trim()
        )
    }

    /// One revealed vote with the target's running count
    pub fn vote(roster: &Roster, vote: &Vote, count: usize) -> String {
        let voter = Self::name(roster, vote.voter);
        let target = Self::name(roster, vote.voted_for);
        let reason = truncate(vote.reason.trim(), MAX_REASON_LEN);
        let mut line = format!(
            "  {} {} {} {}",
            voter.bold(),
            "votes out".dimmed(),
            target.red().bold(),
            format!("[{}]", Self::plural(count, "vote")).yellow()
        );
        if !reason.is_empty() {
            line.push_str(&format!("\n      \"{}\"", reason.italic()));
        }
        line
    }

    /// Final counts, highest first
    pub fn tally(roster: &Roster, tally: &VoteTally) -> String {
        let mut counts: Vec<(ParticipantId, usize)> =
            tally.counts().filter(|(_, count)| *count > 0).collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let mut output = format!("\n{}\n", "Tally:".cyan().bold());
        for (id, count) in counts {
            output.push_str(&format!(
                "  {:<18} {}\n",
                Self::name(roster, id),
                "#".repeat(count).red()
            ));
        }
        output
    }

    pub fn tie(roster: &Roster, candidates: &[ParticipantId], votes: usize) -> String {
        let mut output = format!(
            "\n{} {} tributes are tied at {}.\n",
            "TIE!".yellow().bold(),
            candidates.len(),
            Self::plural(votes, "vote")
        );
        for id in candidates {
            output.push_str(&format!("  #{} {}\n", id, Self::name(roster, *id)));
        }
        output.push_str(&format!(
            "{}\n",
            "You decide who falls: /pick <id>, or just type the number.".dimmed()
        ));
        output
    }

    pub fn eliminated(participant: &Participant, votes: usize) -> String {
        format!(
            "\n{} {} has been eliminated with {}.\n",
            "X".red().bold(),
            participant.name.red().bold(),
            Self::plural(votes, "vote")
        )
    }

    pub fn winner(participant: &Participant) -> String {
        let mut output = Self::header("VICTOR");
        output.push_str(&format!(
            "\n\n{:^60}\n{:^60}\n\n{}\n",
            participant.name.green().bold().to_string(),
            participant.trait_description.dimmed().to_string(),
            "Type /restart to play again.".dimmed()
        ));
        output
    }

    /// Blocking message left by an aborted request
    pub fn notice(notice: &Notice, backend_url: &str) -> String {
        match notice.severity {
            NoticeSeverity::Cooldown => format!(
                "\n{} {}\n\nPlease wait before starting a new game.\n",
                "[cooldown]".yellow().bold(),
                notice.message
            ),
            NoticeSeverity::Alert => format!(
                "\n{} Could not get answers from {}\n  {}\n",
                "Error:".red().bold(),
                backend_url,
                notice.message
            ),
        }
    }

    pub fn status(state: &GameState) -> String {
        let mut output = format!(
            "\n{} {}   {} {}\n",
            "Round:".cyan().bold(),
            state.round(),
            "Stage:".cyan().bold(),
            state.stage().display_name()
        );
        if let Some(question) = state.question() {
            output.push_str(&Self::question(question.content()));
        }
        output.push_str(&Self::roster(state.roster()));
        output
    }

    /// Short hint for what the player can do next
    pub fn next_step(state: &GameState) -> String {
        let hint = match state.stage() {
            Stage::Input => "Type a question for the tributes.",
            Stage::Answers => "Type /vote to start the elimination vote.",
            Stage::Voting if state.is_tie_pending() => "Pick who to eliminate with /pick <id>.",
            Stage::Eliminated => "Type /next for the next round.",
            Stage::Winner => "Type /restart to play again.",
            Stage::Answering | Stage::Voting => "Waiting for the arena...",
        };
        format!("{}", hint.dimmed())
    }

    /// Prompt shown by the line editor
    pub fn prompt(state: &GameState) -> String {
        format!("[R{} {}] > ", state.round(), state.stage().as_str())
    }

    pub fn help() -> String {
        let mut output = String::new();
        output.push_str("\nCommands:\n");
        output.push_str("  <question>      - Ask the tributes (when awaiting a question)\n");
        output.push_str("  /vote           - Start the elimination vote\n");
        output.push_str("  /pick <id>      - Break a tie (a bare number also works)\n");
        output.push_str("  /next           - Advance to the next round\n");
        output.push_str("  /restart        - Start a new game\n");
        output.push_str("  /status         - Show round, stage and roster\n");
        output.push_str("  /help, /h, /?   - Show this help\n");
        output.push_str("  /quit, /exit, /q - Exit\n");
        output
    }

    pub fn error(message: impl std::fmt::Display) -> String {
        format!("{} {}", "Error:".red().bold(), message)
    }

    fn name(roster: &Roster, id: ParticipantId) -> String {
        roster
            .get(id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| format!("#{}", id))
    }

    fn plural(count: usize, noun: &str) -> String {
        if count == 1 {
            format!("{} {}", count, noun)
        } else {
            format!("{} {}s", count, noun)
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_vote_line_shows_names_and_count() {
        plain();
        let roster = Roster::standard();
        let line = ConsoleFormatter::vote(&roster, &Vote::new(1, 4, "Too gloomy"), 3);
        assert!(line.contains("The Philosopher votes out The Skeptic [3 votes]"));
        assert!(line.contains("\"Too gloomy\""));
    }

    #[test]
    fn test_vote_reason_truncated() {
        plain();
        let roster = Roster::standard();
        let reason = "blah ".repeat(50);
        let line = ConsoleFormatter::vote(&roster, &Vote::new(2, 5, reason), 1);
        assert!(line.contains("[1 vote]"));
        assert!(line.contains("...\""));
    }

    #[test]
    fn test_unknown_participant_falls_back_to_id() {
        plain();
        let roster = Roster::standard();
        let line = ConsoleFormatter::vote(&roster, &Vote::new(1, 42, ""), 1);
        assert!(line.contains("#42"));
    }

    #[test]
    fn test_tally_sorted_by_count() {
        plain();
        let roster = Roster::standard();
        let votes = vec![
            Vote::new(1, 6, ""),
            Vote::new(2, 3, ""),
            Vote::new(3, 6, ""),
        ];
        let tally = VoteTally::compute(&roster, &votes);
        let output = ConsoleFormatter::tally(&roster, &tally);
        let rebel = output.find("The Rebel").unwrap();
        let optimist = output.find("The Optimist").unwrap();
        assert!(rebel < optimist);
        assert!(!output.contains("The Analyst"));
    }

    #[test]
    fn test_cooldown_notice() {
        plain();
        let output = ConsoleFormatter::notice(
            &Notice::cooldown("You can only play one game every 12 hours."),
            "http://localhost:5000",
        );
        assert!(output.contains("You can only play one game every 12 hours."));
        assert!(output.contains("Please wait before starting a new game."));
    }

    #[test]
    fn test_alert_notice_names_server() {
        plain();
        let output =
            ConsoleFormatter::notice(&Notice::alert("connection refused"), "http://arena:5000");
        assert!(output.contains("http://arena:5000"));
        assert!(output.contains("connection refused"));
    }

    #[test]
    fn test_prompt() {
        assert_eq!(ConsoleFormatter::prompt(&GameState::default()), "[R1 input] > ");
    }
}

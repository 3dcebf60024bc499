//! Parsing of REPL input lines

use hunger_domain::ParticipantId;

/// One line typed at the game prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Ask(String),
    Vote,
    Pick(ParticipantId),
    Next,
    Restart,
    Status,
    Help,
    Quit,
    /// A command that was recognized but used wrongly
    Invalid(String),
    Unknown(String),
}

impl ReplCommand {
    /// Parse a trimmed, non-empty line.
    ///
    /// While a tie-break is pending a bare number is read as `/pick`.
    pub fn parse(line: &str, tie_pending: bool) -> Self {
        let line = line.trim();

        if !line.starts_with('/') {
            if tie_pending && let Ok(id) = line.parse::<ParticipantId>() {
                return ReplCommand::Pick(id);
            }
            return ReplCommand::Ask(line.to_string());
        }

        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };

        match command {
            "/vote" | "/v" => ReplCommand::Vote,
            "/pick" | "/p" => match arg.parse::<ParticipantId>() {
                Ok(id) => ReplCommand::Pick(id),
                Err(_) => ReplCommand::Invalid("Usage: /pick <id>".to_string()),
            },
            "/next" | "/n" => ReplCommand::Next,
            "/restart" | "/r" => ReplCommand::Restart,
            "/status" | "/s" => ReplCommand::Status,
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            other => ReplCommand::Unknown(other.to_string()),
        }
    }
}

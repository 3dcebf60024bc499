//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for hunger-games
#[derive(Parser, Debug)]
#[command(name = "hunger-games")]
#[command(author, version, about = "AI Hunger Games - eight AI personalities, one survivor")]
#[command(long_about = r#"
AI Hunger Games pits eight AI personalities against each other.

Each round:
1. You ask a question and every surviving personality answers it
2. The personalities vote to eliminate the one they disagree with most
3. The most-voted personality is out (you break ties)

The last one standing wins.

Configuration files are loaded from (later wins):
1. ~/.config/hunger-games/config.toml   Global config
2. ./hunger-games.toml                  Project-level config
3. --config <path>                      Explicit config file
4. HUNGER_GAMES_* environment variables

Example:
  hunger-games
  hunger-games --api-url https://arena.example.com --fast
  HUNGER_GAMES_API_URL=http://localhost:5000 hunger-games --check
"#)]
pub struct Cli {
    /// Backend base URL (overrides config and environment)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Query the backend health endpoint and exit
    #[arg(long)]
    pub check: bool,

    /// Reveal answers and votes without pauses
    #[arg(long)]
    pub fast: bool,

    /// Accept incomplete or inconsistent backend batches
    #[arg(long)]
    pub lenient: bool,

    /// Append every game event to this file as JSONL
    #[arg(long, value_name = "PATH")]
    pub event_log: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the countdown spinner
    #[arg(short, long)]
    pub quiet: bool,

    /// Also write diagnostic logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "hunger-games",
            "--api-url",
            "http://localhost:5000",
            "--fast",
            "--lenient",
            "-vv",
            "-q",
            "--event-log",
            "game.jsonl",
        ])
        .unwrap();

        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:5000"));
        assert!(cli.fast);
        assert!(cli.lenient);
        assert_eq!(cli.verbose, 2);
        assert!(cli.quiet);
        assert_eq!(cli.event_log, Some(PathBuf::from("game.jsonl")));
        assert!(!cli.check);
    }

    #[test]
    fn test_rejects_positional_question() {
        assert!(Cli::try_parse_from(["hunger-games", "what now?"]).is_err());
    }
}

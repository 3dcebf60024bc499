//! CLI entrypoint for AI Hunger Games
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use hunger_application::{GameEventLogger, GameSession, NoProgress, ProgressNotifier};
use hunger_domain::ResponsePolicy;
use hunger_infrastructure::{
    ConfigLoader, FileConfig, FilePacingConfig, HttpArenaBackend, JsonlGameEventLogger,
};
use hunger_presentation::{
    Cli, ConsoleFormatter, CountdownReporter, GameRepl, Pacing, ReplConfig, RevealPacer,
    SimpleProgress,
};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(&cli)?;

    info!("Starting AI Hunger Games");

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_without_files()
    } else {
        ConfigLoader::load(cli.config.as_ref())
    }
    .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;

    if let Some(url) = &cli.api_url {
        config.backend.base_url = url.clone();
    }

    let issues = config.validate();
    for issue in &issues {
        eprintln!("{}", issue);
    }
    if issues.iter().any(|issue| issue.is_error()) {
        bail!("Invalid configuration");
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let backend = HttpArenaBackend::from_config(&config.backend)
        .context("Failed to create the backend client")?;
    let backend_url = backend.base_url().to_string();

    if cli.check {
        return check_backend(GameSession::new(backend)).await;
    }

    let policy = if cli.lenient {
        ResponsePolicy::Lenient
    } else {
        config.game.parse_policy().0
    };
    info!("Using {} validation against {}", policy.as_str(), backend_url);

    let mut session =
        GameSession::with_policy(backend, policy).with_progress(progress_notifier(&cli, &config));

    if let Some(path) = &cli.event_log {
        match JsonlGameEventLogger::new(path) {
            Some(logger) => {
                let logger: Arc<dyn GameEventLogger> = Arc::new(logger);
                session = session.with_event_logger(logger);
            }
            None => warn!("Event log disabled: could not open {}", path.display()),
        }
    }

    let pacing = if cli.fast {
        pacing_from(&config.pacing.instant())
    } else {
        pacing_from(&config.pacing)
    };

    let repl = GameRepl::new(session, RevealPacer::new(pacing)).with_config(ReplConfig {
        history_file: None,
        backend_url,
    });

    repl.run().await?;
    Ok(())
}

/// Console logging by verbosity, plus an optional plain-text log file
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match &cli.log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow!("Invalid log file path: {}", path.display()))?;

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

fn progress_notifier(cli: &Cli, config: &FileConfig) -> Arc<dyn ProgressNotifier> {
    if cli.quiet || !config.output.show_progress {
        Arc::new(NoProgress)
    } else if !std::io::stderr().is_terminal() {
        Arc::new(SimpleProgress)
    } else {
        Arc::new(CountdownReporter::new(config.pacing.countdown_secs))
    }
}

fn pacing_from(pacing: &FilePacingConfig) -> Pacing {
    Pacing {
        answer_reveal: pacing.answer_reveal(),
        vote_reveal: pacing.vote_reveal(),
        tally_pause: pacing.tally_pause(),
        winner_pause: pacing.winner_pause(),
        countdown_secs: pacing.countdown_secs,
    }
}

async fn check_backend(session: GameSession<HttpArenaBackend>) -> Result<()> {
    let url = session.backend().base_url().to_string();
    let health = match session.check_health().await {
        Ok(health) => health,
        Err(e) => {
            println!("{}", ConsoleFormatter::error(&e));
            bail!("Backend at {} is unreachable", url);
        }
    };

    println!("Backend:   {}", url);
    println!("Status:    {}", health.status);
    if let Some(model) = &health.model {
        println!("Model:     {}", model);
    }
    if let Some(configured) = health.api_key_configured {
        println!("API key:   {}", if configured { "configured" } else { "missing" });
    }
    if let Some(connected) = health.redis_connected {
        println!("Redis:     {}", if connected { "connected" } else { "disconnected" });
    }
    if let Some(limit) = health.request_limit {
        println!("Limit:     {} requests", limit);
    }

    if !health.is_healthy() {
        bail!("Backend reports status '{}'", health.status);
    }
    Ok(())
}

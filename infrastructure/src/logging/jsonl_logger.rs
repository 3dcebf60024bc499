//! JSONL file writer for game events.
//!
//! Each [`GameEvent`] is serialized as a single JSON line carrying its
//! `type` tag plus a `timestamp`, appended through a buffered writer.

use hunger_application::ports::game_event_logger::GameEventLogger;
use hunger_domain::GameEvent;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL game event logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlGameEventLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlGameEventLogger {
    /// Open `path` for appending, creating it and its parent directories.
    ///
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create event log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open event log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GameEventLogger for JsonlGameEventLogger {
    fn log(&self, event: &GameEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let record = match serde_json::to_value(event) {
            Ok(serde_json::Value::Object(mut map)) => {
                map.insert(
                    "timestamp".to_string(),
                    serde_json::Value::String(timestamp),
                );
                serde_json::Value::Object(map)
            }
            Ok(other) => serde_json::json!({
                "type": event.event_type(),
                "timestamp": timestamp,
                "data": other,
            }),
            Err(e) => {
                warn!("Could not serialize {} event: {}", event.event_type(), e);
                return;
            }
        };

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlGameEventLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hunger_domain::{ParticipantId, RequestKind, Stage};

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_jsonl_logger_writes_valid_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.jsonl");
        let logger = JsonlGameEventLogger::new(&path).unwrap();

        logger.log(&GameEvent::Eliminated {
            round: 3,
            participant: ParticipantId::new(6),
            votes: 4,
        });
        logger.log(&GameEvent::RequestAborted {
            request: RequestKind::Answers,
            returned_to: Stage::Input,
            reason: "You can only play one game every 12 hours.".to_string(),
            rate_limited: true,
        });
        logger.log(&GameEvent::Restarted);
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 3);
        for line in &lines {
            assert!(line.get("type").is_some());
            assert!(line.get("timestamp").is_some());
        }

        assert_eq!(lines[0]["type"], "eliminated");
        assert_eq!(lines[0]["round"], 3);
        assert_eq!(lines[0]["participant"], 6);
        assert_eq!(lines[1]["type"], "request_aborted");
        assert_eq!(lines[1]["returned_to"], "input");
        assert_eq!(lines[1]["rate_limited"], true);
        assert_eq!(lines[2]["type"], "restarted");
    }

    #[test]
    fn test_jsonl_logger_appends_across_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("game.jsonl");

        for round in 1..=2 {
            let logger = JsonlGameEventLogger::new(&path).unwrap();
            logger.log(&GameEvent::RoundAdvanced { round });
        }

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["round"], 2);
    }

    #[test]
    fn test_jsonl_logger_returns_none_for_directory_path() {
        let dir = tempfile::tempdir().unwrap();
        assert!(JsonlGameEventLogger::new(dir.path()).is_none());
    }
}

//! Append-only JSONL sink for conversation events.
//!
//! One line per event: the payload object with `type` and `timestamp`
//! merged in. Non-object payloads are nested under `data`.

use brigade_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

pub struct JsonlConversationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlConversationLogger {
    /// Open `path` for appending, creating missing parent directories.
    ///
    /// Returns `None` after a warning when the file cannot be opened; a bad
    /// log path never prevents a run.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        match open_append(path) {
            Ok(file) => Some(Self {
                writer: Mutex::new(BufWriter::new(file)),
                path: path.to_path_buf(),
            }),
            Err(e) => {
                warn!("Conversation log {} unavailable: {}", path.display(), e);
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn to_record(event: ConversationEvent) -> Value {
    let stamp = event
        .timestamp
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
    let mut record = match event.payload {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("data".to_string(), other);
            map
        }
    };
    record.insert("type".to_string(), Value::from(event.event_type));
    record.insert("timestamp".to_string(), Value::from(stamp));
    Value::Object(record)
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let Ok(line) = serde_json::to_string(&to_record(event)) else {
            return;
        };
        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        if writeln!(writer, "{}", line).and_then(|_| writer.flush()).is_err() {
            warn!("Failed to append to {}", self.path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_jsonl_logger_writes_one_record_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("run.conversation.jsonl");
        let logger = JsonlConversationLogger::new(&path).unwrap();
        assert_eq!(logger.path(), path);

        logger.log(ConversationEvent::new(
            "tool_call",
            serde_json::json!({
                "tool": "get_reservations",
                "arguments": {"date": "15/03/2025"},
                "is_error": false,
                "content": "FULL SERVICE: 45 covers (VIP table booked)"
            }),
        ));
        logger.log(ConversationEvent::new(
            "run_completed",
            serde_json::json!({ "turns": 2, "text": "Busy night." }),
        ));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        for record in &records {
            assert!(record["timestamp"].as_str().unwrap().ends_with('Z'));
        }
        assert_eq!(records[0]["type"], "tool_call");
        assert_eq!(records[0]["tool"], "get_reservations");
        assert_eq!(records[0]["arguments"]["date"], "15/03/2025");
        assert_eq!(records[1]["type"], "run_completed");
        assert_eq!(records[1]["turns"], 2);
    }

    #[test]
    fn test_jsonl_logger_appends_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.jsonl");
        for run in 0..2 {
            let logger = JsonlConversationLogger::new(&path).unwrap();
            logger.log(ConversationEvent::new(
                "run_started",
                serde_json::json!({ "run": run }),
            ));
        }
        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["run"], 1);
    }

    #[test]
    fn test_jsonl_logger_wraps_non_object_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.jsonl");
        let logger = JsonlConversationLogger::new(&path).unwrap();

        logger.log(ConversationEvent::new(
            "simple_event",
            serde_json::json!("just a string"),
        ));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records[0]["type"], "simple_event");
        assert_eq!(records[0]["data"], "just a string");
    }

    #[test]
    fn test_jsonl_logger_none_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, "x").unwrap();
        assert!(JsonlConversationLogger::new(blocker.join("run.jsonl")).is_none());
    }
}

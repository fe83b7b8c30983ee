//! JSONL file writer for turn transcripts.
//!
//! Each [`TranscriptEntry`] is serialized as a single JSON line with a
//! `type` field and `timestamp`, appended to the file via a buffered writer.

use scout_application::ports::transcript::{TranscriptEntry, TranscriptLogger};
use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlTranscriptLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlTranscriptLogger {
    /// Create a new logger writing to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be created.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create transcript directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match File::create(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not create transcript file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// New transcript file named after the current local time, inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Option<Self> {
        let name = chrono::Local::now()
            .format("%Y%m%d-%H%M%S.transcript.jsonl")
            .to_string();
        Self::new(dir.as_ref().join(name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TranscriptLogger for JsonlTranscriptLogger {
    fn log(&self, entry: TranscriptEntry) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let record = if let Value::Object(mut map) = entry.payload {
            map.insert(
                "type".to_string(),
                Value::String(entry.entry_type.to_string()),
            );
            map.insert("timestamp".to_string(), Value::String(timestamp));
            Value::Object(map)
        } else {
            serde_json::json!({
                "type": entry.entry_type,
                "timestamp": timestamp,
                "data": entry.payload,
            })
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

impl Drop for JsonlTranscriptLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_one_record_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("turns.transcript.jsonl");
        let logger = JsonlTranscriptLogger::new(&path).unwrap();

        logger.log(TranscriptEntry::new(
            "turn_settled",
            serde_json::json!({
                "question": "What is 2+2?",
                "answer": "The answer is 4.",
                "steps": ["Reflection"],
            }),
        ));
        logger.log(TranscriptEntry::new(
            "conversation_reset",
            serde_json::json!({}),
        ));
        drop(logger);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.trim().lines().collect();
        assert_eq!(lines.len(), 2);

        let first: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["type"], "turn_settled");
        assert_eq!(first["answer"], "The answer is 4.");
        assert!(first.get("timestamp").is_some());

        let second: Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["type"], "conversation_reset");
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wrapped.jsonl");
        let logger = JsonlTranscriptLogger::new(&path).unwrap();
        logger.log(TranscriptEntry::new("note", serde_json::json!("just a string")));
        drop(logger);

        let content = std::fs::read_to_string(&path).unwrap();
        let value: Value = serde_json::from_str(content.trim()).unwrap();
        assert_eq!(value["type"], "note");
        assert_eq!(value["data"], "just a string");
    }

    #[test]
    fn test_in_dir_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let logger = JsonlTranscriptLogger::in_dir(&nested).unwrap();
        assert!(logger.path().starts_with(&nested));
        assert!(logger.path().exists());
    }
}

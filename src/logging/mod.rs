use serde::Serialize;
use serde_json::{Map, Value, json};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

pub type LogFields = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    pub ts_ms: u128,
    pub level: LogLevel,
    pub target: String,
    pub message: String,
    #[serde(skip_serializing_if = "LogFields::is_empty", default)]
    pub fields: LogFields,
}

impl LogEvent {
    pub fn new(level: LogLevel, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            ts_ms: current_ms(),
            level,
            target: target.into(),
            message: message.into(),
            fields: LogFields::new(),
        }
    }

    pub fn with_fields(
        level: LogLevel,
        target: impl Into<String>,
        message: impl Into<String>,
        fields: LogFields,
    ) -> Self {
        Self {
            fields,
            ..Self::new(level, target, message)
        }
    }
}

fn current_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

pub type LoggingResult<T> = std::result::Result<T, LoggingError>;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("log sink lock poisoned")]
    Poisoned,
}

pub trait LogSink: Send + Sync {
    fn log(&self, event: &LogEvent) -> LoggingResult<()>;
}

#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn LogSink>,
    min_level: LogLevel,
}

impl Logger {
    pub fn new<S>(sink: S) -> Self
    where
        S: LogSink + 'static,
    {
        Self {
            sink: Arc::new(sink),
            min_level: LogLevel::Trace,
        }
    }

    /// Drop events below `level` before they reach the sink.
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn log(&self, level: LogLevel, target: &str, message: &str) -> LoggingResult<()> {
        self.log_event(LogEvent::new(level, target, message))
    }

    pub fn log_event(&self, event: LogEvent) -> LoggingResult<()> {
        if event.level < self.min_level {
            return Ok(());
        }
        self.sink.log(&event)
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("min_level", &self.min_level)
            .finish_non_exhaustive()
    }
}

/// Appends JSON lines to a file. Once a line would push the file past
/// `max_bytes` the file is renamed to `<path>.1` (replacing an older backup)
/// and a fresh one is started. `max_bytes == 0` disables rollover.
pub struct FileSink {
    path: PathBuf,
    max_bytes: u64,
    state: Mutex<FileState>,
}

struct FileState {
    writer: BufWriter<File>,
    written: u64,
}

impl FileSink {
    pub fn new(path: impl AsRef<Path>, max_bytes: u64) -> LoggingResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            path,
            max_bytes,
            state: Mutex::new(FileState {
                writer: BufWriter::new(file),
                written,
            }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where the previous file goes on rollover.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".1");
        PathBuf::from(name)
    }

    fn roll_over(&self, state: &mut FileState) -> LoggingResult<()> {
        state.writer.flush()?;
        std::fs::rename(&self.path, self.backup_path())?;
        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        state.writer = BufWriter::new(file);
        state.written = 0;
        Ok(())
    }
}

impl LogSink for FileSink {
    fn log(&self, event: &LogEvent) -> LoggingResult<()> {
        let mut line = serde_json::to_string(event)?;
        line.push('\n');
        let incoming = line.len() as u64;

        let mut state = self.state.lock().map_err(|_| LoggingError::Poisoned)?;
        if self.max_bytes > 0 && state.written > 0 && state.written + incoming > self.max_bytes {
            self.roll_over(&mut state)?;
        }
        state.writer.write_all(line.as_bytes())?;
        state.writer.flush()?;
        state.written += incoming;
        Ok(())
    }
}

/// Keeps events in memory; clones share the same buffer.
#[derive(Clone, Default)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<LogEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events().into_iter().map(|e| e.message).collect()
    }
}

impl LogSink for MemorySink {
    fn log(&self, event: &LogEvent) -> LoggingResult<()> {
        self.events
            .lock()
            .map_err(|_| LoggingError::Poisoned)?
            .push(event.clone());
        Ok(())
    }
}

pub fn event_with_fields(
    level: LogLevel,
    target: &str,
    message: &str,
    fields: impl IntoIterator<Item = (String, Value)>,
) -> LogEvent {
    let map: LogFields = fields.into_iter().collect();
    LogEvent::with_fields(level, target, message, map)
}

pub fn json_kv(key: &str, value: impl Into<Value>) -> (String, Value) {
    (key.to_string(), value.into())
}

pub fn json_str(key: &str, value: impl Into<String>) -> (String, Value) {
    (key.to_string(), json!(value.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_collects_events() {
        let sink = MemorySink::new();
        let logger = Logger::new(sink.clone());

        logger.log(LogLevel::Info, "snapgrid::test", "hello").unwrap();
        logger
            .log_event(event_with_fields(
                LogLevel::Debug,
                "snapgrid::test",
                "with_fields",
                [json_kv("cells", 4), json_str("id", "w1")],
            ))
            .unwrap();

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].fields.get("cells"), Some(&json!(4)));
        assert_eq!(events[1].fields.get("id"), Some(&json!("w1")));
    }

    #[test]
    fn min_level_filters_events() {
        let sink = MemorySink::new();
        let logger = Logger::new(sink.clone()).with_min_level(LogLevel::Warn);

        logger.log(LogLevel::Debug, "t", "dropped").unwrap();
        logger.log(LogLevel::Error, "t", "kept").unwrap();

        assert_eq!(sink.messages(), vec!["kept".to_string()]);
    }

    #[test]
    fn event_serializes_lowercase_level_and_skips_empty_fields() {
        let event = LogEvent::new(LogLevel::Warn, "t", "m");
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["level"], json!("warn"));
        assert!(value.get("fields").is_none());
    }

    fn temp_log(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "snapgrid-{name}-{}-{}.jsonl",
            std::process::id(),
            current_ms()
        ))
    }

    #[test]
    fn file_sink_writes_json_lines() {
        let path = temp_log("lines");
        let logger = Logger::new(FileSink::new(&path, 0).unwrap());

        logger.log(LogLevel::Info, "snapgrid::test", "first").unwrap();
        logger
            .log_event(event_with_fields(
                LogLevel::Warn,
                "snapgrid::test",
                "second",
                [json_kv("cells", 2)],
            ))
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<Value> = contents
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["message"], json!("first"));
        assert_eq!(lines[1]["fields"]["cells"], json!(2));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn file_sink_rolls_over_to_backup() {
        let path = temp_log("rollover");
        let sink = FileSink::new(&path, 256).unwrap();
        let backup = sink.backup_path();
        let file_name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert_eq!(backup, path.with_file_name(format!("{file_name}.1")));
        let logger = Logger::new(sink);

        for i in 0..10 {
            logger
                .log(LogLevel::Info, "snapgrid::test", &format!("line {i}"))
                .unwrap();
        }

        let current = std::fs::read_to_string(&path).unwrap();
        let previous = std::fs::read_to_string(&backup).unwrap();
        assert!(current.len() <= 256);
        assert!(!previous.is_empty());
        assert!(current.ends_with("\"message\":\"line 9\"}\n"));
        assert!(!current.contains("\"line 0\""));

        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_file(&backup);
    }

    #[test]
    fn file_sink_counts_existing_bytes() {
        let path = temp_log("append");
        std::fs::write(&path, "x".repeat(200)).unwrap();
        let sink = FileSink::new(&path, 256).unwrap();
        let backup = sink.backup_path();
        let logger = Logger::new(sink);

        logger.log(LogLevel::Info, "snapgrid::test", "after").unwrap();

        assert_eq!(std::fs::read_to_string(&backup).unwrap(), "x".repeat(200));
        assert!(std::fs::read_to_string(&path).unwrap().contains("\"after\""));

        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_file(&backup);
    }
}

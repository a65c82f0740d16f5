use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use time::{macros::format_description, OffsetDateTime};

const LOG_CAPACITY: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

/// Recent events for the log panel, mirrored to an append-only file.
#[derive(Debug)]
pub struct EventLog {
    entries: Vec<LogEntry>,
    path: Option<PathBuf>,
    pub scroll: usize,
}

impl EventLog {
    pub fn new(path: Option<PathBuf>) -> Self {
        if let Some(parent) = path.as_deref().and_then(Path::parent) {
            let _ = fs::create_dir_all(parent);
        }
        Self {
            entries: Vec::new(),
            path,
            scroll: 0,
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Info, message.into());
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Warn, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Error, message.into());
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    fn push(&mut self, level: LogLevel, message: String) {
        if self.scroll > 0 {
            self.scroll = self.scroll.saturating_add(1);
        }

        self.entries.push(LogEntry {
            level,
            message: message.clone(),
        });

        if self.entries.len() > LOG_CAPACITY {
            let overflow = self.entries.len() - LOG_CAPACITY;
            self.entries.drain(0..overflow);
            self.scroll = self.scroll.saturating_sub(overflow);
        }

        if let Some(path) = &self.path {
            let _ = append_log_file(path, level, &message);
        }
    }
}

pub fn log_level_label(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Info => "INFO",
        LogLevel::Warn => "WARN",
        LogLevel::Error => "ERROR",
    }
}

fn append_log_file(path: &Path, level: LogLevel, message: &str) -> std::io::Result<()> {
    let label = log_level_label(level);
    let stamp = timestamp();
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    writeln!(file, "[{label}] {stamp} {message}")
}

fn timestamp() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    now.format(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second]"
    ))
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn appends_to_file_with_level_label() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("wadsmith.log");
        let mut log = EventLog::new(Some(path.clone()));
        log.info("Rescanned library");
        log.error("Launch failed");

        let raw = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = raw.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[INFO] "));
        assert!(lines[0].ends_with("Rescanned library"));
        assert!(lines[1].starts_with("[ERROR] "));
    }

    #[test]
    fn caps_entries_and_scroll() {
        let mut log = EventLog::new(None);
        log.info("first");
        log.scroll_up(3);
        for index in 0..LOG_CAPACITY + 10 {
            log.warn(format!("event {index}"));
        }
        assert_eq!(log.entries().len(), LOG_CAPACITY);
        assert_eq!(log.entries()[0].message, "event 10");
        assert!(log.scroll <= LOG_CAPACITY + 3);
    }
}

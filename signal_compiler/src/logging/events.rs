//! Log events emitted by the compiler stages

use super::codes::{get_error_metadata, get_severity, Code, ErrorMetadata};
use crate::config::compile_time::logging::MAX_LOG_MESSAGE_LENGTH;
use crate::utils::Span;
use std::collections::HashMap;
use std::time::SystemTime;

/// Ordered so a minimum level admits everything below it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogEvent {
    pub timestamp: SystemTime,
    pub level: LogLevel,
    pub code: Code,
    pub message: String,
    pub span: Option<Span>,
    pub context: HashMap<String, String>,
}

impl LogEvent {
    fn with_level(level: LogLevel, code: Code, message: &str) -> Self {
        Self {
            timestamp: SystemTime::now(),
            level,
            code,
            message: truncate_message(message),
            span: None,
            context: HashMap::new(),
        }
    }

    pub fn error(error_code: Code, message: &str) -> Self {
        Self::with_level(LogLevel::Error, error_code, message)
    }

    /// Informational event without a registered code
    pub fn info(message: &str) -> Self {
        Self::with_level(LogLevel::Info, Code::new("I000"), message)
    }

    /// Info-level event tagged with a stage-completion code
    pub fn success(success_code: Code, message: &str) -> Self {
        Self::with_level(LogLevel::Info, success_code, message)
    }

    pub fn debug(message: &str) -> Self {
        Self::with_level(LogLevel::Debug, Code::new("D000"), message)
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Later values replace earlier ones for the same key
    pub fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.insert(key.to_string(), value.to_string());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == LogLevel::Error
    }

    pub fn is_info(&self) -> bool {
        self.level == LogLevel::Info
    }

    /// Registry entry for the event's code; plain info and debug events have none
    pub fn metadata(&self) -> Option<&'static ErrorMetadata> {
        get_error_metadata(self.code.as_str())
    }

    /// `[LEVEL] CODE - message at line:column`
    pub fn format(&self) -> String {
        let mut line = format!("[{}] {} - {}", self.level.as_str(), self.code, self.message);
        if let Some(span) = self.span {
            line.push_str(&format!(" at {}:{}", span.start.line, span.start.column));
        }
        line
    }

    /// One JSON object per event, as written by the structured logger
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        let unix_seconds = self
            .timestamp
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs());
        let metadata = self.metadata();

        let mut object = serde_json::json!({
            "timestamp": unix_seconds,
            "level": self.level.as_str(),
            "code": self.code.as_str(),
            "message": &self.message,
            "category": metadata.map_or("Unknown", |m| m.category),
            "severity": get_severity(self.code.as_str()).as_str(),
        });

        if let Some(metadata) = metadata.filter(|_| self.is_error()) {
            object["error_metadata"] = serde_json::json!({
                "recoverable": metadata.recoverable,
                "requires_halt": metadata.requires_halt,
                "description": metadata.description,
                "action": metadata.recommended_action,
            });
        }

        // SIGNAL tokens never span lines, so a start point and byte length suffice
        if let Some(span) = self.span {
            object["span"] = serde_json::json!({
                "line": span.start.line,
                "column": span.start.column,
                "offset": span.start.offset,
                "length": span.len(),
            });
        }

        if !self.context.is_empty() {
            object["context"] = serde_json::json!(&self.context);
        }

        serde_json::to_string(&object)
    }
}

fn truncate_message(message: &str) -> String {
    if message.len() <= MAX_LOG_MESSAGE_LENGTH {
        return message.to_string();
    }
    let mut end = MAX_LOG_MESSAGE_LENGTH;
    while !message.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &message[..end])
}

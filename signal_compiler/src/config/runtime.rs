// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Errors raised while loading a runtime configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read runtime configuration {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid runtime configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProcessorPreferences {
    /// Whether to require the .sig extension
    pub require_signal_extension: bool,

    /// Whether to enable detailed performance logging
    pub enable_performance_logging: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            require_signal_extension: env::var(env_vars::REQUIRE_SIG_EXTENSION)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_performance_logging: env::var(env_vars::ENABLE_PERFORMANCE_LOGGING)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Columns a tab character advances the reader by
    pub tab_width: u32,

    /// Whether to collect per-kind token metrics
    pub collect_detailed_metrics: bool,

    /// Whether log messages for lexical errors carry line/column context
    pub include_position_in_errors: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            tab_width: env::var(env_vars::LEXICAL_TAB_WIDTH)
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|width| *width > 0)
                .unwrap_or(4),
            collect_detailed_metrics: env::var(env_vars::LEXICAL_DETAILED_METRICS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            include_position_in_errors: env::var(env_vars::LEXICAL_INCLUDE_POSITIONS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxPreferences {
    /// Whether entering and leaving grammar rules is logged at debug level
    pub log_parse_contexts: bool,
}

impl Default for SyntaxPreferences {
    fn default() -> Self {
        Self {
            log_parse_contexts: env::var(env_vars::SYNTAX_LOG_CONTEXTS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenPreferences {
    /// Whether each declaration is preceded by a `; NAME` comment line
    pub emit_declaration_comments: bool,

    /// Whether the report appends the identifier table to the listing
    pub include_identifier_table: bool,
}

impl Default for CodegenPreferences {
    fn default() -> Self {
        Self {
            emit_declaration_comments: env::var(env_vars::CODEGEN_DECLARATION_COMMENTS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            include_identifier_table: env::var(env_vars::CODEGEN_IDENTIFIER_TABLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Emit JSON events instead of plain lines
    pub use_structured_logging: bool,

    /// Whether events are written to the console at all
    pub enable_console_logging: bool,

    /// Minimum level that gets logged
    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var(env_vars::LOGGING_ENABLE_CONSOLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
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

    /// Convert to events::LogLevel
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub file_processor: FileProcessorPreferences,
    pub lexical: LexicalPreferences,
    pub syntax: SyntaxPreferences,
    pub codegen: CodegenPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse preferences from TOML; absent sections and keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load preferences from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // File Processor
    pub const REQUIRE_SIG_EXTENSION: &str = "SIGNAL_REQUIRE_SIG_EXTENSION";
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "SIGNAL_ENABLE_PERFORMANCE_LOGGING";

    // Lexical
    pub const LEXICAL_TAB_WIDTH: &str = "SIGNAL_LEXICAL_TAB_WIDTH";
    pub const LEXICAL_DETAILED_METRICS: &str = "SIGNAL_LEXICAL_DETAILED_METRICS";
    pub const LEXICAL_INCLUDE_POSITIONS: &str = "SIGNAL_LEXICAL_INCLUDE_POSITIONS";

    // Syntax
    pub const SYNTAX_LOG_CONTEXTS: &str = "SIGNAL_SYNTAX_LOG_CONTEXTS";

    // Codegen
    pub const CODEGEN_DECLARATION_COMMENTS: &str = "SIGNAL_CODEGEN_DECLARATION_COMMENTS";
    pub const CODEGEN_IDENTIFIER_TABLE: &str = "SIGNAL_CODEGEN_IDENTIFIER_TABLE";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "SIGNAL_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "SIGNAL_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "SIGNAL_LOGGING_MIN_LEVEL";
}

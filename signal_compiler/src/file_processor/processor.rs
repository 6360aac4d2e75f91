//! Source file loading with compile-time size limits

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

use crate::config::compile_time::file_processing::{MAX_FILE_SIZE, MAX_LINE_COUNT};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::{codes, Code};
use crate::{log_debug, log_error, log_success};

/// Extension of SIGNAL source files
pub const SIGNAL_EXTENSION: &str = "sig";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid file extension: expected .sig, found {extension:?}")]
    InvalidExtension { extension: Option<String> },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("File is empty")]
    EmptyFile,

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },

    #[error("File exceeds maximum line count: {lines} (max: {max_lines})")]
    TooManyLines { lines: usize, max_lines: usize },
}

impl FileProcessorError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            Self::InvalidExtension { .. } => codes::file_processing::INVALID_EXTENSION,
            Self::FileTooLarge { .. } | Self::TooManyLines { .. } => {
                codes::file_processing::FILE_TOO_LARGE
            }
            Self::EmptyFile => codes::file_processing::EMPTY_FILE,
            Self::PermissionDenied { .. } => codes::file_processing::PERMISSION_DENIED,
            Self::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            Self::IoError { .. } => codes::file_processing::IO_ERROR,
            Self::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn severity(&self) -> codes::Severity {
        codes::get_severity(self.error_code().as_str())
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    fn from_io(error: &std::io::Error, path: &Path) -> Self {
        match error.kind() {
            ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.display().to_string(),
            },
            ErrorKind::InvalidData => Self::InvalidEncoding {
                path: path.display().to_string(),
            },
            _ => Self::IoError {
                message: format!("'{}': {}", path.display(), error),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Canonical file path
    pub path: PathBuf,
    pub size: u64,
    /// Lower-cased extension, if any
    pub extension: Option<String>,
    pub line_count: usize,
    pub is_signal_file: bool,
    pub modified: Option<SystemTime>,
}

impl FileMetadata {
    pub fn human_readable_size(&self) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
        let mut size = self.size as f64;
        let mut unit = 0;

        while size >= 1024.0 && unit < UNITS.len() - 1 {
            size /= 1024.0;
            unit += 1;
        }

        if unit == 0 {
            format!("{} {}", self.size, UNITS[unit])
        } else {
            format!("{:.2} {}", size, UNITS[unit])
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    pub source: String,
    pub metadata: FileMetadata,
    pub processing_duration: Duration,
}

impl FileProcessingResult {
    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }
}

/// Loads source files under the compile-time size and line limits
#[derive(Debug, Clone, Default)]
pub struct FileProcessor {
    preferences: FileProcessorPreferences,
}

impl FileProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_preferences(preferences: &FileProcessorPreferences) -> Self {
        Self {
            preferences: preferences.clone(),
        }
    }

    pub fn with_signal_extension_required(mut self, required: bool) -> Self {
        self.preferences.require_signal_extension = required;
        self
    }

    pub fn preferences(&self) -> &FileProcessorPreferences {
        &self.preferences
    }

    pub fn process_file(
        &self,
        file_path: impl AsRef<Path>,
    ) -> Result<FileProcessingResult, FileProcessorError> {
        let start = Instant::now();
        let requested = file_path.as_ref();
        let display = requested.display().to_string();

        log_debug!("Starting file processing", "file" => display);

        let result = self.load(requested, start);
        match &result {
            Ok(result) => self.log_success(result, &display),
            Err(error) => log_error!(error.error_code(), &error.to_string(), "file" => display),
        }
        result
    }

    fn load(&self, requested: &Path, start: Instant) -> Result<FileProcessingResult, FileProcessorError> {
        let path = self.validate_path(requested)?;
        let mut metadata = self.collect_metadata(&path)?;
        self.validate_metadata(&metadata)?;

        let bytes = fs::read(&path).map_err(|e| FileProcessorError::from_io(&e, &path))?;
        let source = String::from_utf8(bytes).map_err(|_| FileProcessorError::InvalidEncoding {
            path: path.display().to_string(),
        })?;

        let line_count = source.lines().count();
        if line_count > MAX_LINE_COUNT {
            return Err(FileProcessorError::TooManyLines {
                lines: line_count,
                max_lines: MAX_LINE_COUNT,
            });
        }
        metadata.line_count = line_count;

        Ok(FileProcessingResult {
            source,
            metadata,
            processing_duration: start.elapsed(),
        })
    }

    fn validate_path(&self, path: &Path) -> Result<PathBuf, FileProcessorError> {
        if path.as_os_str().is_empty() {
            return Err(FileProcessorError::InvalidPath {
                path: String::new(),
            });
        }
        if !path.exists() {
            return Err(FileProcessorError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        if !path.is_file() {
            return Err(FileProcessorError::InvalidPath {
                path: path.display().to_string(),
            });
        }
        path.canonicalize()
            .map_err(|e| FileProcessorError::from_io(&e, path))
    }

    fn collect_metadata(&self, path: &Path) -> Result<FileMetadata, FileProcessorError> {
        let metadata = fs::metadata(path).map_err(|e| FileProcessorError::from_io(&e, path))?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);

        Ok(FileMetadata {
            path: path.to_path_buf(),
            size: metadata.len(),
            is_signal_file: extension.as_deref() == Some(SIGNAL_EXTENSION),
            extension,
            line_count: 0,
            modified: metadata.modified().ok(),
        })
    }

    fn validate_metadata(&self, metadata: &FileMetadata) -> Result<(), FileProcessorError> {
        if metadata.size > MAX_FILE_SIZE {
            return Err(FileProcessorError::FileTooLarge {
                size: metadata.size,
                max_size: MAX_FILE_SIZE,
            });
        }
        if metadata.size == 0 {
            return Err(FileProcessorError::EmptyFile);
        }
        if self.preferences.require_signal_extension && !metadata.is_signal_file {
            return Err(FileProcessorError::InvalidExtension {
                extension: metadata.extension.clone(),
            });
        }
        Ok(())
    }

    fn log_success(&self, result: &FileProcessingResult, file: &str) {
        if self.preferences.enable_performance_logging {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully with performance metrics",
                "file" => file,
                "size" => result.metadata.human_readable_size(),
                "lines" => result.metadata.line_count,
                "chars" => result.char_count(),
                "duration_ms" => format!("{:.2}", result.processing_duration.as_secs_f64() * 1000.0)
            );
        } else {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully",
                "file" => file,
                "lines" => result.metadata.line_count
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn source_file(suffix: &str, content: &[u8]) -> NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_reads_source_and_metadata() {
        let file = source_file(".sig", b"PROGRAM P;\nCONST\nBEGIN\nEND.\n");
        let result = FileProcessor::new().process_file(file.path()).unwrap();

        assert!(result.source.starts_with("PROGRAM P;"));
        assert_eq!(result.metadata.line_count, 4);
        assert!(result.metadata.is_signal_file);
        assert_eq!(result.metadata.extension.as_deref(), Some("sig"));
    }

    #[test]
    fn test_missing_file() {
        let result = FileProcessor::new().process_file("/definitely/not/here.sig");
        assert_matches!(result, Err(FileProcessorError::FileNotFound { .. }));
    }

    #[test]
    fn test_empty_file() {
        let file = source_file(".sig", b"");
        let result = FileProcessor::new().process_file(file.path());
        assert_matches!(result, Err(FileProcessorError::EmptyFile));
    }

    #[test]
    fn test_invalid_utf8() {
        let file = source_file(".sig", &[b'P', 0xff, 0xfe]);
        let result = FileProcessor::new().process_file(file.path());
        assert_matches!(result, Err(FileProcessorError::InvalidEncoding { .. }));
    }

    #[test]
    fn test_extension_requirement() {
        let file = source_file(".txt", b"PROGRAM P; CONST BEGIN END.");
        let lenient = FileProcessor::new().with_signal_extension_required(false);
        assert!(lenient.process_file(file.path()).is_ok());

        let strict = FileProcessor::new().with_signal_extension_required(true);
        assert_matches!(
            strict.process_file(file.path()),
            Err(FileProcessorError::InvalidExtension { extension: Some(ext) }) if ext == "txt"
        );
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = FileProcessor::new().process_file(dir.path());
        assert_matches!(result, Err(FileProcessorError::InvalidPath { .. }));
    }

    #[test]
    fn test_human_readable_size() {
        let metadata = FileMetadata {
            path: PathBuf::new(),
            size: 2048,
            extension: None,
            line_count: 0,
            is_signal_file: false,
            modified: None,
        };
        assert_eq!(metadata.human_readable_size(), "2.00 KB");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            FileProcessorError::EmptyFile.error_code(),
            codes::file_processing::EMPTY_FILE
        );
        let too_many = FileProcessorError::TooManyLines {
            lines: 10,
            max_lines: 5,
        };
        assert_eq!(too_many.error_code(), codes::file_processing::FILE_TOO_LARGE);
    }
}

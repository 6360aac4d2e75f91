//! Safe loading of SIGNAL source files
//!
//! Size and line limits are compile-time constants; the extension check is a
//! runtime preference.

mod processor;

use crate::config::compile_time::file_processing::MAX_FILE_SIZE;
use std::path::Path;

pub use processor::{
    FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError, SIGNAL_EXTENSION,
};

/// Load a file with default preferences
pub fn process_file(path: impl AsRef<Path>) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::new().process_file(path)
}

pub fn get_max_file_size() -> u64 {
    MAX_FILE_SIZE
}

/// Verify every file processing error code has registry metadata
pub fn validate_error_codes() -> Result<(), String> {
    use crate::logging::codes;

    let file_codes = [
        codes::file_processing::FILE_NOT_FOUND,
        codes::file_processing::INVALID_EXTENSION,
        codes::file_processing::FILE_TOO_LARGE,
        codes::file_processing::EMPTY_FILE,
        codes::file_processing::PERMISSION_DENIED,
        codes::file_processing::INVALID_ENCODING,
        codes::file_processing::IO_ERROR,
        codes::file_processing::INVALID_PATH,
    ];

    for code in &file_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "File processor error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }
    Ok(())
}

use crate::codegen::GeneratorError;
use crate::config::ConfigError;
use crate::file_processor::FileProcessorError;
use crate::logging::{codes, Code};

/// Failures that stop the pipeline before it can produce a result
///
/// Lexical, syntax and semantic diagnostics are not among them; they are
/// carried by [`CompilationResult`](super::CompilationResult).
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Code generation failed: {0}")]
    CodeGeneration(#[from] GeneratorError),

    #[error("Configuration failed: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::FileProcessing(error) => error.error_code(),
            Self::CodeGeneration(error) => error.error_code(),
            Self::Configuration(_) => codes::system::CONFIGURATION_ERROR,
            Self::Pipeline { .. } => codes::system::INTERNAL_ERROR,
        }
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
}

//! Code generation errors
//!
//! Semantic errors are resumable per declaration and accumulate; a structural
//! [`GeneratorError`] means the tree cannot be walked at all.

use crate::config::compile_time::codegen::MAX_FRAME_SIZE;
use crate::logging::{codes, Code};
use crate::utils::{Position, Span};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SemanticError {
    #[error("Code Generator error (line {}, column {}): the constant name '{name}' is used a second time;", .position.line, .position.column)]
    DuplicateConstant { name: String, position: Position },

    #[error("Code Generator error (line {}, column {}): constant '{name}' needs {size} bytes but the frame is limited to {MAX_FRAME_SIZE};", .position.line, .position.column)]
    FrameSizeExceeded {
        name: String,
        size: u64,
        position: Position,
    },
}

impl SemanticError {
    pub fn position(&self) -> Position {
        match self {
            Self::DuplicateConstant { position, .. } | Self::FrameSizeExceeded { position, .. } => {
                *position
            }
        }
    }

    pub fn span(&self) -> Span {
        Span::at(self.position())
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::DuplicateConstant { .. } => codes::codegen::DUPLICATE_CONSTANT,
            Self::FrameSizeExceeded { .. } => codes::codegen::FRAME_SIZE_EXCEEDED,
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

/// The tree handed to the generator was not produced by a successful parse
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeneratorError {
    #[error("Code Generator error: the syntax tree has no {missing};")]
    IncompleteTree { missing: String },
}

impl GeneratorError {
    pub fn incomplete(missing: &str) -> Self {
        Self::IncompleteTree {
            missing: missing.to_string(),
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::IncompleteTree { .. } => codes::codegen::INCOMPLETE_TREE,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_message() {
        let error = SemanticError::DuplicateConstant {
            name: "A".to_string(),
            position: Position::new(30, 3, 5),
        };
        assert_eq!(
            error.to_string(),
            "Code Generator error (line 3, column 5): the constant name 'A' is used a second time;"
        );
        assert!(error.is_recoverable());
        assert_eq!(error.category(), "CodeGeneration");
    }

    #[test]
    fn test_incomplete_tree_is_fatal() {
        let error = GeneratorError::incomplete("<program>");
        assert_eq!(
            error.to_string(),
            "Code Generator error: the syntax tree has no <program>;"
        );
        assert!(!error.is_recoverable());
    }
}

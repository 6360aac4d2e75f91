//! Fatal syntax errors
//!
//! The first mismatch aborts the parse, so a parse reports at most one of these.

use crate::config::compile_time::syntax::{MAX_DECLARATIONS, MAX_PARSE_DEPTH};
use crate::grammar::Keyword;
use crate::logging::{codes, Code};
use crate::utils::{Position, Span};

pub type SyntaxResult<T> = Result<T, SyntaxError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error("Parser error (line {}, column {}): '{expected}' expected but '{found}' found;", .position.line, .position.column)]
    UnexpectedToken {
        expected: String,
        found: String,
        position: Position,
    },

    #[error("Parser error (line {}, column {}): '{keyword}' expected but '{found}' found;", .position.line, .position.column)]
    MissingKeyword {
        keyword: Keyword,
        found: String,
        position: Position,
    },

    #[error("Parser error: the end of the program was found earlier than expected ('{expected}' expected);")]
    PrematureEnd { expected: String },

    #[error("Parser error (line {}, column {}): the program does not end after '.';", .position.line, .position.column)]
    TrailingTokens { position: Position },

    #[error("Parser error (line {}, column {}): nesting deeper than {MAX_PARSE_DEPTH} levels;", .position.line, .position.column)]
    MaxRecursionDepth { depth: usize, position: Position },

    #[error("Parser error (line {}, column {}): more than {MAX_DECLARATIONS} constant declarations;", .position.line, .position.column)]
    TooManyDeclarations { position: Position },
}

impl SyntaxError {
    pub fn unexpected_token(expected: &str, found: &str, position: Position) -> Self {
        Self::UnexpectedToken {
            expected: expected.to_string(),
            found: found.to_string(),
            position,
        }
    }

    pub fn premature_end(expected: &str) -> Self {
        Self::PrematureEnd {
            expected: expected.to_string(),
        }
    }

    /// Where the error was detected; `None` when input ran out
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::UnexpectedToken { position, .. }
            | Self::MissingKeyword { position, .. }
            | Self::TrailingTokens { position }
            | Self::MaxRecursionDepth { position, .. }
            | Self::TooManyDeclarations { position } => Some(*position),
            Self::PrematureEnd { .. } => None,
        }
    }

    pub fn span(&self) -> Option<Span> {
        self.position().map(Span::at)
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::UnexpectedToken { .. } => codes::syntax::UNEXPECTED_TOKEN,
            Self::MissingKeyword { .. } => codes::syntax::MISSING_KEYWORD,
            Self::PrematureEnd { .. } => codes::syntax::PREMATURE_END,
            Self::TrailingTokens { .. } => codes::syntax::TRAILING_TOKENS,
            Self::MaxRecursionDepth { .. } => codes::syntax::MAX_RECURSION_DEPTH,
            Self::TooManyDeclarations { .. } => codes::syntax::TOO_MANY_DECLARATIONS,
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
    fn test_unexpected_token_format() {
        let error = SyntaxError::unexpected_token(";", "BEGIN", Position::new(9, 2, 1));
        assert_eq!(
            error.to_string(),
            "Parser error (line 2, column 1): ';' expected but 'BEGIN' found;"
        );
        assert_eq!(error.error_code(), codes::syntax::UNEXPECTED_TOKEN);
    }

    #[test]
    fn test_missing_keyword_format() {
        let error = SyntaxError::MissingKeyword {
            keyword: Keyword::Program,
            found: "X".to_string(),
            position: Position::start(),
        };
        assert_eq!(
            error.to_string(),
            "Parser error (line 1, column 1): 'PROGRAM' expected but 'X' found;"
        );
    }

    #[test]
    fn test_premature_end_has_no_position() {
        let error = SyntaxError::premature_end(".");
        assert_eq!(error.position(), None);
        assert_eq!(
            error.to_string(),
            "Parser error: the end of the program was found earlier than expected ('.' expected);"
        );
    }

    #[test]
    fn test_too_many_declarations_format() {
        let error = SyntaxError::TooManyDeclarations {
            position: Position::new(40, 3, 2),
        };
        assert_eq!(
            error.to_string(),
            format!(
                "Parser error (line 3, column 2): more than {} constant declarations;",
                MAX_DECLARATIONS
            )
        );
        assert_eq!(error.error_code(), codes::syntax::TOO_MANY_DECLARATIONS);
        assert_eq!(error.category(), "Syntax");
    }

    #[test]
    fn test_syntax_errors_are_fatal() {
        let error = SyntaxError::TrailingTokens {
            position: Position::start(),
        };
        assert!(!error.is_recoverable());
        assert_eq!(error.category(), "Syntax");
    }
}

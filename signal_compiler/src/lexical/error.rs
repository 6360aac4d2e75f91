//! Resumable lexical errors
//!
//! Every variant carries the position it was detected at; the lexer records
//! the error and keeps scanning from the next unconsumed character.

use crate::config::compile_time::lexical::*;
use crate::logging::{codes, Code};
use crate::utils::{Position, Span};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexicalError {
    #[error("Lexer error (line {}, column {}): Illegal symbol '{symbol}';", .position.line, .position.column)]
    IllegalSymbol { symbol: char, position: Position },

    #[error("Lexer error (line {}, column {}): Unopened comment;", .position.line, .position.column)]
    UnopenedComment { position: Position },

    #[error("Lexer error (line {}, column {}): Unclosed comment;", .position.line, .position.column)]
    UnclosedComment { position: Position },

    #[error("Lexer error (line {}, column {}): Wrong left part;", .position.line, .position.column)]
    WrongLeftPart { position: Position },

    #[error("Lexer error (line {}, column {}): unknown word '{word}' in constant;", .position.line, .position.column)]
    UnknownWord { word: String, position: Position },

    #[error("Lexer error (line {}, column {}): Wrong right part;", .position.line, .position.column)]
    WrongRightPart { position: Position },

    #[error("Lexer error (line {}, column {}): unclosed exponent body;", .position.line, .position.column)]
    UnclosedExponent { position: Position },

    #[error("Lexer error (line {}, column {}): Unclosed constant;", .position.line, .position.column)]
    UnclosedConstant { position: Position },

    #[error("Lexer error (line {}, column {}): constant '{digits}' is out of range (max {MAX_CONSTANT_DIGITS} digits);", .position.line, .position.column)]
    ConstantOutOfRange { digits: String, position: Position },

    #[error("Lexer error (line {}, column {}): too many distinct constants;", .position.line, .position.column)]
    TooManyConstants { position: Position },

    #[error("Lexer error (line {}, column {}): identifier too long: {length} characters (max {MAX_IDENTIFIER_LENGTH});", .position.line, .position.column)]
    IdentifierTooLong { length: usize, position: Position },

    #[error("Lexer error (line {}, column {}): comment too long: {length} characters (max {MAX_COMMENT_LENGTH});", .position.line, .position.column)]
    CommentTooLong { length: usize, position: Position },
}

impl LexicalError {
    pub fn position(&self) -> Position {
        match self {
            Self::IllegalSymbol { position, .. }
            | Self::UnopenedComment { position }
            | Self::UnclosedComment { position }
            | Self::WrongLeftPart { position }
            | Self::UnknownWord { position, .. }
            | Self::WrongRightPart { position }
            | Self::UnclosedExponent { position }
            | Self::UnclosedConstant { position }
            | Self::ConstantOutOfRange { position, .. }
            | Self::TooManyConstants { position }
            | Self::IdentifierTooLong { position, .. }
            | Self::CommentTooLong { position, .. } => *position,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::IllegalSymbol { symbol, position } => Span::single(*position, *symbol),
            _ => Span::at(self.position()),
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::IllegalSymbol { .. } => codes::lexical::ILLEGAL_SYMBOL,
            Self::UnopenedComment { .. } => codes::lexical::UNOPENED_COMMENT,
            Self::UnclosedComment { .. } => codes::lexical::UNCLOSED_COMMENT,
            Self::WrongLeftPart { .. } => codes::lexical::WRONG_LEFT_PART,
            Self::UnknownWord { .. } => codes::lexical::UNKNOWN_CONSTANT_WORD,
            Self::WrongRightPart { .. } => codes::lexical::WRONG_RIGHT_PART,
            Self::UnclosedExponent { .. } => codes::lexical::UNCLOSED_EXPONENT,
            Self::UnclosedConstant { .. } => codes::lexical::UNCLOSED_CONSTANT,
            Self::ConstantOutOfRange { .. } | Self::TooManyConstants { .. } => {
                codes::lexical::CONSTANT_OUT_OF_RANGE
            }
            Self::IdentifierTooLong { .. } => codes::lexical::IDENTIFIER_TOO_LONG,
            Self::CommentTooLong { .. } => codes::lexical::COMMENT_TOO_LONG,
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
    fn test_message_format() {
        let error = LexicalError::IllegalSymbol {
            symbol: '#',
            position: Position::new(10, 2, 5),
        };
        assert_eq!(
            error.to_string(),
            "Lexer error (line 2, column 5): Illegal symbol '#';"
        );
    }

    #[test]
    fn test_lexical_errors_are_recoverable() {
        let error = LexicalError::UnclosedComment {
            position: Position::start(),
        };
        assert_eq!(error.error_code(), codes::lexical::UNCLOSED_COMMENT);
        assert!(error.is_recoverable());
        assert_eq!(error.category(), "Lexical");
        assert_eq!(error.span().start(), Position::start());
    }

    #[test]
    fn test_illegal_symbol_span_covers_whole_character() {
        let mut grammar = crate::grammar::Grammar::signal();
        let source = "A é";
        let list = crate::lexical::scan(source, &mut grammar);

        let span = list.errors[0].span();
        assert_eq!(span.len(), 'é'.len_utf8());
        assert!(source.is_char_boundary(span.end().offset));
        assert_eq!(&source[span.start().offset..span.end().offset], "é");
    }
}

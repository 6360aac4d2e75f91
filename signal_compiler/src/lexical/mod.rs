//! Lexical analysis for SIGNAL source text
//!
//! Turns characters into positioned [`Token`](crate::tokens::Token)s,
//! interning identifiers and constants into the caller's
//! [`Grammar`](crate::grammar::Grammar) as it goes. Errors never stop the
//! pass; they are collected in the returned [`LexemeList`].

pub mod analyzer;
pub mod constant;
pub mod error;
pub mod reader;

use crate::config::runtime::LexicalPreferences;
use crate::grammar::Grammar;

pub use analyzer::{LexemeList, Lexer, LexicalMetrics};
pub use error::LexicalError;
pub use reader::Reader;

/// Scan `source` with default preferences
pub fn scan(source: &str, grammar: &mut Grammar) -> LexemeList {
    Lexer::new(source, grammar).into_output()
}

/// Scan with custom runtime preferences (limits remain compile-time)
pub fn scan_with_preferences(
    source: &str,
    grammar: &mut Grammar,
    preferences: LexicalPreferences,
) -> LexemeList {
    Lexer::with_preferences(source, grammar, preferences).into_output()
}

/// Verify every lexical error code has registry metadata
pub fn validate_error_codes() -> Result<(), String> {
    use crate::logging::codes;

    let lexical_codes = [
        codes::lexical::ILLEGAL_SYMBOL,
        codes::lexical::UNOPENED_COMMENT,
        codes::lexical::UNCLOSED_COMMENT,
        codes::lexical::WRONG_LEFT_PART,
        codes::lexical::UNKNOWN_CONSTANT_WORD,
        codes::lexical::WRONG_RIGHT_PART,
        codes::lexical::UNCLOSED_EXPONENT,
        codes::lexical::UNCLOSED_CONSTANT,
        codes::lexical::CONSTANT_OUT_OF_RANGE,
        codes::lexical::IDENTIFIER_TOO_LONG,
        codes::lexical::COMMENT_TOO_LONG,
    ];

    for code in &lexical_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_scan() {
        let mut grammar = Grammar::signal();
        let list = scan("PROGRAM P; CONST BEGIN END.", &mut grammar);
        assert!(list.errors.is_empty());
        assert_eq!(list.tokens.len(), 7);
    }

    #[test]
    fn test_error_codes_registered() {
        assert!(validate_error_codes().is_ok());
    }
}

//! Positioned tokens produced by the lexer
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::grammar::{Code, CodeKind};
use crate::tokens::constant::ComplexConstant;
use crate::utils::{Position, Span};

/// One scanned lexeme.
///
/// `text` is empty for single-character delimiters (the character is the
/// code) and holds the spelling of keywords, identifiers and the canonical
/// literal of constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub code: Code,
    pub span: Span,
    pub text: Option<String>,
    /// Parsed value, present on constant tokens only
    pub constant: Option<ComplexConstant>,
}

impl Token {
    pub fn delimiter(code: Code, span: Span) -> Self {
        Self {
            code,
            span,
            text: None,
            constant: None,
        }
    }

    pub fn word(code: Code, span: Span, text: impl Into<String>) -> Self {
        Self {
            code,
            span,
            text: Some(text.into()),
            constant: None,
        }
    }

    pub fn constant(code: Code, span: Span, value: ComplexConstant) -> Self {
        Self {
            code,
            span,
            text: Some(value.literal()),
            constant: Some(value),
        }
    }

    pub fn position(&self) -> Position {
        self.span.start()
    }

    pub fn kind(&self) -> CodeKind {
        CodeKind::of(self.code)
    }

    /// Text shown in diagnostics: the stored text, or the delimiter character
    pub fn display_text(&self) -> String {
        match &self.text {
            Some(text) => text.clone(),
            None => char::from_u32(self.code)
                .map(String::from)
                .unwrap_or_else(|| self.code.to_string()),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.display_text())
    }
}

//! Cursor over the lexer's token list for the parser

use crate::tokens::token::Token;
use crate::utils::Position;

/// One-token-lookahead cursor; the parser never backtracks
#[derive(Debug, Clone)]
pub struct TokenStream<'t> {
    tokens: &'t [Token],
    position: usize,
}

impl<'t> TokenStream<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    // === NAVIGATION ===

    pub fn current(&self) -> Option<&'t Token> {
        self.tokens.get(self.position)
    }

    /// Index of the current token in the underlying list
    pub fn current_index(&self) -> usize {
        self.position
    }

    /// Move past the current token, returning its index
    pub fn advance(&mut self) -> Option<usize> {
        if self.position < self.tokens.len() {
            self.position += 1;
            Some(self.position - 1)
        } else {
            None
        }
    }

    /// Position of the current token, or just past the last one at the end
    pub fn position(&self) -> Option<Position> {
        self.current()
            .or_else(|| self.tokens.last())
            .map(|token| token.position())
    }
}

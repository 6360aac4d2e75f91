//! Syntax analysis: token list to owned syntax tree
//!
//! [`parse`] runs the recursive-descent [`Parser`] and always returns a
//! [`SyntaxTree`]; when parsing fails the tree's root has no children and
//! [`ParseOutput::error`] holds the single error that stopped it.

pub mod error;
pub mod parser;
pub mod tree;

pub use error::{SyntaxError, SyntaxResult};
pub use parser::{parse, ParseOutput, Parser};
pub use tree::{Node, NonterminalKind, Preorder, SyntaxTree};

use crate::config::runtime::SyntaxPreferences;
use crate::grammar::Grammar;
use crate::tokens::Token;

/// Parse with custom runtime preferences
pub fn parse_with_preferences(
    tokens: &[Token],
    grammar: &Grammar,
    preferences: SyntaxPreferences,
) -> ParseOutput {
    Parser::with_preferences(tokens, grammar, preferences).parse()
}

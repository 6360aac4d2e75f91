//! Code generation: stack layout of constant declarations
//!
//! The [`Generator`] consumes a complete [`SyntaxTree`](crate::syntax::SyntaxTree)
//! together with the token list it was parsed from. Duplicate names and frame
//! overflows are collected as [`SemanticError`]s without stopping the walk.

pub mod error;
pub mod generator;
pub mod report;

use crate::config::runtime::CodegenPreferences;
use crate::syntax::SyntaxTree;
use crate::tokens::Token;

pub use error::{GeneratorError, SemanticError};
pub use generator::{generate, Generator, GeneratorOutput, IdentifierEntry, IdentifierKind};
pub use report::identifier_table;

pub fn generate_with_preferences(
    tree: &SyntaxTree,
    tokens: &[Token],
    preferences: CodegenPreferences,
) -> Result<GeneratorOutput, GeneratorError> {
    Generator::with_preferences(tree, tokens, preferences).generate()
}

/// Verify every code generation error code has registry metadata
pub fn validate_error_codes() -> Result<(), String> {
    use crate::logging::codes;

    for code in [
        codes::codegen::DUPLICATE_CONSTANT,
        codes::codegen::FRAME_SIZE_EXCEEDED,
        codes::codegen::INCOMPLETE_TREE,
    ] {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Codegen error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }
    Ok(())
}

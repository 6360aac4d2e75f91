//! Compilation pipeline: source text through lexer, parser and generator
//!
//! Each stage runs only when the previous one left nothing fatal behind: the
//! parser needs an error-free token list and the generator a complete tree.

mod error;
mod result;

pub use error::PipelineError;
pub use result::CompilationResult;

use std::path::Path;
use std::time::Instant;

use crate::codegen::Generator;
use crate::config::RuntimeConfig;
use crate::file_processor::FileProcessor;
use crate::grammar::Grammar;
use crate::lexical::Lexer;
use crate::logging::{self, codes};
use crate::syntax::Parser;
use crate::{log_debug, log_info, log_success};

/// Compile with the standard grammar and default preferences
pub fn compile_source(source: &str) -> Result<CompilationResult, PipelineError> {
    let mut grammar = Grammar::signal();
    compile_with_grammar(source, &mut grammar, &RuntimeConfig::default())
}

/// Compile against a caller-provided grammar, which receives the interned
/// identifiers and constants
pub fn compile_with_grammar(
    source: &str,
    grammar: &mut Grammar,
    config: &RuntimeConfig,
) -> Result<CompilationResult, PipelineError> {
    let start = Instant::now();
    log_debug!("Starting compilation", "bytes" => source.len());

    let mut lexer = Lexer::with_preferences(source, grammar, config.lexical.clone());
    lexer.scan();
    let lexical_metrics = lexer.metrics().clone();
    let list = lexer.into_output();

    let mut result = CompilationResult {
        tokens: list.tokens,
        lexical_errors: list.errors,
        lexical_metrics,
        parse: None,
        generation: None,
        include_identifier_table: config.codegen.include_identifier_table,
    };

    if !result.lexical_errors.is_empty() {
        log_info!("Skipping parsing after lexical errors",
            "errors" => result.lexical_errors.len());
        return Ok(result);
    }

    let parse = Parser::with_preferences(&result.tokens, grammar, config.syntax.clone()).parse();
    if parse.is_ok() {
        let generation =
            Generator::with_preferences(&parse.tree, &result.tokens, config.codegen.clone())
                .generate()?;
        result.generation = Some(generation);
    }
    result.parse = Some(parse);

    if result.is_success() {
        log_success!(
            codes::success::COMPILATION_COMPLETE,
            "Compilation completed",
            "tokens" => result.tokens.len(),
            "duration_ms" => format!("{:.2}", start.elapsed().as_secs_f64() * 1000.0)
        );
    } else {
        log_info!("Compilation finished with errors", "errors" => result.error_count());
    }

    Ok(result)
}

/// Load a source file and compile it with default preferences
pub fn process_file(path: impl AsRef<Path>) -> Result<CompilationResult, PipelineError> {
    process_file_with_config(path, &RuntimeConfig::default())
}

pub fn process_file_with_config(
    path: impl AsRef<Path>,
    config: &RuntimeConfig,
) -> Result<CompilationResult, PipelineError> {
    let path = path.as_ref();
    logging::with_file_context(path.to_path_buf(), 0, || {
        log_info!("Starting SIGNAL compilation", "file" => path.display());

        let file = FileProcessor::from_preferences(&config.file_processor).process_file(path)?;
        let mut grammar = Grammar::signal();
        compile_with_grammar(&file.source, &mut grammar, config)
    })
}

/// Check that every stage's error codes are registered
pub fn validate_pipeline() -> Result<(), String> {
    crate::file_processor::validate_error_codes()?;
    crate::lexical::validate_error_codes()?;
    crate::codegen::validate_error_codes()?;
    Ok(())
}

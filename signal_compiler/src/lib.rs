// Internal modules
pub mod codegen;
pub mod config;
pub mod file_processor;
pub mod grammar;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod syntax;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use grammar::Grammar;
pub use pipeline::{compile_source, process_file, CompilationResult, PipelineError};

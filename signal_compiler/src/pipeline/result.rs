use crate::codegen::{identifier_table, GeneratorOutput};
use crate::lexical::{LexicalError, LexicalMetrics};
use crate::syntax::ParseOutput;
use crate::tokens::Token;

/// Everything the stages produced for one source text
///
/// `parse` is `None` when lexical errors stopped the pipeline and
/// `generation` is `None` unless parsing succeeded.
#[derive(Debug, Clone)]
pub struct CompilationResult {
    pub tokens: Vec<Token>,
    pub lexical_errors: Vec<LexicalError>,
    pub lexical_metrics: LexicalMetrics,
    pub parse: Option<ParseOutput>,
    pub generation: Option<GeneratorOutput>,
    pub include_identifier_table: bool,
}

impl CompilationResult {
    pub fn error_count(&self) -> usize {
        let syntax = self
            .parse
            .as_ref()
            .map_or(0, |parse| parse.errors().len());
        let semantic = self
            .generation
            .as_ref()
            .map_or(0, |generation| generation.errors.len());
        self.lexical_errors.len() + syntax + semantic
    }

    pub fn is_success(&self) -> bool {
        self.generation.is_some() && self.error_count() == 0
    }

    /// One line per error in stage order, then the lexical total
    pub fn diagnostics(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.lexical_errors.iter().map(ToString::to_string).collect();
        if !self.lexical_errors.is_empty() {
            lines.push(format!("Lexer: {} error(s) found", self.lexical_errors.len()));
        }
        if let Some(parse) = &self.parse {
            lines.extend(parse.messages());
        }
        if let Some(generation) = &self.generation {
            lines.extend(generation.messages());
        }
        lines
    }

    /// Listing and identifier table on success, the diagnostics otherwise
    pub fn report(&self) -> String {
        match &self.generation {
            Some(generation) if self.is_success() => {
                let mut report = generation.listing.clone();
                if self.include_identifier_table {
                    report.push_str("\n\n");
                    report.push_str(&identifier_table(generation));
                }
                report
            }
            _ => self.diagnostics().join("\n"),
        }
    }

    /// Dot-indented tree dump, when parsing ran
    pub fn tree_dump(&self) -> Option<String> {
        self.parse
            .as_ref()
            .map(|parse| parse.tree.render(&self.tokens))
    }
}

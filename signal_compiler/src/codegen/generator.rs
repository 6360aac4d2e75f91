//! Stack layout and pseudo-assembly emission
//!
//! Constants are laid out downward from `rbp` in declaration order. Every
//! constant takes one or two 8-byte slots; offsets grow monotonically and a
//! rejected declaration never consumes a slot.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Write;

use crate::codegen::error::{GeneratorError, SemanticError};
use crate::config::compile_time::codegen::MAX_FRAME_SIZE;
use crate::config::runtime::CodegenPreferences;
use crate::logging::codes;
use crate::syntax::{Node, NonterminalKind, SyntaxTree};
use crate::tokens::{ComplexConstant, Token, SLOT_SIZE};
use crate::utils::Position;
use crate::{log_debug, log_error, log_success};

const PROLOGUE: &str = "push rbp\nmov rbp, rsp\n";
const EPILOGUE: &str = "pop rbp\nret";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentifierKind {
    Program,
    Constant,
}

impl IdentifierKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Program => "PROGRAM",
            Self::Constant => "CONST",
        }
    }
}

/// One named item of the generated frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierEntry {
    pub name: String,
    pub kind: IdentifierKind,
    /// Distance below `rbp`; 0 for the procedure name
    pub offset: u64,
    pub size: u64,
}

impl IdentifierEntry {
    pub fn is_const(&self) -> bool {
        self.kind == IdentifierKind::Constant
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorOutput {
    pub listing: String,
    pub identifiers: HashMap<String, IdentifierEntry>,
    /// Names in the order they were recorded
    pub order: Vec<String>,
    pub errors: Vec<SemanticError>,
    pub frame_size: u64,
}

impl GeneratorOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn entry(&self, name: &str) -> Option<&IdentifierEntry> {
        self.identifiers.get(name)
    }

    /// Entries in recording order
    pub fn entries(&self) -> impl Iterator<Item = &IdentifierEntry> + '_ {
        self.order
            .iter()
            .filter_map(move |name| self.identifiers.get(name))
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// Walks a complete syntax tree and lays out its constants
pub struct Generator<'a> {
    tree: &'a SyntaxTree,
    tokens: &'a [Token],
    preferences: CodegenPreferences,
    offset: u64,
    output: GeneratorOutput,
}

impl<'a> Generator<'a> {
    pub fn new(tree: &'a SyntaxTree, tokens: &'a [Token]) -> Self {
        Self::with_preferences(tree, tokens, CodegenPreferences::default())
    }

    pub fn with_preferences(
        tree: &'a SyntaxTree,
        tokens: &'a [Token],
        preferences: CodegenPreferences,
    ) -> Self {
        Self {
            tree,
            tokens,
            preferences,
            offset: 0,
            output: GeneratorOutput::default(),
        }
    }

    pub fn generate(mut self) -> Result<GeneratorOutput, GeneratorError> {
        log_debug!("Starting code generation", "tokens" => self.tokens.len());

        let tree = self.tree;
        if !tree.is_complete() {
            let error = GeneratorError::incomplete(NonterminalKind::Program.as_str());
            log_error!(error.error_code(), &error.to_string());
            return Err(error);
        }

        self.output.listing.push_str(PROLOGUE);

        let procedure = tree
            .find_first(NonterminalKind::ProcedureIdentifier)
            .ok_or_else(|| GeneratorError::incomplete(NonterminalKind::ProcedureIdentifier.as_str()))?;
        let (name, _) = self.identifier(procedure)?;
        self.record(IdentifierEntry {
            name,
            kind: IdentifierKind::Program,
            offset: 0,
            size: 0,
        });

        let declarations = tree
            .find_first(NonterminalKind::ConstantDeclarations)
            .ok_or_else(|| GeneratorError::incomplete(NonterminalKind::ConstantDeclarations.as_str()))?;

        let mut list = declarations.child(NonterminalKind::ConstantDeclarationsList);
        while let Some(node) = list {
            let declaration = node
                .child(NonterminalKind::ConstantDeclaration)
                .ok_or_else(|| GeneratorError::incomplete(NonterminalKind::ConstantDeclaration.as_str()))?;
            self.declaration(declaration)?;
            list = node.child(NonterminalKind::ConstantDeclarationsList);
        }

        self.output.listing.push_str(EPILOGUE);
        self.output.frame_size = self.offset;

        log_success!(
            codes::success::CODE_GENERATION_COMPLETE,
            "Code generation completed",
            "identifiers" => self.output.order.len(),
            "frame_size" => self.offset,
            "errors" => self.output.errors.len()
        );

        Ok(self.output)
    }

    fn declaration(&mut self, node: &Node) -> Result<(), GeneratorError> {
        let identifier = node
            .child(NonterminalKind::ConstantIdentifier)
            .ok_or_else(|| GeneratorError::incomplete(NonterminalKind::ConstantIdentifier.as_str()))?;
        let (name, position) = self.identifier(identifier)?;
        let constant = self.constant(node)?;

        if self.output.identifiers.contains_key(&name) {
            self.reject(SemanticError::DuplicateConstant { name, position });
            return Ok(());
        }

        let size = constant.size_in_bytes();
        if self.offset + size > MAX_FRAME_SIZE {
            self.reject(SemanticError::FrameSizeExceeded {
                name,
                size,
                position,
            });
            return Ok(());
        }

        if self.preferences.emit_declaration_comments {
            let _ = writeln!(self.output.listing, "; {}", name);
        }

        self.offset += SLOT_SIZE;
        let slot = self.offset;
        match constant.fields() {
            Some((left, right)) => {
                self.emit_store(slot + SLOT_SIZE, right);
                self.emit_store(slot, left);
                self.offset += SLOT_SIZE;
            }
            None => self.emit_store(slot, constant.value()),
        }

        self.record(IdentifierEntry {
            name,
            kind: IdentifierKind::Constant,
            offset: slot,
            size,
        });
        Ok(())
    }

    fn emit_store(&mut self, offset: u64, value: u64) {
        let _ = writeln!(self.output.listing, "mov QWORD PTR[rbp - {}], {}", offset, value);
    }

    fn record(&mut self, entry: IdentifierEntry) {
        self.output.order.push(entry.name.clone());
        self.output.identifiers.insert(entry.name.clone(), entry);
    }

    fn reject(&mut self, error: SemanticError) {
        log_error!(error.error_code(), &error.to_string(),
            span = error.span(),
            "offset" => self.offset
        );
        self.output.errors.push(error);
    }

    fn token(&self, node: &Node, missing: NonterminalKind) -> Result<&'a Token, GeneratorError> {
        let tokens = self.tokens;
        node.first_token()
            .and_then(|index| tokens.get(index))
            .ok_or_else(|| GeneratorError::incomplete(missing.as_str()))
    }

    /// Spelling and position of the identifier below `node`
    fn identifier(&self, node: &Node) -> Result<(String, Position), GeneratorError> {
        let token = self.token(node, NonterminalKind::Identifier)?;
        Ok((token.display_text(), token.position()))
    }

    fn constant(&self, declaration: &Node) -> Result<ComplexConstant, GeneratorError> {
        let node = declaration
            .child(NonterminalKind::Constant)
            .ok_or_else(|| GeneratorError::incomplete(NonterminalKind::Constant.as_str()))?;
        self.token(node, NonterminalKind::Constant)?
            .constant
            .clone()
            .ok_or_else(|| GeneratorError::incomplete(NonterminalKind::Constant.as_str()))
    }
}

/// Generate with default preferences
pub fn generate(tree: &SyntaxTree, tokens: &[Token]) -> Result<GeneratorOutput, GeneratorError> {
    Generator::new(tree, tokens).generate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Grammar;
    use crate::{lexical, syntax};
    use assert_matches::assert_matches;

    fn compile(source: &str) -> GeneratorOutput {
        let mut grammar = Grammar::signal();
        let list = lexical::scan(source, &mut grammar);
        assert!(list.errors.is_empty(), "{:?}", list.errors);
        let parsed = syntax::parse(&list.tokens, &grammar);
        assert!(parsed.is_ok(), "{:?}", parsed.error);
        generate(&parsed.tree, &list.tokens).unwrap()
    }

    #[test]
    fn test_single_constant() {
        let output = compile("PROGRAM TEST1; CONST VAL1 = '100'; BEGIN END.");
        assert!(!output.has_errors());

        let program = output.entry("TEST1").unwrap();
        assert!(!program.is_const());
        assert_eq!(program.offset, 0);

        let value = output.entry("VAL1").unwrap();
        assert!(value.is_const());
        assert_eq!((value.offset, value.size), (8, 8));

        assert!(output.listing.contains("mov QWORD PTR[rbp - 8], 100"));
        assert_eq!(
            output.listing,
            "push rbp\nmov rbp, rsp\n; VAL1\nmov QWORD PTR[rbp - 8], 100\npop rbp\nret"
        );
    }

    #[test]
    fn test_empty_declarations() {
        let output = compile("PROGRAM P; CONST BEGIN END.");
        assert_eq!(output.listing, "push rbp\nmov rbp, rsp\npop rbp\nret");
        assert_eq!(output.order, vec!["P".to_string()]);
        assert_eq!(output.frame_size, 0);
    }

    #[test]
    fn test_duplicate_does_not_advance_offset() {
        let output = compile("PROGRAM P; CONST A = '1'; A = '2'; B = '3'; BEGIN END.");

        assert_eq!(output.errors.len(), 1);
        assert_matches!(
            &output.errors[0],
            SemanticError::DuplicateConstant { name, position } if name == "A" && position.column == 27
        );
        assert_eq!(output.entry("A").unwrap().offset, 8);
        assert_eq!(output.entry("B").unwrap().offset, 16);
        assert!(output.listing.contains("mov QWORD PTR[rbp - 8], 1\n"));
        assert!(!output.listing.contains(", 2\n"));
        assert_eq!(output.order, vec!["P", "A", "B"]);
    }

    #[test]
    fn test_constant_named_after_program() {
        let output = compile("PROGRAM P; CONST P = '1'; BEGIN END.");
        assert_eq!(output.errors.len(), 1);
        assert_eq!(
            output.messages()[0],
            "Code Generator error (line 1, column 18): the constant name 'P' is used a second time;"
        );
        assert!(!output.entry("P").unwrap().is_const());
    }

    #[test]
    fn test_two_field_layout() {
        let output = compile("PROGRAM P; CONST C = '12 34'; D = '5'; BEGIN END.");

        let c = output.entry("C").unwrap();
        assert_eq!((c.offset, c.size), (8, 16));
        let d = output.entry("D").unwrap();
        assert_eq!((d.offset, d.size), (24, 8));

        assert_eq!(
            output.listing,
            "push rbp\nmov rbp, rsp\n\
             ; C\nmov QWORD PTR[rbp - 16], 34\nmov QWORD PTR[rbp - 8], 12\n\
             ; D\nmov QWORD PTR[rbp - 24], 5\n\
             pop rbp\nret"
        );
        assert_eq!(output.frame_size, 32);
    }

    #[test]
    fn test_exponent_is_folded() {
        let output = compile("PROGRAM P; CONST E = '1 $EXP(4)'; BEGIN END.");
        assert_eq!(output.entry("E").unwrap().size, 8);
        assert!(output.listing.contains("mov QWORD PTR[rbp - 8], 10000\n"));
    }

    #[test]
    fn test_declaration_comments_can_be_disabled() {
        let mut grammar = Grammar::signal();
        let list = lexical::scan("PROGRAM P; CONST A = '7'; BEGIN END.", &mut grammar);
        let parsed = syntax::parse(&list.tokens, &grammar);
        let preferences = CodegenPreferences {
            emit_declaration_comments: false,
            include_identifier_table: true,
        };
        let output = Generator::with_preferences(&parsed.tree, &list.tokens, preferences)
            .generate()
            .unwrap();
        assert!(!output.listing.contains(';'));
    }

    #[test]
    fn test_incomplete_tree() {
        let result = generate(&SyntaxTree::empty(), &[]);
        assert_matches!(result, Err(GeneratorError::IncompleteTree { missing }) if missing == "<program>");
    }

    #[test]
    fn test_entries_follow_order() {
        let output = compile("PROGRAM P; CONST Z = '1'; A = '2'; BEGIN END.");
        let names: Vec<&str> = output.entries().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, vec!["P", "Z", "A"]);
    }
}

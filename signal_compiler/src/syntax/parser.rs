//! Recursive-descent parser for SIGNAL
//!
//! ```text
//! program                  := PROGRAM procedure-identifier ';' block '.'
//! block                    := declarations BEGIN statements-list END
//! declarations             := constant-declarations
//! constant-declarations    := CONST ( constant-declarations-list | empty )
//! constant-declarations-list := constant-declaration ( constant-declarations-list | empty )
//! constant-declaration     := constant-identifier '=' constant ';'
//! statements-list          := empty
//! ```
//!
//! One token of lookahead, no backtracking. Each rule returns a `SyntaxResult`
//! and the first error propagates straight to [`Parser::parse`].

use crate::config::compile_time::syntax::*;
use crate::config::runtime::SyntaxPreferences;
use crate::grammar::{Code, CodeKind, Grammar, Keyword, IDENTIFIER_BASE};
use crate::logging::codes;
use crate::syntax::error::{SyntaxError, SyntaxResult};
use crate::syntax::tree::{Node, NonterminalKind, SyntaxTree};
use crate::tokens::{Token, TokenStream};
use crate::utils::Position;
use crate::{log_debug, log_error, log_success};

/// Tree plus the error that stopped parsing, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutput {
    pub tree: SyntaxTree,
    pub error: Option<SyntaxError>,
}

impl ParseOutput {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn errors(&self) -> &[SyntaxError] {
        self.error.as_slice()
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors().iter().map(ToString::to_string).collect()
    }
}

pub struct Parser<'t, 'g> {
    tokens: TokenStream<'t>,
    grammar: &'g Grammar,
    preferences: SyntaxPreferences,
    context_stack: Vec<&'static str>,
    parse_depth: usize,
}

impl<'t, 'g> Parser<'t, 'g> {
    pub fn new(tokens: &'t [Token], grammar: &'g Grammar) -> Self {
        Self::with_preferences(tokens, grammar, SyntaxPreferences::default())
    }

    pub fn with_preferences(
        tokens: &'t [Token],
        grammar: &'g Grammar,
        preferences: SyntaxPreferences,
    ) -> Self {
        log_debug!("Creating SIGNAL parser", "tokens" => tokens.len());

        Self {
            tokens: TokenStream::new(tokens),
            grammar,
            preferences,
            context_stack: Vec::new(),
            parse_depth: 0,
        }
    }

    /// Parse the whole token list into a `<signal-program>` tree
    pub fn parse(mut self) -> ParseOutput {
        let mut root = Node::nonterminal(NonterminalKind::SignalProgram);

        let result = self.program().and_then(|program| {
            match self.tokens.current() {
                Some(token) => Err(SyntaxError::TrailingTokens {
                    position: token.position(),
                }),
                None => Ok(program),
            }
        });

        match result {
            Ok(program) => {
                root.push(program);
                log_success!(
                    codes::success::PARSE_COMPLETE,
                    "Parsing completed",
                    "tokens" => self.tokens.current_index()
                );
                ParseOutput {
                    tree: SyntaxTree::new(root),
                    error: None,
                }
            }
            Err(error) => {
                match error.span() {
                    Some(span) => log_error!(error.error_code(), &error.to_string(),
                        span = span,
                        "token_index" => self.tokens.current_index()
                    ),
                    None => log_error!(error.error_code(), &error.to_string(),
                        "token_index" => self.tokens.current_index()
                    ),
                }
                ParseOutput {
                    tree: SyntaxTree::new(root),
                    error: Some(error),
                }
            }
        }
    }

    // === GRAMMAR RULES ===

    fn program(&mut self) -> SyntaxResult<Node> {
        self.rule(NonterminalKind::Program, |p, node| {
            node.push(p.expect_keyword(Keyword::Program)?);
            node.push(p.procedure_identifier()?);
            node.push(p.expect_delimiter(';')?);
            node.push(p.block()?);
            node.push(p.expect_delimiter('.')?);
            Ok(())
        })
    }

    fn procedure_identifier(&mut self) -> SyntaxResult<Node> {
        self.rule(NonterminalKind::ProcedureIdentifier, |p, node| {
            node.push(p.identifier()?);
            Ok(())
        })
    }

    fn block(&mut self) -> SyntaxResult<Node> {
        self.rule(NonterminalKind::Block, |p, node| {
            node.push(p.declarations()?);
            node.push(p.expect_keyword(Keyword::Begin)?);
            node.push(p.statements_list()?);
            node.push(p.expect_keyword(Keyword::End)?);
            Ok(())
        })
    }

    fn declarations(&mut self) -> SyntaxResult<Node> {
        self.rule(NonterminalKind::Declarations, |p, node| {
            node.push(p.constant_declarations()?);
            Ok(())
        })
    }

    fn constant_declarations(&mut self) -> SyntaxResult<Node> {
        self.rule(NonterminalKind::ConstantDeclarations, |p, node| {
            node.push(p.expect_keyword(Keyword::Const)?);
            if p.next_is_identifier("<identifier>")? {
                node.push(p.constant_declarations_list()?);
            } else {
                node.push(Node::nonterminal(NonterminalKind::Empty));
            }
            Ok(())
        })
    }

    /// Right-recursive in the grammar; parsed as a loop and folded into the
    /// nested shape afterwards
    fn constant_declarations_list(&mut self) -> SyntaxResult<Node> {
        let mut declarations = Vec::new();

        loop {
            if declarations.len() >= MAX_DECLARATIONS {
                return Err(SyntaxError::TooManyDeclarations {
                    position: self.current_position(),
                });
            }

            self.push_context(NonterminalKind::ConstantDeclarationsList.as_str());
            let declaration = self.constant_declaration();
            self.pop_context();
            declarations.push(declaration?);

            if !self.next_is_identifier("<identifier>")? {
                break;
            }
        }

        let mut tail = Node::nonterminal(NonterminalKind::Empty);
        for declaration in declarations.into_iter().rev() {
            let mut list = Node::nonterminal(NonterminalKind::ConstantDeclarationsList);
            list.push(declaration);
            list.push(tail);
            tail = list;
        }
        Ok(tail)
    }

    fn constant_declaration(&mut self) -> SyntaxResult<Node> {
        self.rule(NonterminalKind::ConstantDeclaration, |p, node| {
            node.push(p.constant_identifier()?);
            node.push(p.expect_delimiter('=')?);
            node.push(p.constant()?);
            node.push(p.expect_delimiter(';')?);
            Ok(())
        })
    }

    fn constant_identifier(&mut self) -> SyntaxResult<Node> {
        self.rule(NonterminalKind::ConstantIdentifier, |p, node| {
            node.push(p.identifier()?);
            Ok(())
        })
    }

    fn constant(&mut self) -> SyntaxResult<Node> {
        self.rule(NonterminalKind::Constant, |p, node| {
            let index = p.expect_code("<complex-constant>", |code| {
                CodeKind::of(code) == CodeKind::Constant
            })?;
            node.push(Node::terminal(index));
            Ok(())
        })
    }

    fn identifier(&mut self) -> SyntaxResult<Node> {
        self.rule(NonterminalKind::Identifier, |p, node| {
            let index = p.expect_code("<identifier>", |code| code >= IDENTIFIER_BASE)?;
            node.push(Node::terminal(index));
            Ok(())
        })
    }

    fn statements_list(&mut self) -> SyntaxResult<Node> {
        self.rule(NonterminalKind::StatementsList, |_, node| {
            node.push(Node::nonterminal(NonterminalKind::Empty));
            Ok(())
        })
    }

    // === TOKEN MATCHING ===

    /// Build one nonterminal, tracking context and nesting depth
    fn rule<F>(&mut self, kind: NonterminalKind, build: F) -> SyntaxResult<Node>
    where
        F: FnOnce(&mut Self, &mut Node) -> SyntaxResult<()>,
    {
        if self.parse_depth >= MAX_PARSE_DEPTH {
            return Err(SyntaxError::MaxRecursionDepth {
                depth: self.parse_depth + 1,
                position: self.current_position(),
            });
        }

        self.push_context(kind.as_str());
        self.parse_depth += 1;

        let mut node = Node::nonterminal(kind);
        let result = build(self, &mut node);

        self.parse_depth -= 1;
        self.pop_context();

        result.map(|()| node)
    }

    fn current(&self, expected: &str) -> SyntaxResult<&'t Token> {
        self.tokens
            .current()
            .ok_or_else(|| SyntaxError::premature_end(expected))
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> SyntaxResult<Node> {
        let code = self.grammar.code_of(keyword);
        let token = self.current(keyword.as_str())?;
        if token.code != code {
            return Err(SyntaxError::MissingKeyword {
                keyword,
                found: token.display_text(),
                position: token.position(),
            });
        }
        self.consume()
    }

    fn expect_delimiter(&mut self, delimiter: char) -> SyntaxResult<Node> {
        let expected = delimiter.to_string();
        self.expect_code(&expected, |code| code == delimiter as Code)
            .map(Node::terminal)
    }

    fn expect_code<F>(&mut self, expected: &str, accepts: F) -> SyntaxResult<usize>
    where
        F: FnOnce(Code) -> bool,
    {
        let token = self.current(expected)?;
        if !accepts(token.code) {
            return Err(SyntaxError::unexpected_token(
                expected,
                &token.display_text(),
                token.position(),
            ));
        }
        let index = self.tokens.current_index();
        self.tokens.advance();
        Ok(index)
    }

    fn consume(&mut self) -> SyntaxResult<Node> {
        let index = self.tokens.current_index();
        self.tokens.advance();
        Ok(Node::terminal(index))
    }

    /// Lookahead used to choose between a declaration list and `<empty>`
    fn next_is_identifier(&self, expected: &str) -> SyntaxResult<bool> {
        Ok(self.current(expected)?.code >= IDENTIFIER_BASE)
    }

    fn current_position(&self) -> Position {
        self.tokens.position().unwrap_or_default()
    }

    // === CONTEXT TRACKING ===

    pub fn push_context(&mut self, context: &'static str) {
        if self.preferences.log_parse_contexts {
            log_debug!("Entering parsing context", "context" => context);
        }
        self.context_stack.push(context);
    }

    pub fn pop_context(&mut self) {
        if let Some(context) = self.context_stack.pop() {
            if self.preferences.log_parse_contexts {
                log_debug!("Exiting parsing context", "context" => context);
            }
        }
    }

    /// Rules currently being parsed, outermost first
    pub fn current_context(&self) -> String {
        self.context_stack.join(" -> ")
    }
}

/// Parse `tokens` with default preferences
pub fn parse(tokens: &[Token], grammar: &Grammar) -> ParseOutput {
    Parser::new(tokens, grammar).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical;
    use assert_matches::assert_matches;

    fn parse_source(source: &str) -> (ParseOutput, Vec<Token>) {
        let mut grammar = Grammar::signal();
        let list = lexical::scan(source, &mut grammar);
        assert!(list.errors.is_empty(), "{:?}", list.errors);
        let output = parse(&list.tokens, &grammar);
        (output, list.tokens)
    }

    fn kinds(node: &Node) -> Vec<Option<NonterminalKind>> {
        node.children().iter().map(Node::kind).collect()
    }

    #[test]
    fn test_minimal_program() {
        let (output, _) = parse_source("PROGRAM P; CONST BEGIN END.");
        assert!(output.is_ok());
        assert!(output.tree.is_complete());

        let program = output.tree.root().child(NonterminalKind::Program).unwrap();
        assert_eq!(
            kinds(program),
            vec![
                None,
                Some(NonterminalKind::ProcedureIdentifier),
                None,
                Some(NonterminalKind::Block),
                None
            ]
        );

        let declarations = output
            .tree
            .find_first(NonterminalKind::ConstantDeclarations)
            .unwrap();
        assert_eq!(kinds(declarations), vec![None, Some(NonterminalKind::Empty)]);
    }

    #[test]
    fn test_declaration_list_nests_to_the_right() {
        let (output, tokens) =
            parse_source("PROGRAM P; CONST A = '1'; B = '2 3'; BEGIN END.");
        assert!(output.is_ok());

        let list = output
            .tree
            .find_first(NonterminalKind::ConstantDeclarationsList)
            .unwrap();
        assert_eq!(
            kinds(list),
            vec![
                Some(NonterminalKind::ConstantDeclaration),
                Some(NonterminalKind::ConstantDeclarationsList)
            ]
        );
        let inner = &list.children()[1];
        assert_eq!(
            kinds(inner),
            vec![
                Some(NonterminalKind::ConstantDeclaration),
                Some(NonterminalKind::Empty)
            ]
        );

        let constant = inner.find_first(NonterminalKind::Constant).unwrap();
        let index = constant.first_token().unwrap();
        assert_eq!(tokens[index].display_text(), "'2 3'");
    }

    #[test]
    fn test_missing_final_dot() {
        let (output, _) = parse_source("PROGRAM P; CONST BEGIN END");
        assert_eq!(output.errors().len(), 1);
        assert_matches!(
            output.error,
            Some(SyntaxError::PrematureEnd { ref expected }) if expected == "."
        );
        assert!(!output.tree.is_complete());
        assert!(output.tree.root().children().is_empty());
    }

    #[test]
    fn test_unexpected_token_reports_position() {
        let (output, _) = parse_source("PROGRAM P\nCONST BEGIN END.");
        assert_eq!(
            output.messages(),
            vec!["Parser error (line 2, column 1): ';' expected but 'CONST' found;"]
        );
    }

    #[test]
    fn test_missing_keyword() {
        let (output, _) = parse_source("PROGRAM P; BEGIN END.");
        assert_matches!(
            output.error,
            Some(SyntaxError::MissingKeyword { keyword: Keyword::Const, ref found, .. }) if found == "BEGIN"
        );
    }

    #[test]
    fn test_constant_expected() {
        let (output, _) = parse_source("PROGRAM P; CONST A = B; BEGIN END.");
        assert_eq!(
            output.messages(),
            vec!["Parser error (line 1, column 22): '<complex-constant>' expected but 'B' found;"]
        );
    }

    #[test]
    fn test_trailing_tokens() {
        let (output, _) = parse_source("PROGRAM P; CONST BEGIN END. X");
        assert_matches!(
            output.error,
            Some(SyntaxError::TrailingTokens { position }) if position.column == 29
        );
    }

    #[test]
    fn test_empty_token_list() {
        let grammar = Grammar::signal();
        let output = parse(&[], &grammar);
        assert_matches!(output.error, Some(SyntaxError::PrematureEnd { .. }));
    }

    fn declaration_source(count: usize) -> String {
        let mut source = String::from("PROGRAM P; CONST ");
        for i in 0..count {
            source.push_str(&format!("C{} = '1'; ", i));
        }
        source.push_str("BEGIN END.");
        source
    }

    #[test]
    fn test_long_declaration_list_is_not_nesting() {
        let (output, _) = parse_source(&declaration_source(MAX_PARSE_DEPTH + 10));
        assert!(output.is_ok(), "{:?}", output.error);

        let mut count = 0;
        let mut list = output.tree.find_first(NonterminalKind::ConstantDeclarationsList);
        while let Some(node) = list {
            count += 1;
            list = node.child(NonterminalKind::ConstantDeclarationsList);
        }
        assert_eq!(count, MAX_PARSE_DEPTH + 10);
    }

    #[test]
    fn test_declaration_count_limit() {
        let (output, _) = parse_source(&declaration_source(MAX_DECLARATIONS));
        assert!(output.is_ok(), "{:?}", output.error);

        let (output, _) = parse_source(&declaration_source(MAX_DECLARATIONS + 1));
        assert_matches!(output.error, Some(SyntaxError::TooManyDeclarations { .. }));
        assert!(!output.tree.is_complete());
    }

    #[test]
    fn test_context_management() {
        let grammar = Grammar::signal();
        let mut parser = Parser::new(&[], &grammar);

        assert_eq!(parser.current_context(), "");
        parser.push_context("<program>");
        parser.push_context("<block>");
        assert_eq!(parser.current_context(), "<program> -> <block>");
        parser.pop_context();
        assert_eq!(parser.current_context(), "<program>");
    }
}

//! Owned concrete syntax tree
//!
//! Every nonterminal owns its children outright. Terminals store the index of
//! their token in the lexer's token list, so the tree never borrows tokens.

use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::tokens::Token;

/// Grammar symbols that appear as interior nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NonterminalKind {
    SignalProgram,
    Program,
    ProcedureIdentifier,
    ConstantIdentifier,
    Block,
    Declarations,
    ConstantDeclarations,
    ConstantDeclarationsList,
    ConstantDeclaration,
    Constant,
    StatementsList,
    Empty,
    Identifier,
}

impl NonterminalKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SignalProgram => "<signal-program>",
            Self::Program => "<program>",
            Self::ProcedureIdentifier => "<procedure-identifier>",
            Self::ConstantIdentifier => "<constant-identifier>",
            Self::Block => "<block>",
            Self::Declarations => "<declarations>",
            Self::ConstantDeclarations => "<constant-declarations>",
            Self::ConstantDeclarationsList => "<constant-declarations-list>",
            Self::ConstantDeclaration => "<constant-declaration>",
            Self::Constant => "<constant>",
            Self::StatementsList => "<statements-list>",
            Self::Empty => "<empty>",
            Self::Identifier => "<identifier>",
        }
    }
}

impl std::fmt::Display for NonterminalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    Nonterminal {
        kind: NonterminalKind,
        children: Vec<Node>,
    },
    Terminal {
        /// Index into the token list the tree was parsed from
        token: usize,
    },
}

impl Node {
    pub fn nonterminal(kind: NonterminalKind) -> Self {
        Self::Nonterminal {
            kind,
            children: Vec::new(),
        }
    }

    pub fn terminal(token: usize) -> Self {
        Self::Terminal { token }
    }

    /// Append a child; terminals cannot have children and ignore the call
    pub fn push(&mut self, child: Node) {
        if let Self::Nonterminal { children, .. } = self {
            children.push(child);
        }
    }

    pub fn kind(&self) -> Option<NonterminalKind> {
        match self {
            Self::Nonterminal { kind, .. } => Some(*kind),
            Self::Terminal { .. } => None,
        }
    }

    pub fn is(&self, kind: NonterminalKind) -> bool {
        self.kind() == Some(kind)
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Self::Nonterminal { children, .. } => children,
            Self::Terminal { .. } => &[],
        }
    }

    pub fn token_index(&self) -> Option<usize> {
        match self {
            Self::Terminal { token } => Some(*token),
            Self::Nonterminal { .. } => None,
        }
    }

    /// Depth-first, parent-before-children traversal
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder { stack: vec![self] }
    }

    /// First nonterminal of `kind` in pre-order, including `self`
    pub fn find_first(&self, kind: NonterminalKind) -> Option<&Node> {
        self.preorder().find(|node| node.is(kind))
    }

    /// Index of the leftmost terminal below this node
    pub fn first_token(&self) -> Option<usize> {
        self.preorder().find_map(Node::token_index)
    }

    /// Direct child of `kind`
    pub fn child(&self, kind: NonterminalKind) -> Option<&Node> {
        self.children().iter().find(|child| child.is(kind))
    }
}

/// Pre-order iterator over a subtree
pub struct Preorder<'n> {
    stack: Vec<&'n Node>,
}

impl<'n> Iterator for Preorder<'n> {
    type Item = &'n Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

/// Result of parsing: a `<signal-program>` root that is childless when
/// parsing failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxTree {
    root: Node,
}

impl SyntaxTree {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    /// A root with no program below it
    pub fn empty() -> Self {
        Self::new(Node::nonterminal(NonterminalKind::SignalProgram))
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn is_complete(&self) -> bool {
        self.root.child(NonterminalKind::Program).is_some()
    }

    pub fn preorder(&self) -> Preorder<'_> {
        self.root.preorder()
    }

    pub fn find_first(&self, kind: NonterminalKind) -> Option<&Node> {
        self.root.find_first(kind)
    }

    /// Indented dump: two dots per level, nonterminal names, and
    /// `<code> <text>` for terminals
    pub fn render(&self, tokens: &[Token]) -> String {
        let mut out = String::new();
        let mut stack = vec![(&self.root, 0usize)];

        while let Some((node, depth)) = stack.pop() {
            out.push_str(&".".repeat(depth * 2));
            match node {
                Node::Nonterminal { kind, children } => {
                    out.push_str(kind.as_str());
                    stack.extend(children.iter().rev().map(|child| (child, depth + 1)));
                }
                Node::Terminal { token } => match tokens.get(*token) {
                    Some(token) => {
                        let _ = write!(out, "{}", token);
                    }
                    None => {
                        let _ = write!(out, "?{}", token);
                    }
                },
            }
            out.push('\n');
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Code;
    use crate::utils::{Position, Span};

    fn sample() -> Node {
        let mut identifier = Node::nonterminal(NonterminalKind::Identifier);
        identifier.push(Node::terminal(1));
        let mut procedure = Node::nonterminal(NonterminalKind::ProcedureIdentifier);
        procedure.push(identifier);

        let mut program = Node::nonterminal(NonterminalKind::Program);
        program.push(Node::terminal(0));
        program.push(procedure);
        program.push(Node::terminal(2));

        let mut root = Node::nonterminal(NonterminalKind::SignalProgram);
        root.push(program);
        root
    }

    #[test]
    fn test_preorder_visits_parents_first() {
        let root = sample();
        let order: Vec<String> = root
            .preorder()
            .map(|node| match node {
                Node::Nonterminal { kind, .. } => kind.to_string(),
                Node::Terminal { token } => token.to_string(),
            })
            .collect();

        assert_eq!(
            order,
            vec![
                "<signal-program>",
                "<program>",
                "0",
                "<procedure-identifier>",
                "<identifier>",
                "1",
                "2"
            ]
        );
    }

    #[test]
    fn test_find_first() {
        let root = sample();
        let found = root.find_first(NonterminalKind::Identifier);
        assert_eq!(found.and_then(Node::first_token), Some(1));
        assert!(root.find_first(NonterminalKind::Block).is_none());
    }

    #[test]
    fn test_terminals_ignore_children() {
        let mut terminal = Node::terminal(3);
        terminal.push(Node::terminal(4));
        assert!(terminal.children().is_empty());
    }

    #[test]
    fn test_render() {
        let span = Span::at(Position::start());
        let tokens = vec![
            Token::word(401, span, "PROGRAM"),
            Token::word(1001, span, "P"),
            Token::delimiter(';' as Code, span),
        ];
        let tree = SyntaxTree::new(sample());

        assert!(tree.is_complete());
        assert_eq!(
            tree.render(&tokens),
            "<signal-program>\n\
             ..<program>\n\
             ....401 PROGRAM\n\
             ....<procedure-identifier>\n\
             ......<identifier>\n\
             ........1001 P\n\
             ....59 ;\n"
        );
    }

    #[test]
    fn test_empty_tree_is_incomplete() {
        let tree = SyntaxTree::empty();
        assert!(!tree.is_complete());
        assert_eq!(tree.render(&[]), "<signal-program>\n");
    }
}

//! Grammar configuration for SIGNAL
//!
//! A [`Grammar`] owns the character classification table and the keyword,
//! identifier and constant tables. It is configured once by the caller; after
//! that only the lexer writes to it, interning identifiers and constants as it
//! scans. A grammar has a single writer: one lexer pass at a time.

pub mod intern;
pub mod keywords;
pub mod symbol_class;

use std::collections::HashMap;

pub use intern::InternTable;
pub use keywords::Keyword;
pub use symbol_class::{SymbolClass, SymbolClassTable};

/// Integer identifying a token's kind
pub type Code = u32;

/// First code above the single-character range
pub const KEYWORD_BASE: Code = 401;
/// First code handed to an interned constant literal
pub const CONSTANT_BASE: Code = 501;
/// First code handed to an interned identifier
pub const IDENTIFIER_BASE: Code = 1001;

/// What a code denotes, decided purely by its numeric range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeKind {
    Delimiter,
    Keyword,
    Constant,
    Identifier,
}

impl CodeKind {
    pub const fn of(code: Code) -> Self {
        if code >= IDENTIFIER_BASE {
            Self::Identifier
        } else if code >= CONSTANT_BASE {
            Self::Constant
        } else if code >= KEYWORD_BASE {
            Self::Keyword
        } else {
            Self::Delimiter
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Delimiter => "delimiter",
            Self::Keyword => "keyword",
            Self::Constant => "constant",
            Self::Identifier => "identifier",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Grammar {
    symbol_classes: SymbolClassTable,
    keywords: HashMap<String, Code>,
    identifiers: InternTable,
    constants: InternTable,
}

impl Grammar {
    /// An empty grammar: every character is `Unknown` and there are no keywords
    pub fn new() -> Self {
        Self::with_symbol_classes(SymbolClassTable::new())
    }

    pub fn with_symbol_classes(symbol_classes: SymbolClassTable) -> Self {
        Self {
            symbol_classes,
            keywords: HashMap::new(),
            identifiers: InternTable::new(IDENTIFIER_BASE),
            constants: InternTable::bounded(CONSTANT_BASE, IDENTIFIER_BASE),
        }
    }

    /// The standard SIGNAL grammar
    pub fn signal() -> Self {
        let mut grammar = Self::with_symbol_classes(SymbolClassTable::signal());
        for keyword in Keyword::ALL {
            grammar.add_keyword(keyword.as_str(), keyword.default_code());
        }
        grammar
    }

    pub fn symbol_classes_mut(&mut self) -> &mut SymbolClassTable {
        &mut self.symbol_classes
    }

    /// Register a reserved word; must happen before scanning starts
    pub fn add_keyword(&mut self, name: &str, code: Code) -> &mut Self {
        self.keywords.insert(name.to_string(), code);
        self
    }

    #[inline]
    pub fn classify(&self, ch: char) -> SymbolClass {
        self.symbol_classes.classify(ch)
    }

    pub fn keyword_code(&self, name: &str) -> Option<Code> {
        self.keywords.get(name).copied()
    }

    /// Code of a built-in keyword in this grammar
    pub fn code_of(&self, keyword: Keyword) -> Code {
        self.keyword_code(keyword.as_str())
            .unwrap_or_else(|| keyword.default_code())
    }

    pub fn keyword_name(&self, code: Code) -> Option<&str> {
        self.keywords
            .iter()
            .find(|(_, &c)| c == code)
            .map(|(name, _)| name.as_str())
    }

    pub fn intern_identifier(&mut self, name: &str) -> Code {
        // Identifier codes are unbounded
        self.identifiers
            .intern(name)
            .unwrap_or(IDENTIFIER_BASE + self.identifiers.len() as Code)
    }

    /// `None` once the constant code range is exhausted
    pub fn intern_constant(&mut self, literal: &str) -> Option<Code> {
        self.constants.intern(literal)
    }

    pub fn identifiers(&self) -> &InternTable {
        &self.identifiers
    }

    pub fn constants(&self) -> &InternTable {
        &self.constants
    }

    /// Textual form of any code: a delimiter's character, a keyword's
    /// spelling, or an interned name
    pub fn text_of(&self, code: Code) -> Option<String> {
        match CodeKind::of(code) {
            CodeKind::Delimiter => char::from_u32(code).map(String::from),
            CodeKind::Keyword => self.keyword_name(code).map(str::to_string),
            CodeKind::Constant => self.constants.name_of(code).map(str::to_string),
            CodeKind::Identifier => self.identifiers.name_of(code).map(str::to_string),
        }
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::signal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_ranges() {
        assert_eq!(CodeKind::of(';' as Code), CodeKind::Delimiter);
        assert_eq!(CodeKind::of(404), CodeKind::Keyword);
        assert_eq!(CodeKind::of(501), CodeKind::Constant);
        assert_eq!(CodeKind::of(1000), CodeKind::Constant);
        assert_eq!(CodeKind::of(1001), CodeKind::Identifier);
    }

    #[test]
    fn test_signal_keywords() {
        let grammar = Grammar::signal();
        assert_eq!(grammar.keyword_code("PROGRAM"), Some(401));
        assert_eq!(grammar.keyword_code("CONST"), Some(404));
        assert_eq!(grammar.keyword_name(403), Some("END"));
        assert_eq!(grammar.code_of(Keyword::Begin), 402);
        assert_eq!(grammar.keyword_code("VAR"), None);
    }

    #[test]
    fn test_interning_is_deduplicated() {
        let mut grammar = Grammar::signal();
        let a = grammar.intern_identifier("A");
        let b = grammar.intern_identifier("B");
        assert_eq!(a, IDENTIFIER_BASE);
        assert_eq!(b, IDENTIFIER_BASE + 1);
        assert_eq!(grammar.intern_identifier("A"), a);

        let c = grammar.intern_constant("'1'");
        assert_eq!(c, Some(CONSTANT_BASE));
        assert_eq!(grammar.intern_constant("'1'"), c);
    }

    #[test]
    fn test_text_of_every_kind() {
        let mut grammar = Grammar::signal();
        let ident = grammar.intern_identifier("COUNT");
        let constant = grammar.intern_constant("'10 $EXP(3)'").unwrap();

        assert_eq!(grammar.text_of(';' as Code).as_deref(), Some(";"));
        assert_eq!(grammar.text_of(402).as_deref(), Some("BEGIN"));
        assert_eq!(grammar.text_of(ident).as_deref(), Some("COUNT"));
        assert_eq!(grammar.text_of(constant).as_deref(), Some("'10 $EXP(3)'"));
        assert_eq!(grammar.text_of(ident + 1), None);
    }

    #[test]
    fn test_custom_grammar() {
        let mut grammar = Grammar::new();
        grammar
            .symbol_classes_mut()
            .set_range(b'a', b'z', SymbolClass::Letter);
        grammar.add_keyword("begin", 450);

        assert_eq!(grammar.classify('k'), SymbolClass::Letter);
        assert_eq!(grammar.classify('K'), SymbolClass::Unknown);
        assert_eq!(grammar.keyword_code("begin"), Some(450));
    }
}

//! Core lexical analyzer
//!
//! Single left-to-right pass driven by the grammar's symbol class table.
//! Errors are recorded and scanning resumes at the next unconsumed character,
//! so one pass reports every malformed comment, constant and symbol.

use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::grammar::{CodeKind, Code, Grammar, SymbolClass};
use crate::lexical::constant::{scan_constant, skip_whitespace};
use crate::lexical::error::LexicalError;
use crate::lexical::reader::Reader;
use crate::logging::codes;
use crate::tokens::Token;
use crate::utils::Position;
use crate::{log_debug, log_error, log_success};

/// Lexical analysis metrics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub keyword_tokens: usize,
    pub identifier_tokens: usize,
    pub constant_tokens: usize,
    pub delimiter_tokens: usize,
    pub comment_count: usize,
    pub max_comment_length: usize,
    pub error_count: usize,
    pub lines_scanned: u32,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token, preferences: &LexicalPreferences) {
        self.total_tokens += 1;

        if !preferences.collect_detailed_metrics {
            return;
        }
        match token.kind() {
            CodeKind::Keyword => self.keyword_tokens += 1,
            CodeKind::Identifier => self.identifier_tokens += 1,
            CodeKind::Constant => self.constant_tokens += 1,
            CodeKind::Delimiter => self.delimiter_tokens += 1,
        }
    }

    pub(crate) fn record_comment(&mut self, length: usize) {
        self.comment_count += 1;
        self.max_comment_length = self.max_comment_length.max(length);
    }
}

/// Output of one lexer pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexemeList {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexicalError>,
}

impl LexemeList {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Rendered error lines in the order they were found
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// The program with whitespace and comments erased
    pub fn program_text(&self) -> String {
        self.tokens.iter().map(Token::display_text).collect()
    }

    pub fn codes(&self) -> Vec<Code> {
        self.tokens.iter().map(|token| token.code).collect()
    }
}

/// Lexer over one source text.
///
/// Holds write access to the grammar for its whole lifetime: identifiers and
/// constants are interned as they are scanned.
pub struct Lexer<'src, 'g> {
    reader: Reader<'src>,
    grammar: &'g mut Grammar,
    preferences: LexicalPreferences,
    metrics: LexicalMetrics,
    output: Option<LexemeList>,
}

impl<'src, 'g> Lexer<'src, 'g> {
    pub fn new(source: &'src str, grammar: &'g mut Grammar) -> Self {
        Self::with_preferences(source, grammar, LexicalPreferences::default())
    }

    pub fn with_preferences(
        source: &'src str,
        grammar: &'g mut Grammar,
        preferences: LexicalPreferences,
    ) -> Self {
        Self {
            reader: Reader::new(source, preferences.tab_width),
            grammar,
            preferences,
            metrics: LexicalMetrics::default(),
            output: None,
        }
    }

    /// Scan the whole input. Later calls return the cached result.
    pub fn scan(&mut self) -> &LexemeList {
        let list = match self.output.take() {
            Some(list) => list,
            None => self.scan_all(),
        };
        self.output.insert(list)
    }

    pub fn into_output(mut self) -> LexemeList {
        self.scan();
        self.output.unwrap_or_default()
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    pub fn grammar(&self) -> &Grammar {
        self.grammar
    }

    fn scan_all(&mut self) -> LexemeList {
        self.metrics = LexicalMetrics::default();
        let mut list = LexemeList::default();

        log_debug!("Starting lexical analysis",
            "tab_width" => self.reader.tab_width(),
            "max_identifier_length" => MAX_IDENTIFIER_LENGTH,
            "max_constant_digits" => MAX_CONSTANT_DIGITS
        );

        while let Some(ch) = self.reader.peek() {
            let start = self.reader.position();
            let result = match self.grammar.classify(ch) {
                SymbolClass::Skip => {
                    skip_whitespace(&mut self.reader, self.grammar);
                    Ok(None)
                }
                SymbolClass::CommentOpen => self.scan_comment(start).map(|_| None),
                SymbolClass::Delimiter => {
                    self.reader.advance();
                    Ok(Some(Token::delimiter(ch as Code, self.reader.span_from(start))))
                }
                SymbolClass::Letter => self.scan_word(start).map(Some),
                SymbolClass::Quote => self.scan_constant_token(start).map(Some),
                SymbolClass::Digit | SymbolClass::ExponentMarker | SymbolClass::Unknown => {
                    self.reader.advance();
                    Err(LexicalError::IllegalSymbol {
                        symbol: ch,
                        position: start,
                    })
                }
            };

            match result {
                Ok(Some(token)) => {
                    self.metrics.record_token(&token, &self.preferences);
                    list.tokens.push(token);
                }
                Ok(None) => {}
                Err(error) => {
                    self.report(&error);
                    list.errors.push(error);
                }
            }
        }

        self.metrics.error_count = list.errors.len();
        self.metrics.lines_scanned = self.reader.position().line;

        log_success!(
            codes::success::TOKENIZATION_COMPLETE,
            "Lexical analysis completed",
            "tokens" => self.metrics.total_tokens,
            "identifiers" => self.metrics.identifier_tokens,
            "constants" => self.metrics.constant_tokens,
            "comments" => self.metrics.comment_count,
            "errors" => self.metrics.error_count,
            "lines" => self.metrics.lines_scanned
        );

        list
    }

    /// `(* ... *)`; only a `*` immediately before `)` closes, the opening one
    /// included
    fn scan_comment(&mut self, start: Position) -> Result<(), LexicalError> {
        self.reader.advance();
        if !self.reader.eat('*') {
            return Err(LexicalError::UnopenedComment { position: start });
        }

        let mut length = 0usize;
        let mut after_asterisk = true;
        loop {
            let Some(ch) = self.reader.advance() else {
                return Err(LexicalError::UnclosedComment { position: start });
            };
            if after_asterisk && ch == ')' {
                break;
            }
            after_asterisk = ch == '*';
            length += 1;
        }

        // The body excludes the closing asterisk
        let length = length.saturating_sub(1);
        self.metrics.record_comment(length);
        if length > MAX_COMMENT_LENGTH {
            return Err(LexicalError::CommentTooLong {
                length,
                position: start,
            });
        }
        Ok(())
    }

    fn scan_word(&mut self, start: Position) -> Result<Token, LexicalError> {
        let grammar = &*self.grammar;
        let word = self.reader.advance_while(|c| {
            matches!(grammar.classify(c), SymbolClass::Letter | SymbolClass::Digit)
        });
        let span = self.reader.span_from(start);

        let length = word.chars().count();
        if length > MAX_IDENTIFIER_LENGTH {
            return Err(LexicalError::IdentifierTooLong {
                length,
                position: start,
            });
        }

        let code = match self.grammar.keyword_code(word) {
            Some(code) => code,
            None => self.grammar.intern_identifier(word),
        };
        Ok(Token::word(code, span, word))
    }

    fn scan_constant_token(&mut self, start: Position) -> Result<Token, LexicalError> {
        let value = scan_constant(&mut self.reader, self.grammar)?;
        let code = self
            .grammar
            .intern_constant(&value.literal())
            .ok_or(LexicalError::TooManyConstants { position: start })?;
        Ok(Token::constant(code, self.reader.span_from(start), value))
    }

    fn report(&self, error: &LexicalError) {
        let message = error.to_string();
        if self.preferences.include_position_in_errors {
            let position = error.position();
            log_error!(error.error_code(), &message,
                span = error.span(),
                "line" => position.line,
                "column" => position.column
            );
        } else {
            log_error!(error.error_code(), &message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{CONSTANT_BASE, IDENTIFIER_BASE};
    use crate::tokens::ComplexConstant;
    use assert_matches::assert_matches;

    fn lex(source: &str) -> (LexemeList, Grammar) {
        let mut grammar = Grammar::signal();
        let list = Lexer::new(source, &mut grammar).into_output();
        (list, grammar)
    }

    fn columns(list: &LexemeList) -> Vec<(u32, u32)> {
        list.tokens
            .iter()
            .map(|t| (t.position().line, t.position().column))
            .collect()
    }

    #[test]
    fn test_whitespace_invariance() {
        let (tight, _) = lex("PROGRAM X; BEGIN END.");
        let (loose, _) = lex("  PROGRAM\t\tX  ;\r\n\n BEGIN \t END   .\n");

        assert!(tight.errors.is_empty());
        assert!(loose.errors.is_empty());
        assert_eq!(tight.codes(), loose.codes());
        assert_eq!(tight.program_text(), loose.program_text());
        assert_eq!(tight.program_text(), "PROGRAMX;BEGINEND.");
    }

    #[test]
    fn test_positions_follow_tab_and_newline_rules() {
        let (list, _) = lex("PROGRAM\tX;\n  BEGIN");
        assert_eq!(columns(&list), vec![(1, 1), (1, 12), (1, 13), (2, 3)]);
    }

    #[test]
    fn test_configured_tab_width() {
        let mut grammar = Grammar::signal();
        let preferences = LexicalPreferences {
            tab_width: 8,
            ..LexicalPreferences::default()
        };
        let list = Lexer::with_preferences("\tA", &mut grammar, preferences).into_output();
        assert_eq!(columns(&list), vec![(1, 9)]);
    }

    #[test]
    fn test_comment_erasure() {
        let (with_comment, _) = lex("BEGIN (* anything ; 'x' *) END");
        let (without, _) = lex("BEGIN END");

        assert!(with_comment.errors.is_empty());
        assert_eq!(with_comment.codes(), without.codes());
    }

    #[test]
    fn test_comment_close_needs_adjacent_asterisk() {
        let (list, _) = lex("(**)A(* * ) **)B");
        assert!(list.errors.is_empty());
        assert_eq!(list.program_text(), "AB");
    }

    #[test]
    fn test_unclosed_comment() {
        let (list, _) = lex("BEGIN (* never closed END");
        assert_eq!(list.tokens.len(), 1);
        assert_eq!(list.errors.len(), 1);
        assert_matches!(
            list.errors[0],
            LexicalError::UnclosedComment { position } if position.column == 7
        );
    }

    #[test]
    fn test_opening_asterisk_closes_comment() {
        let (list, _) = lex("(*)A");
        assert!(list.errors.is_empty());
        assert_eq!(list.program_text(), "A");

        let (list, _) = lex("(*");
        assert_matches!(list.errors.as_slice(), [LexicalError::UnclosedComment { .. }]);
    }

    #[test]
    fn test_unopened_comment_resumes_after_parenthesis() {
        let (list, _) = lex("(A");
        assert_matches!(list.errors.as_slice(), [LexicalError::UnopenedComment { .. }]);
        assert_eq!(list.program_text(), "A");
    }

    #[test]
    fn test_keywords_and_identifier_interning() {
        let (list, grammar) =
            lex("PROGRAM        BEGIN   END    CONST PROGRAM1    A ENB   A  PROGRAM1");

        assert!(list.errors.is_empty());
        assert_eq!(
            list.codes(),
            vec![401, 402, 403, 404, 1001, 1002, 1003, 1002, 1001]
        );
        assert_eq!(grammar.identifiers().len(), 3);
        assert_eq!(grammar.text_of(IDENTIFIER_BASE).as_deref(), Some("PROGRAM1"));
    }

    #[test]
    fn test_constants_are_interned_by_canonical_text() {
        let (list, grammar) = lex("'   10    20  '   '   10    $EXP(  20 )  ' '10 20'");

        assert!(list.errors.is_empty());
        assert_eq!(list.codes(), vec![501, 502, 501]);
        assert_eq!(list.program_text(), "'10 20''10 $EXP(20)''10 20'");
        assert_eq!(grammar.constants().len(), 2);
        assert_eq!(
            list.tokens[1].constant,
            Some(ComplexConstant::with_exponent(10, 20))
        );
        assert_eq!(grammar.text_of(CONSTANT_BASE).as_deref(), Some("'10 20'"));
    }

    #[test]
    fn test_delimiters_use_character_codes() {
        let (list, _) = lex(";=.");
        assert_eq!(list.codes(), vec![59, 61, 46]);
        assert!(list.tokens.iter().all(|t| t.text.is_none()));
    }

    #[test]
    fn test_illegal_symbols() {
        let (list, _) = lex("VAL_1 1X $ #");
        assert_eq!(list.errors.len(), 5);
        assert_matches!(list.errors[0], LexicalError::IllegalSymbol { symbol: '_', .. });
        // A digit cannot start a token
        assert_matches!(list.errors[1], LexicalError::IllegalSymbol { symbol: '1', .. });
        assert_matches!(list.errors[3], LexicalError::IllegalSymbol { symbol: '$', .. });
        assert_eq!(list.program_text(), "VALX");
        assert_eq!(
            list.messages()[4],
            "Lexer error (line 1, column 12): Illegal symbol '#';"
        );
    }

    #[test]
    fn test_error_recovery_counts_every_error() {
        let source = "
            PROGRAM TEST1;
            CONST
                VAL_1 = '100'
                VAL2 = '4'
                1EMPTY = ''
                COMPLEX1 = '10 10'
                COMPLEX2 = '10 $EXP(3'
            BEGIN
                (*
            END
        ";
        let (list, _) = lex(source);
        // '_' and '1' in VAL_1, '1' in 1EMPTY, then the constant and comment errors
        assert_eq!(list.errors.len(), 6);
        assert_matches!(list.errors[3], LexicalError::UnclosedExponent { .. });
        assert_matches!(list.errors[4], LexicalError::WrongLeftPart { .. });
        assert_matches!(list.errors[5], LexicalError::UnclosedComment { .. });
    }

    #[test]
    fn test_identifier_too_long() {
        let name = "A".repeat(MAX_IDENTIFIER_LENGTH + 1);
        let (list, grammar) = lex(&format!("{} B", name));
        assert_matches!(list.errors.as_slice(), [LexicalError::IdentifierTooLong { .. }]);
        assert_eq!(list.program_text(), "B");
        assert_eq!(grammar.identifiers().len(), 1);
    }

    #[test]
    fn test_scan_is_idempotent() {
        let mut grammar = Grammar::signal();
        let mut lexer = Lexer::new("PROGRAM A; '1' #", &mut grammar);

        let first = lexer.scan().clone();
        let second = lexer.scan().clone();
        assert_eq!(first, second);
        assert_eq!(lexer.metrics().total_tokens, 4);
        assert_eq!(lexer.metrics().error_count, 1);
        assert_eq!(lexer.grammar().identifiers().len(), 1);
    }

    #[test]
    fn test_metrics() {
        let mut grammar = Grammar::signal();
        let mut lexer = Lexer::new("PROGRAM A;\nCONST B = '1'; (* c *)", &mut grammar);
        lexer.scan();

        let metrics = lexer.metrics();
        assert_eq!(metrics.keyword_tokens, 2);
        assert_eq!(metrics.identifier_tokens, 2);
        assert_eq!(metrics.constant_tokens, 1);
        assert_eq!(metrics.delimiter_tokens, 3);
        assert_eq!(metrics.comment_count, 1);
        assert_eq!(metrics.lines_scanned, 2);
    }

    #[test]
    fn test_empty_input() {
        let (list, _) = lex("");
        assert!(list.tokens.is_empty());
        assert!(list.errors.is_empty());
    }
}

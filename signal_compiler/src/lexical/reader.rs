//! Character cursor with line/column tracking
use crate::utils::{Position, Span};

/// Forward-only cursor over source text.
///
/// Newlines move to column 1 of the next line and tabs advance the column by
/// `tab_width`; every other character advances it by one.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    source: &'a str,
    position: Position,
    tab_width: u32,
}

impl<'a> Reader<'a> {
    pub fn new(source: &'a str, tab_width: u32) -> Self {
        Self {
            source,
            position: Position::start(),
            tab_width: tab_width.max(1),
        }
    }

    /// Next character without consuming it
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consume and return the next character
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position = self.position.advance(ch, self.tab_width);
        Some(ch)
    }

    /// Consume the next character if it equals `expected`
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume characters while `predicate` holds, returning the consumed text
    pub fn advance_while<F>(&mut self, mut predicate: F) -> &'a str
    where
        F: FnMut(char) -> bool,
    {
        let start = self.position.offset;
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.advance();
        }
        &self.source[start..self.position.offset]
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Span from `start` up to the current position
    pub fn span_from(&self, start: Position) -> Span {
        Span::new(start, self.position)
    }

    pub fn is_at_end(&self) -> bool {
        self.position.offset >= self.source.len()
    }

    pub fn tab_width(&self) -> u32 {
        self.tab_width
    }

    fn rest(&self) -> &'a str {
        self.source.get(self.position.offset..).unwrap_or("")
    }
}

//! Source location tracking for the SIGNAL compiler
//!
//! Positions are copied into every token and error so diagnostics can point
//! at the exact line and column, with tabs expanded by a fixed width.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text with line, column, and byte offset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Byte offset from start of input (0-based)
    pub offset: usize,
    /// Line number (1-based)
    pub line: u32,
    /// Column number (1-based)
    pub column: u32,
}

impl Position {
    /// Create a new position
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Create the starting position (offset 0, line 1, column 1)
    pub fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Advance position past one character.
    ///
    /// A newline moves to column 1 of the next line, a tab moves the column
    /// forward by `tab_width`, anything else moves it by one.
    pub fn advance(self, ch: char, tab_width: u32) -> Self {
        match ch {
            '\n' => Self {
                offset: self.offset + 1,
                line: self.line + 1,
                column: 1,
            },
            '\t' => Self {
                offset: self.offset + 1,
                line: self.line,
                column: self.column + tab_width,
            },
            _ => Self {
                offset: self.offset + ch.len_utf8(),
                line: self.line,
                column: self.column + 1,
            },
        }
    }

    /// Advance position by a string
    pub fn advance_str(self, s: &str, tab_width: u32) -> Self {
        s.chars().fold(self, |pos, ch| pos.advance(ch, tab_width))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}; {}]", self.line, self.column)
    }
}

/// A span of source text from start to end position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl Span {
    /// Create a new span
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(
            start.offset <= end.offset,
            "Span start must not be after end"
        );
        Self { start, end }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// Span covering `ch`, which starts at `pos`
    pub fn single(pos: Position, ch: char) -> Self {
        let end = Position {
            offset: pos.offset + ch.len_utf8(),
            line: pos.line,
            column: pos.column + 1,
        };
        Self { start: pos, end }
    }

    /// Empty span marking a position
    pub fn at(pos: Position) -> Self {
        Self { start: pos, end: pos }
    }

    /// Get the byte length of this span
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_advance_plain_character() {
        let pos = Position::start().advance('a', 4);
        assert_eq!(pos, Position::new(1, 1, 2));
    }

    #[test]
    fn test_position_advance_newline_resets_column() {
        let pos = Position::start().advance_str("ab\n", 4);
        assert_eq!(pos.line, 2);
        assert_eq!(pos.column, 1);
        assert_eq!(pos.offset, 3);
    }

    #[test]
    fn test_position_advance_tab_uses_fixed_width() {
        let pos = Position::start().advance('\t', 4);
        assert_eq!(pos.column, 5);

        let pos = Position::start().advance_str("a\t", 4);
        assert_eq!(pos.column, 6);

        let pos = Position::start().advance('\t', 8);
        assert_eq!(pos.column, 9);
    }

    #[test]
    fn test_position_advance_multibyte_offset() {
        let pos = Position::start().advance('€', 4);
        assert_eq!(pos.offset, 3);
        assert_eq!(pos.column, 2);
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(0, 3, 7).to_string(), "[3; 7]");
    }

    #[test]
    fn test_span_single() {
        let span = Span::single(Position::new(4, 2, 3), ';');
        assert_eq!(span.len(), 1);
        assert_eq!(span.end().column, 4);
    }

    #[test]
    fn test_span_single_multibyte_ends_on_char_boundary() {
        let source = "A é";
        let span = Span::single(Position::new(2, 1, 3), 'é');
        assert_eq!(span.len(), 2);
        assert!(source.is_char_boundary(span.end().offset));
        assert_eq!(span.end().column, 4);
    }

    #[test]
    fn test_span_at_is_empty() {
        let span = Span::at(Position::new(7, 1, 8));
        assert!(span.is_empty());
        assert_eq!(span.start(), span.end());
    }
}

//! Character classification table driving lexer dispatch

use serde::{Deserialize, Serialize};

/// Number of character codes the table covers (codes 0..=254)
pub const TABLE_SIZE: usize = 255;

/// Class of one input character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SymbolClass {
    /// Whitespace and control characters
    Skip,
    Digit,
    Letter,
    /// Single-character tokens
    Delimiter,
    /// `(`, which must be followed by `*`
    CommentOpen,
    /// `$`, only meaningful inside a constant's right part
    ExponentMarker,
    Quote,
    #[default]
    Unknown,
}

/// Fixed-size table mapping a character code to its class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolClassTable {
    classes: [SymbolClass; TABLE_SIZE],
}

impl SymbolClassTable {
    /// A table where every code is `Unknown`
    pub const fn new() -> Self {
        Self {
            classes: [SymbolClass::Unknown; TABLE_SIZE],
        }
    }

    /// The standard SIGNAL classification
    pub const fn signal() -> Self {
        let mut classes = [SymbolClass::Unknown; TABLE_SIZE];
        let mut i = 0;
        while i < TABLE_SIZE {
            let b = i as u8;
            classes[i] = match b {
                b'A'..=b'Z' | b'a'..=b'z' => SymbolClass::Letter,
                b'0'..=b'9' => SymbolClass::Digit,
                9..=13 | b' ' => SymbolClass::Skip,
                b';' | b'=' | b'.' => SymbolClass::Delimiter,
                b'(' => SymbolClass::CommentOpen,
                b'$' => SymbolClass::ExponentMarker,
                b'\'' => SymbolClass::Quote,
                _ => SymbolClass::Unknown,
            };
            i += 1;
        }
        Self { classes }
    }

    /// Classify a character; anything outside the table is `Unknown`
    #[inline]
    pub fn classify(&self, ch: char) -> SymbolClass {
        let code = ch as u32 as usize;
        if code < TABLE_SIZE {
            self.classes[code]
        } else {
            SymbolClass::Unknown
        }
    }

    /// Assign a class to one character code
    pub fn set(&mut self, code: u8, class: SymbolClass) -> &mut Self {
        if let Some(slot) = self.classes.get_mut(code as usize) {
            *slot = class;
        }
        self
    }

    /// Assign a class to every code in an inclusive range
    pub fn set_range(&mut self, from: u8, to: u8, class: SymbolClass) -> &mut Self {
        for code in from..=to {
            self.set(code, class);
        }
        self
    }
}

impl Default for SymbolClassTable {
    fn default() -> Self {
        Self::new()
    }
}

//! Complex constant literal scanning
//!
//! ```text
//! constant   := "'" ws* left ws* [ right ws* ] "'"
//! left       := digit*
//! right      := digit+ | "$EXP" "(" ws* digit+ ws* ")"
//! ```

use crate::config::compile_time::lexical::MAX_CONSTANT_DIGITS;
use crate::grammar::{Grammar, SymbolClass};
use crate::lexical::error::LexicalError;
use crate::lexical::reader::Reader;
use crate::tokens::{ComplexConstant, RightPart};
use crate::utils::Position;

const EXPONENT_WORD: &str = "$EXP";

/// Scan a constant literal; the reader must sit on the opening quote.
///
/// On failure the reader is left at the offending character so scanning can
/// resume from there.
pub(crate) fn scan_constant(
    reader: &mut Reader<'_>,
    grammar: &Grammar,
) -> Result<ComplexConstant, LexicalError> {
    reader.advance();
    skip_whitespace(reader, grammar);

    let left_start = reader.position();
    let left = reader.advance_while(|c| grammar.classify(c) == SymbolClass::Digit);
    expect_part_end(reader, grammar, |position| LexicalError::WrongLeftPart { position })?;

    let mantissa = if left.is_empty() {
        0
    } else {
        parse_digits(left, left_start)?
    };

    skip_whitespace(reader, grammar);
    let right = if is_quote(reader.peek(), grammar) {
        None
    } else {
        Some(scan_right_part(reader, grammar)?)
    };

    skip_whitespace(reader, grammar);
    if !is_quote(reader.peek(), grammar) {
        return Err(LexicalError::UnclosedConstant {
            position: reader.position(),
        });
    }
    reader.advance();

    Ok(ComplexConstant { mantissa, right })
}

fn scan_right_part(
    reader: &mut Reader<'_>,
    grammar: &Grammar,
) -> Result<RightPart, LexicalError> {
    let start = reader.position();

    if reader
        .peek()
        .is_some_and(|c| grammar.classify(c) == SymbolClass::Digit)
    {
        let digits = reader.advance_while(|c| grammar.classify(c) == SymbolClass::Digit);
        expect_part_end(reader, grammar, |position| LexicalError::WrongRightPart { position })?;
        return Ok(RightPart::Field(parse_digits(digits, start)?));
    }

    let word = reader.advance_while(|c| {
        c != '(' && !matches!(grammar.classify(c), SymbolClass::Skip | SymbolClass::Quote)
    });
    if word != EXPONENT_WORD {
        return Err(LexicalError::UnknownWord {
            word: word.to_string(),
            position: start,
        });
    }
    if !reader.eat('(') {
        return Err(LexicalError::WrongRightPart {
            position: reader.position(),
        });
    }

    skip_whitespace(reader, grammar);
    let digits_start = reader.position();
    let digits = reader.advance_while(|c| grammar.classify(c) == SymbolClass::Digit);
    if digits.is_empty() {
        return Err(LexicalError::WrongRightPart {
            position: digits_start,
        });
    }

    skip_whitespace(reader, grammar);
    if !reader.eat(')') {
        return Err(LexicalError::UnclosedExponent {
            position: reader.position(),
        });
    }

    let exponent = digits
        .parse::<u32>()
        .map_err(|_| LexicalError::ConstantOutOfRange {
            digits: digits.to_string(),
            position: digits_start,
        })?;
    Ok(RightPart::Exponent(exponent))
}

/// A digit run must be followed by whitespace or the closing quote
fn expect_part_end<F>(reader: &Reader<'_>, grammar: &Grammar, wrong: F) -> Result<(), LexicalError>
where
    F: FnOnce(Position) -> LexicalError,
{
    match reader.peek() {
        None => Err(LexicalError::UnclosedConstant {
            position: reader.position(),
        }),
        Some(c) if matches!(grammar.classify(c), SymbolClass::Skip | SymbolClass::Quote) => Ok(()),
        Some(_) => Err(wrong(reader.position())),
    }
}

fn parse_digits(digits: &str, position: Position) -> Result<u64, LexicalError> {
    if digits.len() > MAX_CONSTANT_DIGITS {
        return Err(LexicalError::ConstantOutOfRange {
            digits: digits.to_string(),
            position,
        });
    }
    digits
        .parse::<u64>()
        .map_err(|_| LexicalError::ConstantOutOfRange {
            digits: digits.to_string(),
            position,
        })
}

fn is_quote(ch: Option<char>, grammar: &Grammar) -> bool {
    ch.is_some_and(|c| grammar.classify(c) == SymbolClass::Quote)
}

/// Consume a run of `Skip` characters
pub(crate) fn skip_whitespace(reader: &mut Reader<'_>, grammar: &Grammar) -> usize {
    reader
        .advance_while(|c| grammar.classify(c) == SymbolClass::Skip)
        .len()
}

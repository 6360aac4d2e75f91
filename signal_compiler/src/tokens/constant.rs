//! Complex constant values carried by constant tokens

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bytes one stack slot occupies
pub const SLOT_SIZE: u64 = 8;

/// Optional second part of a constant literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RightPart {
    /// A second independent digit run: `'10 20'`
    Field(u64),
    /// A power of ten: `'10 $EXP(3)'`
    Exponent(u32),
}

/// A scanned constant literal: `'<digits>'`, `'<digits> <digits>'` or
/// `'<digits> $EXP(<digits>)'`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ComplexConstant {
    pub mantissa: u64,
    pub right: Option<RightPart>,
}

impl ComplexConstant {
    pub fn simple(mantissa: u64) -> Self {
        Self {
            mantissa,
            right: None,
        }
    }

    pub fn two_field(left: u64, right: u64) -> Self {
        Self {
            mantissa: left,
            right: Some(RightPart::Field(right)),
        }
    }

    pub fn with_exponent(mantissa: u64, exponent: u32) -> Self {
        Self {
            mantissa,
            right: Some(RightPart::Exponent(exponent)),
        }
    }

    /// Whether the literal occupies two independent slots
    pub fn is_two_field(&self) -> bool {
        matches!(self.right, Some(RightPart::Field(_)))
    }

    /// Combined value of a single-slot constant.
    ///
    /// The exponent form is evaluated in floating point and truncated; values
    /// beyond `u64::MAX` saturate. For two-field constants this is the left field.
    pub fn value(&self) -> u64 {
        match self.right {
            Some(RightPart::Exponent(exp)) => {
                let power = i32::try_from(exp).unwrap_or(i32::MAX);
                (self.mantissa as f64 * 10f64.powi(power)) as u64
            }
            _ => self.mantissa,
        }
    }

    /// The (left, right) slot values of a two-field constant
    pub fn fields(&self) -> Option<(u64, u64)> {
        match self.right {
            Some(RightPart::Field(right)) => Some((self.mantissa, right)),
            _ => None,
        }
    }

    pub fn size_in_bytes(&self) -> u64 {
        if self.is_two_field() {
            2 * SLOT_SIZE
        } else {
            SLOT_SIZE
        }
    }

    /// Canonical quoted form used as the interning key
    pub fn literal(&self) -> String {
        format!("'{}'", self)
    }
}

impl fmt::Display for ComplexConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.right {
            None => write!(f, "{}", self.mantissa),
            Some(RightPart::Field(right)) => write!(f, "{} {}", self.mantissa, right),
            Some(RightPart::Exponent(exp)) => write!(f, "{} $EXP({})", self.mantissa, exp),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponent_value_and_literal() {
        let constant = ComplexConstant::with_exponent(10, 3);
        assert_eq!(constant.value(), 10_000);
        assert_eq!(constant.literal(), "'10 $EXP(3)'");
        assert_eq!(constant.size_in_bytes(), 8);
    }

    #[test]
    fn test_two_field_constant() {
        let constant = ComplexConstant::two_field(10, 10);
        assert!(constant.is_two_field());
        assert_eq!(constant.fields(), Some((10, 10)));
        assert_eq!(constant.size_in_bytes(), 16);
        assert_eq!(constant.literal(), "'10 10'");
    }

    #[test]
    fn test_simple_constant() {
        let constant = ComplexConstant::simple(100);
        assert_eq!(constant.value(), 100);
        assert_eq!(constant.fields(), None);
        assert_eq!(constant.literal(), "'100'");
    }

    #[test]
    fn test_huge_exponent_saturates() {
        let constant = ComplexConstant::with_exponent(5, 400);
        assert_eq!(constant.value(), u64::MAX);
    }
}

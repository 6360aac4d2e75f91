//! Reserved words of the SIGNAL language
use serde::{Deserialize, Serialize};

use super::Code;

/// Keywords the parser drives its rules from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    Program,
    Begin,
    End,
    Const,
}

impl Keyword {
    pub const ALL: [Keyword; 4] = [Self::Program, Self::Begin, Self::End, Self::Const];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Program => "PROGRAM",
            Self::Begin => "BEGIN",
            Self::End => "END",
            Self::Const => "CONST",
        }
    }

    /// Code assigned by the standard SIGNAL grammar
    pub const fn default_code(self) -> Code {
        match self {
            Self::Program => 401,
            Self::Begin => 402,
            Self::End => 403,
            Self::Const => 404,
        }
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_names_are_upper_case() {
        for keyword in Keyword::ALL {
            assert_eq!(keyword.as_str(), keyword.as_str().to_uppercase());
            assert_eq!(keyword.to_string(), keyword.as_str());
        }
    }

    #[test]
    fn test_default_codes_sit_between_ascii_and_constants() {
        for keyword in Keyword::ALL {
            let code = keyword.default_code();
            assert!(code > 255 && code < super::super::CONSTANT_BASE);
        }
    }
}

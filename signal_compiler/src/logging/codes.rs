//! Diagnostic codes and the metadata registry behind them
//!
//! Every error the compiler reports carries a [`Code`]; the registry maps it
//! to a category, severity and recovery policy.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Error or success code such as `E020` or `I040`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Registry entry for one code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

/// The stage records the diagnostic and keeps going
const fn recoverable(
    code: &'static str,
    category: &'static str,
    severity: Severity,
    description: &'static str,
    recommended_action: &'static str,
) -> ErrorMetadata {
    ErrorMetadata {
        code,
        category,
        severity,
        recoverable: true,
        requires_halt: false,
        description,
        recommended_action,
    }
}

/// The diagnostic ends the compilation
const fn fatal(
    code: &'static str,
    category: &'static str,
    severity: Severity,
    description: &'static str,
    recommended_action: &'static str,
) -> ErrorMetadata {
    ErrorMetadata {
        recoverable: false,
        requires_halt: true,
        ..recoverable(code, category, severity, description, recommended_action)
    }
}

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const CONFIGURATION_ERROR: Code = Code::new("ERR003");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const EMPTY_FILE: Code = Code::new("E008");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
}

/// Lexical analysis error codes
pub mod lexical {
    use super::Code;

    pub const ILLEGAL_SYMBOL: Code = Code::new("E020");
    pub const UNOPENED_COMMENT: Code = Code::new("E021");
    pub const UNCLOSED_COMMENT: Code = Code::new("E022");
    pub const WRONG_LEFT_PART: Code = Code::new("E023");
    pub const UNKNOWN_CONSTANT_WORD: Code = Code::new("E024");
    pub const WRONG_RIGHT_PART: Code = Code::new("E025");
    pub const UNCLOSED_EXPONENT: Code = Code::new("E026");
    pub const UNCLOSED_CONSTANT: Code = Code::new("E027");
    pub const CONSTANT_OUT_OF_RANGE: Code = Code::new("E028");
    pub const IDENTIFIER_TOO_LONG: Code = Code::new("E029");
    pub const COMMENT_TOO_LONG: Code = Code::new("E030");
}

/// Syntax analysis error codes
pub mod syntax {
    use super::Code;

    pub const PREMATURE_END: Code = Code::new("E040");
    pub const TRAILING_TOKENS: Code = Code::new("E041");
    pub const TOO_MANY_DECLARATIONS: Code = Code::new("E042");
    pub const MISSING_KEYWORD: Code = Code::new("E043");
    pub const UNEXPECTED_TOKEN: Code = Code::new("E050");
    pub const MAX_RECURSION_DEPTH: Code = Code::new("E087");
}

/// Code generation error codes
pub mod codegen {
    use super::Code;

    pub const DUPLICATE_CONSTANT: Code = Code::new("E090");
    pub const FRAME_SIZE_EXCEEDED: Code = Code::new("E091");
    pub const INCOMPLETE_TREE: Code = Code::new("E092");
}

/// Stage-completion codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const PARSE_COMPLETE: Code = Code::new("I040");
    pub const CODE_GENERATION_COMPLETE: Code = Code::new("I090");
    pub const COMPILATION_COMPLETE: Code = Code::new("I100");
}

use Severity::{Critical, High, Low, Medium};

#[rustfmt::skip]
const ENTRIES: &[ErrorMetadata] = &[
    // System errors
    fatal("ERR001", "System", Critical, "Critical internal compiler error", "File a bug report with the input that triggered it"),
    fatal("ERR002", "System", Critical, "Logging or configuration initialization failure", "Check runtime configuration and environment variables"),
    fatal("ERR003", "System", High, "Runtime configuration could not be loaded", "Fix the TOML syntax or value types in the configuration file"),

    // File processing errors
    fatal("E005", "FileProcessing", High, "Source file not found", "Verify the path to the SIGNAL source file"),
    fatal("E006", "FileProcessing", Medium, "Source file does not have the .sig extension", "Rename the file or disable SIGNAL_REQUIRE_SIG_EXTENSION"),
    fatal("E007", "FileProcessing", High, "Source file exceeds the configured size or line limit", "Split the program or raise the limit in the build profile"),
    fatal("E008", "FileProcessing", Medium, "Source file is empty", "Provide a program beginning with PROGRAM"),
    fatal("E009", "FileProcessing", High, "Permission denied while reading the source file", "Check file permissions"),
    fatal("E010", "FileProcessing", High, "Source file is not valid UTF-8", "Re-encode the file as UTF-8"),
    fatal("E011", "FileProcessing", High, "I/O error while reading the source file", "Retry the operation or check the storage device"),
    fatal("E012", "FileProcessing", High, "Invalid source path", "Pass a path to a regular file"),

    // Lexical errors
    recoverable("E020", "Lexical", Medium, "Character that belongs to no symbol class", "Remove the character or place it inside a comment"),
    recoverable("E021", "Lexical", Medium, "'(' not followed by '*'", "Open comments with '(*'"),
    recoverable("E022", "Lexical", Medium, "Comment reaches end of input without '*)'", "Close the comment with '*)'"),
    recoverable("E023", "Lexical", Medium, "Constant left part contains a non-digit character", "Use only digits before the optional right part"),
    recoverable("E024", "Lexical", Medium, "Unknown word in constant right part", "Use a digit run or $EXP(<digits>) as the right part"),
    recoverable("E025", "Lexical", Medium, "Malformed constant right part", "Use a digit run or $EXP(<digits>) as the right part"),
    recoverable("E026", "Lexical", Medium, "Exponent body not closed with ')'", "Close the exponent with ')'"),
    recoverable("E027", "Lexical", Medium, "Constant not closed with a quote", "Terminate the constant with '"),
    recoverable("E028", "Lexical", Medium, "Constant digits do not fit in 64 bits", "Use a smaller value or the $EXP form"),
    recoverable("E029", "Lexical", Medium, "Identifier exceeds the configured maximum length", "Shorten the identifier"),
    recoverable("E030", "Lexical", Low, "Comment exceeds the configured maximum length", "Shorten the comment"),

    // Syntax errors
    fatal("E040", "Syntax", High, "Token stream ended while a rule expected more input", "Complete the program through the final '.'"),
    fatal("E041", "Syntax", High, "Tokens follow the terminating '.'", "Remove everything after 'END.'"),
    fatal("E042", "Syntax", High, "Constant declaration list exceeds the maximum length", "Split the program or raise max_declarations"),
    fatal("E043", "Syntax", Critical, "Grammar is missing a keyword the parser requires", "Register PROGRAM, BEGIN, END and CONST in the grammar"),
    fatal("E050", "Syntax", High, "Token does not match the grammar rule being parsed", "Check the program against the SIGNAL grammar"),
    fatal("E087", "Syntax", Critical, "Rule nesting exceeds the maximum parse depth", "Simplify the program or raise max_parse_depth"),

    // Code generation errors
    recoverable("E090", "CodeGeneration", Medium, "Constant name declared more than once", "Rename or remove the repeated declaration"),
    recoverable("E091", "CodeGeneration", Medium, "Stack frame grows beyond the configured maximum", "Declare fewer constants or raise max_frame_size"),
    fatal("E092", "CodeGeneration", Critical, "Syntax tree is missing nodes the generator requires", "Only generate code for trees from error-free parses"),

    // Success codes
    recoverable("I004", "Success", Low, "System initialization completed", "No action required"),
    recoverable("I006", "Success", Low, "Source file loaded", "No action required"),
    recoverable("I020", "Success", Low, "Lexical analysis completed", "No action required"),
    recoverable("I040", "Success", Low, "Parsing completed", "No action required"),
    recoverable("I090", "Success", Low, "Code generation completed", "No action required"),
    recoverable("I100", "Success", Low, "Compilation pipeline completed", "No action required"),
];

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, &'static ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, &'static ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| ENTRIES.iter().map(|entry| (entry.code, entry)).collect())
}

pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code).copied()
}

/// Unregistered codes count as medium severity
pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code).map_or(Severity::Medium, |metadata| metadata.severity)
}

pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code).map_or(true, |metadata| metadata.recoverable)
}

pub fn requires_halt(code: &str) -> bool {
    get_error_metadata(code).is_some_and(|metadata| metadata.requires_halt)
}

pub fn get_category(code: &str) -> &'static str {
    get_error_metadata(code).map_or("Unknown", |metadata| metadata.category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_lexical_code_is_recoverable() {
        let codes = [
            lexical::ILLEGAL_SYMBOL,
            lexical::UNOPENED_COMMENT,
            lexical::UNCLOSED_COMMENT,
            lexical::WRONG_LEFT_PART,
            lexical::UNKNOWN_CONSTANT_WORD,
            lexical::WRONG_RIGHT_PART,
            lexical::UNCLOSED_EXPONENT,
            lexical::UNCLOSED_CONSTANT,
            lexical::CONSTANT_OUT_OF_RANGE,
            lexical::IDENTIFIER_TOO_LONG,
            lexical::COMMENT_TOO_LONG,
        ];

        for code in codes {
            assert!(get_error_metadata(code.as_str()).is_some(), "{}", code);
            assert!(is_recoverable(code.as_str()), "{}", code);
            assert_eq!(get_category(code.as_str()), "Lexical");
        }
    }

    #[test]
    fn test_syntax_codes_halt() {
        for code in [
            syntax::PREMATURE_END,
            syntax::TRAILING_TOKENS,
            syntax::UNEXPECTED_TOKEN,
        ] {
            assert!(requires_halt(code.as_str()));
            assert!(!is_recoverable(code.as_str()));
        }
    }

    #[test]
    fn test_duplicate_constant_metadata() {
        let code = codegen::DUPLICATE_CONSTANT;
        assert_eq!(code.as_str(), "E090");
        assert_eq!(get_category(code.as_str()), "CodeGeneration");
        assert_eq!(get_severity(code.as_str()), Severity::Medium);
        assert!(is_recoverable(code.as_str()));
    }

    #[test]
    fn test_registry_has_one_entry_per_code() {
        assert_eq!(get_error_registry().len(), ENTRIES.len());
        let metadata = get_error_metadata(syntax::TOO_MANY_DECLARATIONS.as_str()).unwrap();
        assert!(metadata.requires_halt);
        assert_eq!(metadata.severity, Severity::High);
    }

    #[test]
    fn test_unknown_code_fallbacks() {
        assert!(get_error_metadata("Z999").is_none());
        assert_eq!(get_category("Z999"), "Unknown");
        assert_eq!(get_severity("Z999"), Severity::Medium);
        assert!(is_recoverable("Z999"));
        assert!(!requires_halt("Z999"));
    }
}

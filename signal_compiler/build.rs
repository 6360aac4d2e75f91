// build.rs - TOML-driven compile-time limit generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    file_processing: FileProcessingLimits,
    lexical: LexicalLimits,
    syntax: SyntaxLimits,
    codegen: CodegenLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct FileProcessingLimits {
    max_file_size: u64,
    max_line_count: usize,
}

#[derive(serde::Deserialize)]
struct LexicalLimits {
    max_identifier_length: usize,
    max_constant_digits: usize,
    max_comment_length: usize,
}

#[derive(serde::Deserialize)]
struct SyntaxLimits {
    max_parse_depth: usize,
    max_declarations: usize,
}

#[derive(serde::Deserialize)]
struct CodegenLimits {
    max_frame_size: u64,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_message_length: usize,
    security_min_log_level: u8,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=SIGNAL_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=SIGNAL_CONFIG_DIR");

    let profile = env::var("SIGNAL_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("SIGNAL_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Configuration lives at the workspace root (parent of signal_compiler)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_FILE_SIZE: u64 = 1_000_000_000;
    const ABSOLUTE_MAX_PARSE_DEPTH: usize = 100_000;
    const ABSOLUTE_MAX_DECLARATIONS: usize = 10_000;

    if config.file_processing.max_file_size > ABSOLUTE_MAX_FILE_SIZE {
        panic!("LIMITS: max_file_size exceeds absolute maximum");
    }

    if config.syntax.max_parse_depth == 0 || config.syntax.max_parse_depth > ABSOLUTE_MAX_PARSE_DEPTH
    {
        panic!("LIMITS: max_parse_depth must be within 1..={}", ABSOLUTE_MAX_PARSE_DEPTH);
    }

    // Bounds the nesting of the declaration list in the tree
    if config.syntax.max_declarations == 0
        || config.syntax.max_declarations > ABSOLUTE_MAX_DECLARATIONS
    {
        panic!("LIMITS: max_declarations must be within 1..={}", ABSOLUTE_MAX_DECLARATIONS);
    }

    // A u64 holds at most 20 decimal digits
    if config.lexical.max_constant_digits == 0 || config.lexical.max_constant_digits > 20 {
        panic!("LIMITS: max_constant_digits must be within 1..=20");
    }

    if config.lexical.max_identifier_length == 0 {
        panic!("LIMITS: max_identifier_length must be positive");
    }

    if config.codegen.max_frame_size < 16 {
        panic!("LIMITS: max_frame_size must hold at least one 16-byte constant");
    }

    if config.logging.security_min_log_level > 2 {
        panic!("LIMITS: security_min_log_level too high (max: 2)");
    }

    if profile == "production" && config.file_processing.max_file_size > 50_000_000 {
        panic!("PRODUCTION: max_file_size too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod file_processing {{
        pub const MAX_FILE_SIZE: u64 = {};
        pub const MAX_LINE_COUNT: usize = {};
    }}

    pub mod lexical {{
        pub const MAX_IDENTIFIER_LENGTH: usize = {};
        pub const MAX_CONSTANT_DIGITS: usize = {};
        pub const MAX_COMMENT_LENGTH: usize = {};
    }}

    pub mod syntax {{
        pub const MAX_PARSE_DEPTH: usize = {};
        pub const MAX_DECLARATIONS: usize = {};
    }}

    pub mod codegen {{
        pub const MAX_FRAME_SIZE: u64 = {};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const SECURITY_MIN_LOG_LEVEL: u8 = {};
    }}
}}
"#,
        profile,
        // File Processing
        config.file_processing.max_file_size,
        config.file_processing.max_line_count,
        // Lexical
        config.lexical.max_identifier_length,
        config.lexical.max_constant_digits,
        config.lexical.max_comment_length,
        // Syntax
        config.syntax.max_parse_depth,
        config.syntax.max_declarations,
        // Codegen
        config.codegen.max_frame_size,
        // Logging
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
        config.logging.security_min_log_level,
    );

    fs::write(output_path, constants_code).unwrap();
}

//! Token types shared by the lexer and the parser
//!
//! - [`Token`] - a positioned lexeme with its code and optional text
//! - [`ComplexConstant`] - the parsed value of a constant literal
//! - [`TokenStream`] - the parser's cursor over the token list

pub mod constant;
pub mod token;
pub mod token_stream;

pub use constant::{ComplexConstant, RightPart, SLOT_SIZE};
pub use token::Token;
pub use token_stream::TokenStream;

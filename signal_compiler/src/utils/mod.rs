//! Shared utilities for the SIGNAL lexer, parser and generator

pub mod span;

pub use span::{Position, Span};

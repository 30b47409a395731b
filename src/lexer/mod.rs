//! Lexical analysis module for the compiler.
//!
//! This module contains the scanner that turns source text into a stream of
//! classified tokens for the translation driver. It handles:
//!
//! - Tokenization of source code using anchored regex patterns
//! - Recognition of keywords, identifiers, numbers, and operators
//! - Line/column tracking for diagnostics
//! - Comments and whitespace handling

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;

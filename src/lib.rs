#![allow(clippy::module_inception)]

use std::{fmt::Display, rc::Rc};

use crate::{
    compiler::instruction::Program,
    errors::{
        errors::Error,
        reporter::{Diagnostic, MIN_ERROR_DISTANCE},
    },
    lexer::lexer::{tokenize, TokenStream},
    parser::parser::translate,
};

pub mod compiler;
pub mod errors;
pub mod flatten;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod session;
pub mod symbols;
pub mod type_checker;

extern crate regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub col: u32,
    pub file: Rc<String>,
}

impl Position {
    pub fn new(line: u32, col: u32, file: Rc<String>) -> Self {
        Position { line, col, file }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.col)
    }
}

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Knobs for a single compilation.
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Tokens that must be consumed after a reported error before the next one surfaces.
    pub min_error_distance: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            min_error_distance: MIN_ERROR_DISTANCE,
        }
    }
}

/// The result of translating one compilation unit.
///
/// The listing is produced even when errors were reported, so that the
/// output shows how far analysis got.
#[derive(Debug)]
pub struct Compilation {
    pub listing: Program,
    pub diagnostics: Vec<Diagnostic>,
    pub error_count: usize,
}

impl Compilation {
    pub fn is_success(&self) -> bool {
        self.error_count == 0
    }

    /// Renders the listing, one instruction per line.
    pub fn render(&self) -> String {
        self.listing.render()
    }

    pub fn summary(&self) -> String {
        if self.is_success() {
            String::from("compilation succeeded")
        } else {
            format!("{} error(s) detected", self.error_count)
        }
    }
}

/// Compiles `source` with default options.
///
/// Only fatal conditions (the scanner meeting a character it cannot
/// classify) return `Err`; ordinary syntax and semantic errors are counted
/// in the returned [`Compilation`].
pub fn compile(source: String, file: Option<String>) -> Result<Compilation, Error> {
    compile_with(source, file, Options::default())
}

pub fn compile_with(
    source: String,
    file: Option<String>,
    options: Options,
) -> Result<Compilation, Error> {
    let file_name = Rc::new(file.clone().unwrap_or_else(|| String::from("shell")));
    let tokens = tokenize(source, file)?;

    Ok(translate(TokenStream::new(tokens, file_name), options))
}

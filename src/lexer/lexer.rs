use std::rc::Rc;

use log::trace;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex);

#[derive(Clone)]
pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler
}

#[derive(Clone)]
pub struct Lexer {
    patterns: Vec<RegexPattern>,
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    line: u32,
    col: u32,
    file: Rc<String>,
}

fn pattern(regex: &str, handler: RegexHandler) -> RegexPattern {
    // Every pattern is anchored at the current position
    RegexPattern { regex: Regex::new(&format!("^(?:{})", regex)).unwrap(), handler }
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            pos: 0,
            line: 1,
            col: 1,
            tokens: vec![],
            patterns: vec![
                pattern("[a-zA-Z][a-zA-Z0-9_]*", symbol_handler),
                pattern("[0-9]+", number_handler),
                pattern("\\s+", skip_handler),
                pattern("//[^\\n]*", skip_handler),
                pattern("/\\*(?s:.*?)\\*/", skip_handler),
                pattern("\\[", MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[")),
                pattern("\\]", MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]")),
                pattern("\\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{")),
                pattern("\\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}")),
                pattern("\\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
                pattern("\\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
                pattern(":=", MK_DEFAULT_HANDLER!(TokenKind::Assignment, ":=")),
                pattern("!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=")),
                pattern("=", MK_DEFAULT_HANDLER!(TokenKind::Equals, "=")),
                pattern("<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=")),
                pattern("<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
                pattern(">=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=")),
                pattern(">", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
                pattern("\\.", MK_DEFAULT_HANDLER!(TokenKind::Dot, ".")),
                pattern(";", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
                pattern(":", MK_DEFAULT_HANDLER!(TokenKind::Colon, ":")),
                pattern("\\?", MK_DEFAULT_HANDLER!(TokenKind::Question, "?")),
                pattern(",", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
                pattern("\\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
                pattern("-", MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")),
                pattern("/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
                pattern("\\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
            ],
            source,
            file: file_name,
        }
    }

    /// Moves past `n` bytes of source, keeping line and column current.
    pub fn advance_n(&mut self, n: usize) {
        let end = (self.pos + n).min(self.source.len());
        for c in self.source[self.pos..end].chars() {
            if c == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        self.pos = end;
    }

    pub fn push(&mut self, token: Token) {
        trace!("token {} {:?} at {}:{}", token.kind, token.value, token.line(), token.col());
        self.tokens.push(token);
    }

    pub fn at(&self) -> char {
        self.remainder().chars().next().unwrap_or('\0')
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.col, Rc::clone(&self.file))
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }
}

fn matched_text(lexer: &Lexer, regex: &Regex) -> String {
    regex.find(lexer.remainder()).map(|m| m.as_str().to_string()).unwrap_or_default()
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = matched_text(lexer, regex);

    let start = lexer.position();
    lexer.advance_n(matched.len());
    let end = lexer.position();
    lexer.push(MK_TOKEN!(TokenKind::Number, matched, Span { start, end }));
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = matched_text(lexer, regex);
    lexer.advance_n(matched.len());
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let value = matched_text(lexer, regex);
    let kind = RESERVED_LOOKUP.get(value.as_str()).copied().unwrap_or(TokenKind::Identifier);

    let start = lexer.position();
    lexer.advance_n(value.len());
    let end = lexer.position();
    lexer.push(MK_TOKEN!(kind, value, Span { start, end }));
}

pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);
    let patterns = lex.patterns.clone();

    while !lex.at_eof() {
        let mut matched = false;

        for pattern in patterns.iter() {
            if pattern.regex.is_match(lex.remainder()) {
                (pattern.handler)(&mut lex, &pattern.regex);
                matched = true;
                break;
            }
        }

        if !matched {
            return Err(Error::new(
                ErrorImpl::UnrecognisedToken {
                    token: lex.at().to_string(),
                },
                lex.position(),
            ));
        }
    }

    let eof = lex.position();
    lex.push(MK_TOKEN!(
        TokenKind::EOF,
        String::from("EOF"),
        Span {
            start: eof.clone(),
            end: eof,
        }
    ));
    Ok(lex.tokens)
}

/// Anything the translation driver can pull classified tokens from.
///
/// Once the input is exhausted, `next` keeps returning the EOF token.
pub trait TokenSource {
    fn next(&mut self) -> Token;
}

/// A token source over an already scanned token list.
pub struct TokenStream {
    tokens: std::vec::IntoIter<Token>,
    eof: Token,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>, file: Rc<String>) -> Self {
        let eof = tokens
            .iter()
            .find(|token| token.kind == TokenKind::EOF)
            .cloned()
            .unwrap_or_else(|| {
                let position = Position::new(0, 0, file);
                MK_TOKEN!(
                    TokenKind::EOF,
                    String::from("EOF"),
                    Span {
                        start: position.clone(),
                        end: position,
                    }
                )
            });

        TokenStream { tokens: tokens.into_iter(), eof }
    }
}

impl TokenSource for TokenStream {
    fn next(&mut self) -> Token {
        self.tokens.next().unwrap_or_else(|| self.eof.clone())
    }
}

use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("program", TokenKind::Program);
        map.insert("const", TokenKind::Const);
        map.insert("int", TokenKind::Int);
        map.insert("bool", TokenKind::Bool);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("struct", TokenKind::Struct);
        map.insert("void", TokenKind::Void);
        map.insert("external", TokenKind::External);
        map.insert("procedure", TokenKind::Procedure);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("for", TokenKind::For);
        map.insert("switch", TokenKind::Switch);
        map.insert("case", TokenKind::Case);
        map.insert("default", TokenKind::Default);
        map.insert("read", TokenKind::Read);
        map.insert("write", TokenKind::Write);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // :=
    Equals,     // =
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Dot,
    Semicolon,
    Colon,
    Question,
    Comma,

    Plus,
    Dash,
    Slash,
    Star,

    // Reserved
    Program,
    Const,
    Int,
    Bool,
    True,
    False,
    Struct,
    Void,
    External,
    Procedure,
    If,
    Else,
    While,
    For,
    Switch,
    Case,
    Default,
    Read,
    Write,
}

impl TokenKind {
    /// How the token is spelled in source, used by "expected" diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::EOF => "EOF",
            TokenKind::Number => "number",
            TokenKind::Identifier => "ident",
            TokenKind::OpenBracket => "\"[\"",
            TokenKind::CloseBracket => "\"]\"",
            TokenKind::OpenCurly => "\"{\"",
            TokenKind::CloseCurly => "\"}\"",
            TokenKind::OpenParen => "\"(\"",
            TokenKind::CloseParen => "\")\"",
            TokenKind::Assignment => "\":=\"",
            TokenKind::Equals => "\"=\"",
            TokenKind::NotEquals => "\"!=\"",
            TokenKind::Less => "\"<\"",
            TokenKind::LessEquals => "\"<=\"",
            TokenKind::Greater => "\">\"",
            TokenKind::GreaterEquals => "\">=\"",
            TokenKind::Dot => "\".\"",
            TokenKind::Semicolon => "\";\"",
            TokenKind::Colon => "\":\"",
            TokenKind::Question => "\"?\"",
            TokenKind::Comma => "\",\"",
            TokenKind::Plus => "\"+\"",
            TokenKind::Dash => "\"-\"",
            TokenKind::Slash => "\"/\"",
            TokenKind::Star => "\"*\"",
            TokenKind::Program => "\"program\"",
            TokenKind::Const => "\"const\"",
            TokenKind::Int => "\"int\"",
            TokenKind::Bool => "\"bool\"",
            TokenKind::True => "\"true\"",
            TokenKind::False => "\"false\"",
            TokenKind::Struct => "\"struct\"",
            TokenKind::Void => "\"void\"",
            TokenKind::External => "\"external\"",
            TokenKind::Procedure => "\"procedure\"",
            TokenKind::If => "\"if\"",
            TokenKind::Else => "\"else\"",
            TokenKind::While => "\"while\"",
            TokenKind::For => "\"for\"",
            TokenKind::Switch => "\"switch\"",
            TokenKind::Case => "\"case\"",
            TokenKind::Default => "\"default\"",
            TokenKind::Read => "\"read\"",
            TokenKind::Write => "\"write\"",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    pub fn line(&self) -> u32 {
        self.span.start.line
    }

    pub fn col(&self) -> u32 {
        self.span.start.col
    }
}

//! Unit tests for the lexer module.
//!
//! Covers keywords, identifiers, numbers, operators and punctuation,
//! comments, source positions, and the fatal unrecognised-character case.

use std::rc::Rc;

use super::{lexer::{tokenize, TokenSource, TokenStream}, tokens::TokenKind};

#[test]
fn test_tokenize_keywords() {
    let source = "program const int bool true false struct void external procedure if else while for switch case default read write".to_string();
    let tokens = tokenize(source, Some("test.tas".to_string())).unwrap();

    let expected = [
        TokenKind::Program,
        TokenKind::Const,
        TokenKind::Int,
        TokenKind::Bool,
        TokenKind::True,
        TokenKind::False,
        TokenKind::Struct,
        TokenKind::Void,
        TokenKind::External,
        TokenKind::Procedure,
        TokenKind::If,
        TokenKind::Else,
        TokenKind::While,
        TokenKind::For,
        TokenKind::Switch,
        TokenKind::Case,
        TokenKind::Default,
        TokenKind::Read,
        TokenKind::Write,
        TokenKind::EOF,
    ];

    assert_eq!(tokens.len(), expected.len());
    for (token, kind) in tokens.iter().zip(expected.iter()) {
        assert_eq!(token.kind, *kind);
    }
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar baz_123 CamelCase programme".to_string();
    let tokens = tokenize(source, Some("test.tas".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[2].value, "baz_123");
    assert_eq!(tokens[3].value, "CamelCase");
    assert_eq!(tokens[4].kind, TokenKind::Identifier);
    assert_eq!(tokens[4].value, "programme");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let source = "42 0 1000".to_string();
    let tokens = tokenize(source, Some("test.tas".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].value, "0");
    assert_eq!(tokens[2].value, "1000");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_operators() {
    let source = "+ - * / = != < > <= >= := : ?".to_string();
    let tokens = tokenize(source, Some("test.tas".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Plus);
    assert_eq!(tokens[1].kind, TokenKind::Dash);
    assert_eq!(tokens[2].kind, TokenKind::Star);
    assert_eq!(tokens[3].kind, TokenKind::Slash);
    assert_eq!(tokens[4].kind, TokenKind::Equals);
    assert_eq!(tokens[5].kind, TokenKind::NotEquals);
    assert_eq!(tokens[6].kind, TokenKind::Less);
    assert_eq!(tokens[7].kind, TokenKind::Greater);
    assert_eq!(tokens[8].kind, TokenKind::LessEquals);
    assert_eq!(tokens[9].kind, TokenKind::GreaterEquals);
    assert_eq!(tokens[10].kind, TokenKind::Assignment);
    assert_eq!(tokens[11].kind, TokenKind::Colon);
    assert_eq!(tokens[12].kind, TokenKind::Question);
    assert_eq!(tokens[13].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_composite_designator() {
    let source = "a[1][2].pos.x".to_string();
    let tokens = tokenize(source, Some("test.tas".to_string())).unwrap();
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();

    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::OpenBracket,
            TokenKind::Number,
            TokenKind::CloseBracket,
            TokenKind::OpenBracket,
            TokenKind::Number,
            TokenKind::CloseBracket,
            TokenKind::Dot,
            TokenKind::Identifier,
            TokenKind::Dot,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    let source = "x // line comment\n/* block\ncomment */ y".to_string();
    let tokens = tokenize(source, Some("test.tas".to_string())).unwrap();

    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].value, "x");
    assert_eq!(tokens[1].value, "y");
}

#[test]
fn test_token_positions() {
    let source = "program p {\n  int x;\n}".to_string();
    let tokens = tokenize(source, Some("test.tas".to_string())).unwrap();

    assert_eq!((tokens[0].line(), tokens[0].col()), (1, 1));
    assert_eq!((tokens[1].line(), tokens[1].col()), (1, 9));
    // `int` on the second line, after two spaces
    assert_eq!((tokens[3].line(), tokens[3].col()), (2, 3));
    assert_eq!((tokens[4].line(), tokens[4].col()), (2, 7));
    assert_eq!(tokens[6].line(), 3);
}

#[test]
fn test_unrecognised_character() {
    let source = "int x # 1".to_string();
    let result = tokenize(source, Some("test.tas".to_string()));

    let error = result.err().unwrap();
    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().col, 7);
}

#[test]
fn test_token_stream_repeats_eof() {
    let tokens = tokenize("x".to_string(), None).unwrap();
    let mut stream = TokenStream::new(tokens, Rc::new("shell".to_string()));

    assert_eq!(stream.next().kind, TokenKind::Identifier);
    assert_eq!(stream.next().kind, TokenKind::EOF);
    assert_eq!(stream.next().kind, TokenKind::EOF);
}

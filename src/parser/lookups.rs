use std::collections::HashMap;

use crate::{lexer::tokens::TokenKind, symbols::symbol::Type};

use super::{expr::*, parser::Parser, stmt::*};

#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Relational,
    Additive,
    Multiplicative,
    Unary,
    Primary,
}

pub type StmtHandler = fn(&mut Parser);
pub type NUDHandler = fn(&mut Parser) -> Type;
pub type LEDHandler = fn(&mut Parser, Type, BindingPower) -> Type;

pub fn create_token_lookups(parser: &mut Parser) {
    // Relational
    parser.led(TokenKind::Equals, BindingPower::Relational, parse_relational_expr);
    parser.led(TokenKind::NotEquals, BindingPower::Relational, parse_relational_expr);
    parser.led(TokenKind::Less, BindingPower::Relational, parse_relational_expr);
    parser.led(TokenKind::LessEquals, BindingPower::Relational, parse_relational_expr);
    parser.led(TokenKind::Greater, BindingPower::Relational, parse_relational_expr);
    parser.led(TokenKind::GreaterEquals, BindingPower::Relational, parse_relational_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_arithmetic_expr);
    parser.led(TokenKind::Dash, BindingPower::Additive, parse_arithmetic_expr);
    parser.led(TokenKind::Star, BindingPower::Multiplicative, parse_arithmetic_expr);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative, parse_arithmetic_expr);

    // Literals and designators
    parser.nud(TokenKind::Number, parse_number_expr);
    parser.nud(TokenKind::Identifier, parse_designator_expr);
    parser.nud(TokenKind::True, parse_boolean_expr);
    parser.nud(TokenKind::False, parse_boolean_expr);
    parser.nud(TokenKind::Dash, parse_negation_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);

    // Statements
    parser.stmt(TokenKind::Identifier, parse_designator_stmt);
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::While, parse_while_stmt);
    parser.stmt(TokenKind::For, parse_for_stmt);
    parser.stmt(TokenKind::Switch, parse_switch_stmt);
    parser.stmt(TokenKind::Read, parse_read_stmt);
    parser.stmt(TokenKind::Write, parse_write_stmt);
    parser.stmt(TokenKind::OpenCurly, parse_block_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;

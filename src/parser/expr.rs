use crate::{
    compiler::instruction::Op,
    errors::errors::ErrorImpl,
    lexer::tokens::TokenKind,
    symbols::symbol::Type,
    type_checker::type_checker::{
        check_arithmetic, check_loadable, check_negation, check_relational,
    },
};

use super::{lookups::BindingPower, parser::Parser};

/// Parses an expression, emitting code that leaves its value on the stack.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Type {
    // First parse NUD
    let token_kind = parser.lookahead_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(handler) => *handler,
        None => {
            parser.syntax_error(ErrorImpl::Invalid { production: "Factor" });
            return Type::Undefined;
        }
    };

    let mut left = nud(parser);

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.lookahead_kind();
        let power = *parser
            .get_bp_lookup()
            .get(&token_kind)
            .unwrap_or(&BindingPower::Default);
        if power <= bp {
            break;
        }

        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(handler) => *handler,
            None => break,
        };
        left = led(parser, left, power);
    }

    left
}

/// `Ident { "[" number "]" } { "." Ident { "[" number "]" } }`, as one composite name.
///
/// Indices are rendered the way the flattener names elements, so the text
/// can be resolved like any scalar name.
pub fn parse_designator(parser: &mut Parser) -> Option<String> {
    let mut name = parser.expect_identifier()?;
    append_indices(parser, &mut name);

    while parser.accept(TokenKind::Dot) {
        let member = parser.expect_identifier()?;
        name.push('.');
        name.push_str(&member);
        append_indices(parser, &mut name);
    }

    Some(name)
}

fn append_indices(parser: &mut Parser, name: &mut String) {
    while parser.accept(TokenKind::OpenBracket) {
        if parser.expect(TokenKind::Number) {
            let text = parser.current_token().value.clone();
            match text.parse::<usize>() {
                Ok(index) => name.push_str(&format!("[{}]", index)),
                Err(_) => name.push_str(&format!("[{}]", text)),
            }
        }
        parser.expect(TokenKind::CloseBracket);
    }
}

pub fn parse_number_expr(parser: &mut Parser) -> Type {
    let text = parser.advance().value.clone();
    match text.parse::<i64>() {
        Ok(value) => {
            parser.emitter().emit(Op::Const(value));
        }
        Err(_) => {
            parser.semantic_error(ErrorImpl::NumberParseError { token: text });
            parser.emitter().emit(Op::Const(0));
        }
    }
    Type::Integer
}

pub fn parse_boolean_expr(parser: &mut Parser) -> Type {
    let value = match parser.advance().kind {
        TokenKind::True => 1,
        _ => 0,
    };
    parser.emitter().emit(Op::Const(value));
    Type::Boolean
}

pub fn parse_designator_expr(parser: &mut Parser) -> Type {
    let name = match parse_designator(parser) {
        Some(name) => name,
        None => return Type::Undefined,
    };
    let target = match parser.resolve(&name) {
        Some(target) => target,
        None => return Type::Undefined,
    };

    match check_loadable(&target) {
        Ok(ty) => {
            parser.load(&target);
            ty
        }
        Err(error) => {
            parser.semantic_error(error);
            target.symbol.ty
        }
    }
}

/// `-x` is computed as `~x + 1`.
pub fn parse_negation_expr(parser: &mut Parser) -> Type {
    parser.advance();
    let operand = parse_expr(parser, BindingPower::Unary);

    if let Err(error) = check_negation(operand) {
        parser.semantic_error(error);
    }

    let emitter = parser.emitter();
    emitter.emit(Op::Neg);
    emitter.emit(Op::Const(1));
    emitter.emit(Op::Add);
    Type::Integer
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Type {
    parser.advance();
    let ty = parse_expr(parser, BindingPower::Default);
    parser.expect(TokenKind::CloseParen);
    ty
}

pub fn parse_relational_expr(parser: &mut Parser, left: Type, bp: BindingPower) -> Type {
    let operator = parser.advance().kind;
    let right = parse_expr(parser, bp);

    match check_relational(left, right) {
        Ok(ty) => {
            parser.emitter().emit(relational_op(operator));
            ty
        }
        Err(error) => {
            parser.semantic_error(error);
            left
        }
    }
}

pub fn parse_arithmetic_expr(parser: &mut Parser, left: Type, bp: BindingPower) -> Type {
    let operator = parser.advance().kind;
    let right = parse_expr(parser, bp);

    if let Err(error) = check_arithmetic(left, right) {
        parser.semantic_error(error);
    }

    parser.emitter().emit(arithmetic_op(operator));
    Type::Integer
}

fn relational_op(kind: TokenKind) -> Op {
    match kind {
        TokenKind::Less => Op::Lss,
        TokenKind::Greater => Op::Gtr,
        TokenKind::NotEquals => Op::Neq,
        TokenKind::LessEquals => Op::Leq,
        TokenKind::GreaterEquals => Op::Geq,
        _ => Op::Equ,
    }
}

fn arithmetic_op(kind: TokenKind) -> Op {
    match kind {
        TokenKind::Dash => Op::Sub,
        TokenKind::Star => Op::Mul,
        TokenKind::Slash => Op::Div,
        _ => Op::Add,
    }
}

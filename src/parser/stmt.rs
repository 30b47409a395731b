use log::debug;

use crate::{
    compiler::instruction::Op,
    errors::errors::ErrorImpl,
    lexer::tokens::TokenKind,
    symbols::{scope::Resolved, symbol::Type},
    type_checker::type_checker::{
        check_arguments, check_assignable, check_assignment, check_callable, check_case_label,
        check_condition, check_conditional_guard, check_read_target, check_write_operand,
    },
};

use super::{
    decl::{parse_const_decl, parse_struct_decl, parse_var_decl},
    expr::{parse_designator, parse_expr},
    lookups::BindingPower,
    parser::Parser,
};

/// Dispatches on the statement's first token.
pub fn parse_stmt(parser: &mut Parser) {
    let handler = parser.get_stmt_lookup().get(&parser.lookahead_kind()).copied();
    match handler {
        Some(handler) => handler(parser),
        None => parser.syntax_error(ErrorImpl::Invalid { production: "Stat" }),
    }
}

/// Assignment, conditional assignment, or procedure call.
pub fn parse_designator_stmt(parser: &mut Parser) {
    let name = match parse_designator(parser) {
        Some(name) => name,
        None => return,
    };
    let target = parser.resolve(&name);

    match parser.lookahead_kind() {
        TokenKind::Assignment => {
            parser.advance();
            parse_assignment_rhs(parser, target.as_ref());
        }
        TokenKind::OpenParen => parse_call(parser, target.as_ref()),
        _ => parser.syntax_error(ErrorImpl::Invalid { production: "Stat" }),
    }
}

fn parse_assignment_rhs(parser: &mut Parser, target: Option<&Resolved>) {
    if let Some(target) = target {
        if let Err(error) = check_assignable(target) {
            parser.semantic_error(error);
        }
    }

    let value = parse_expr(parser, BindingPower::Default);

    if parser.accept(TokenKind::Question) {
        parse_conditional_assignment(parser, target, value);
        return;
    }

    parser.expect(TokenKind::Semicolon);
    store_checked(parser, target, value);
}

/// `x := g ? a : b;` with the guard already on the stack.
fn parse_conditional_assignment(parser: &mut Parser, target: Option<&Resolved>, guard: Type) {
    if let Err(error) = check_conditional_guard(guard) {
        parser.semantic_error(error);
    }

    let else_label = parser.emitter().new_label();
    parser.emitter().emit(Op::FJmp(else_label.clone()));
    let end_label = parser.emitter().new_label();

    let first = parse_expr(parser, BindingPower::Default);
    parser.expect(TokenKind::Colon);
    store_checked(parser, target, first);
    parser.emitter().emit(Op::Jmp(end_label.clone()));

    parser.emitter().land(else_label);
    let second = parse_expr(parser, BindingPower::Default);
    parser.expect(TokenKind::Semicolon);
    store_checked(parser, target, second);

    parser.emitter().land(end_label);
}

fn store_checked(parser: &mut Parser, target: Option<&Resolved>, value: Type) {
    if let Some(target) = target {
        if let Err(error) = check_assignment(target.symbol.ty, value) {
            parser.semantic_error(error);
        }
        parser.store(target);
    }
}

/// `Designator := Expr`, without a terminator.
fn parse_assignment(parser: &mut Parser) {
    let target = match parse_designator(parser) {
        Some(name) => parser.resolve(&name),
        None => None,
    };

    if !parser.expect(TokenKind::Assignment) {
        return;
    }

    if let Some(target) = target.as_ref() {
        if let Err(error) = check_assignable(target) {
            parser.semantic_error(error);
        }
    }

    let value = parse_expr(parser, BindingPower::Default);
    store_checked(parser, target.as_ref(), value);
}

fn parse_call(parser: &mut Parser, target: Option<&Resolved>) {
    parser.expect(TokenKind::OpenParen);

    let mut arguments = vec![];
    if !parser.at(TokenKind::CloseParen) {
        arguments.push(parse_expr(parser, BindingPower::Default));
        while parser.accept(TokenKind::Comma) {
            arguments.push(parse_expr(parser, BindingPower::Default));
        }
    }

    parser.expect(TokenKind::CloseParen);
    parser.expect(TokenKind::Semicolon);

    let target = match target {
        Some(target) => target,
        None => return,
    };
    if let Err(error) = check_callable(target) {
        parser.semantic_error(error);
        return;
    }

    let scopes = &parser.session.scopes;
    let level_difference = scopes.call_level_difference(&target.symbol);
    let label = if target.external {
        target.symbol.name.clone()
    } else {
        scopes.label_for_call(level_difference, &target.symbol.name)
    };

    let checked = parser
        .session
        .signatures
        .get(&label)
        .map(|signature| check_arguments(signature, &arguments));
    if let Some(Err(error)) = checked {
        parser.semantic_error(error);
    }

    debug!("call {} at level difference {}", label, level_difference);
    parser.emitter().emit(Op::Call(level_difference, label));
}

fn parse_condition(parser: &mut Parser) {
    parser.expect(TokenKind::OpenParen);
    let ty = parse_expr(parser, BindingPower::Default);
    parser.expect(TokenKind::CloseParen);

    if let Err(error) = check_condition(ty) {
        parser.semantic_error(error);
    }
}

pub fn parse_if_stmt(parser: &mut Parser) {
    parser.advance();
    parse_condition(parser);

    let else_label = parser.emitter().open_label();
    parser.emitter().emit(Op::FJmp(else_label));
    parse_stmt(parser);

    // The then-branch jumps over the else-branch
    let else_label = parser.emitter().pop_label();
    let end_label = parser.emitter().open_label();
    parser.emitter().emit(Op::Jmp(end_label));
    if let Some(else_label) = else_label {
        parser.emitter().land(else_label);
    }

    if parser.accept(TokenKind::Else) {
        parse_stmt(parser);
    }
    parser.emitter().close_label();
}

pub fn parse_while_stmt(parser: &mut Parser) {
    parser.advance();

    let start_label = parser.emitter().new_label();
    let end_label = parser.emitter().open_label();
    parser.emitter().land(start_label.clone());

    parse_condition(parser);
    parser.emitter().emit(Op::FJmp(end_label));

    parse_stmt(parser);
    parser.emitter().emit(Op::Jmp(start_label));
    parser.emitter().close_label();
}

/// `for (init; test; incr) body`.
///
/// Each iteration evaluates the test, runs the increment, then branches on
/// the test result; the leading jump reaches the loop head through the
/// back edge.
pub fn parse_for_stmt(parser: &mut Parser) {
    parser.advance();
    parser.expect(TokenKind::OpenParen);
    parse_assignment(parser);
    parser.expect(TokenKind::Semicolon);

    let back_edge_label = parser.emitter().new_label();
    parser.emitter().emit(Op::Jmp(back_edge_label.clone()));
    let start_label = parser.emitter().new_label();
    let end_label = parser.emitter().open_label();
    parser.emitter().land(start_label.clone());

    let test = parse_expr(parser, BindingPower::Default);
    parser.expect(TokenKind::Semicolon);
    parse_assignment(parser);
    parser.expect(TokenKind::CloseParen);

    if let Err(error) = check_condition(test) {
        parser.semantic_error(error);
    }
    parser.emitter().emit(Op::FJmp(end_label));

    parse_stmt(parser);
    parser.emitter().land(back_edge_label);
    parser.emitter().emit(Op::Jmp(start_label));
    parser.emitter().close_label();
}

/// Cases are tried in order against a fresh copy of the subject; the first
/// match runs and leaves the switch. `default` runs when none matched.
pub fn parse_switch_stmt(parser: &mut Parser) {
    parser.advance();
    parser.expect(TokenKind::OpenParen);
    let subject_start = parser.emitter().position();
    let subject_type = parse_expr(parser, BindingPower::Default);
    let subject = parser.emitter().take_from(subject_start);
    parser.expect(TokenKind::CloseParen);
    parser.expect(TokenKind::OpenCurly);

    let end_label = parser.emitter().open_label();

    while parser.accept(TokenKind::Case) {
        parser.emitter().replay(&subject);
        let label_type = parse_expr(parser, BindingPower::Default);
        parser.expect(TokenKind::Colon);

        if let Err(error) = check_case_label(subject_type, label_type) {
            parser.semantic_error(error);
        }

        let next_case = parser.emitter().open_label();
        parser.emitter().emit(Op::Equ);
        parser.emitter().emit(Op::FJmp(next_case));

        while parser.at_stmt_start() {
            parse_stmt(parser);
        }

        parser.emitter().emit(Op::Jmp(end_label.clone()));
        parser.emitter().close_label();
    }

    if parser.accept(TokenKind::Default) {
        parser.expect(TokenKind::Colon);
        while parser.at_stmt_start() {
            parse_stmt(parser);
        }
    }

    parser.expect(TokenKind::CloseCurly);
    parser.emitter().close_label();
}

pub fn parse_read_stmt(parser: &mut Parser) {
    parser.advance();
    let target = match parse_designator(parser) {
        Some(name) => parser.resolve(&name),
        None => None,
    };
    parser.expect(TokenKind::Semicolon);

    if let Some(target) = target {
        if let Err(error) = check_read_target(&target) {
            parser.semantic_error(error);
        }
        parser.emitter().emit(Op::Read);
        parser.store(&target);
    }
}

pub fn parse_write_stmt(parser: &mut Parser) {
    parser.advance();

    loop {
        let ty = parse_expr(parser, BindingPower::Default);
        if let Err(error) = check_write_operand(ty) {
            parser.semantic_error(error);
        }
        parser.emitter().emit(Op::Write);

        if !parser.accept(TokenKind::Comma) {
            break;
        }
    }

    parser.expect(TokenKind::Semicolon);
}

/// `{ ... }` shares the enclosing procedure's scope.
pub fn parse_block_stmt(parser: &mut Parser) {
    parser.advance();

    while !parser.at(TokenKind::CloseCurly) && !parser.at_eof() {
        match parser.lookahead_kind() {
            TokenKind::Int | TokenKind::Bool => parse_var_decl(parser),
            TokenKind::Struct => parse_struct_decl(parser),
            TokenKind::Const => parse_const_decl(parser),
            _ if parser.at_stmt_start() => parse_stmt(parser),
            _ => parser.skip_invalid("Stat"),
        }
    }

    parser.expect(TokenKind::CloseCurly);
}

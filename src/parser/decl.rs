use log::{debug, info};

use crate::{
    compiler::instruction::{Instruction, Op},
    errors::errors::ErrorImpl,
    flatten::{
        arrays::{element_names, MAX_ELEMENTS},
        structs::{instance_members, StructDef},
    },
    lexer::tokens::TokenKind,
    symbols::{
        scope::Resolved,
        symbol::{Kind, Symbol, Type},
    },
    type_checker::type_checker::check_assignment,
};

use super::{
    expr::parse_expr,
    lookups::BindingPower,
    parser::Parser,
    stmt::parse_stmt,
};

/// A declared type: a scalar, or a struct known by name.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclType {
    Scalar(Type),
    Struct(String),
}

/// `program Ident { decls } EOF`.
pub fn parse_program(parser: &mut Parser) {
    parser.expect(TokenKind::Program);
    let name = parser.expect_identifier().unwrap_or_default();
    parser.expect(TokenKind::OpenCurly);

    parser.session.scopes.open_scope();
    info!("translating program {}", name);

    while !parser.at(TokenKind::CloseCurly) && !parser.at_eof() {
        match parser.lookahead_kind() {
            TokenKind::Const => parse_const_decl(parser),
            TokenKind::Int | TokenKind::Bool => parse_var_decl(parser),
            TokenKind::Struct => parse_struct_decl(parser),
            TokenKind::Void => parse_proc_decl(parser),
            TokenKind::External => parse_extern_decl(parser),
            _ => parser.skip_invalid("Decl"),
        }
    }

    parser.expect(TokenKind::CloseCurly);

    let empty = parser
        .session
        .scopes
        .global()
        .map_or(true, |scope| scope.is_empty());
    if empty {
        parser.warn(format!("Warning: Program {} is empty", name));
    }

    parser.expect(TokenKind::EOF);
}

/// `int` or `bool`; anything else is reported and left unconsumed.
fn parse_scalar_type(parser: &mut Parser) -> Type {
    match parser.lookahead_kind() {
        TokenKind::Int => {
            parser.advance();
            Type::Integer
        }
        TokenKind::Bool => {
            parser.advance();
            Type::Boolean
        }
        _ => {
            parser.syntax_error(ErrorImpl::Invalid { production: "Type" });
            Type::Undefined
        }
    }
}

fn parse_type(parser: &mut Parser) -> DeclType {
    if parser.accept(TokenKind::Struct) {
        DeclType::Struct(parser.expect_identifier().unwrap_or_default())
    } else {
        DeclType::Scalar(parse_scalar_type(parser))
    }
}

/// `{ "[" number "]" }`, each bound inclusive.
fn parse_bounds(parser: &mut Parser) -> Vec<usize> {
    let mut bounds = vec![];
    while parser.accept(TokenKind::OpenBracket) {
        if parser.expect(TokenKind::Number) {
            let text = parser.current_token().value.clone();
            match text.parse::<usize>() {
                Ok(bound) => bounds.push(bound),
                Err(_) => {
                    parser.semantic_error(ErrorImpl::NumberParseError { token: text });
                    bounds.push(0);
                }
            }
        }
        parser.expect(TokenKind::CloseBracket);
    }
    bounds
}

/// Program-level names go to global storage; everything else to the innermost frame.
fn declare_storage(parser: &mut Parser, name: &str, kind: Kind, ty: Type) -> Symbol {
    let scopes = &mut parser.session.scopes;
    if scopes.depth() <= 1 {
        scopes.declare_global(name, kind, ty)
    } else {
        scopes.declare_local(name, kind, ty)
    }
}

/// `const Type Ident := Expr { , Type Ident := Expr } ;`, each stored as declared.
pub fn parse_const_decl(parser: &mut Parser) {
    parser.advance();

    loop {
        let ty = parse_scalar_type(parser);
        if let Some(name) = parser.expect_identifier() {
            let symbol = declare_storage(parser, &name, Kind::Const, ty);
            parser.expect(TokenKind::Assignment);

            let value = parse_expr(parser, BindingPower::Default);
            if let Err(error) = check_assignment(ty, value) {
                parser.semantic_error(error);
            }
            parser.store(&Resolved {
                symbol,
                external: false,
            });
        }

        if !parser.accept(TokenKind::Comma) {
            break;
        }
    }

    parser.expect(TokenKind::Semicolon);
}

/// `Type Declarator { , Declarator } ;`.
pub fn parse_var_decl(parser: &mut Parser) {
    let ty = parse_type(parser);
    parse_declarators(parser, ty);
}

fn parse_declarators(parser: &mut Parser, ty: DeclType) {
    loop {
        if let Some(name) = parser.expect_identifier() {
            let bounds = parse_bounds(parser);
            declare_variable(parser, &name, &ty, &bounds);
        }

        if !parser.accept(TokenKind::Comma) {
            break;
        }
    }

    parser.expect(TokenKind::Semicolon);
}

/// Declares one scalar per flattened element and member.
fn declare_variable(parser: &mut Parser, name: &str, ty: &DeclType, bounds: &[usize]) {
    let elements = if bounds.is_empty() {
        vec![name.to_string()]
    } else {
        let tag = match ty {
            DeclType::Scalar(ty) => *ty,
            DeclType::Struct(_) => Type::StructRef,
        };
        if !parser.session.arrays.register(name, tag, bounds.len()) {
            parser.semantic_error(ErrorImpl::ArrayAlreadyDeclared {
                name: name.to_string(),
            });
        }
        match flatten_array(parser, name, bounds, 1) {
            Some(elements) => elements,
            None => return,
        }
    };

    match ty {
        DeclType::Scalar(ty) => {
            for element in elements.iter() {
                declare_storage(parser, element, Kind::Var, *ty);
            }
        }
        DeclType::Struct(struct_name) => {
            let def = match parser.session.structs.get(struct_name) {
                Some(def) => def.clone(),
                None => {
                    parser.semantic_error(ErrorImpl::StructNotDefined {
                        name: struct_name.clone(),
                    });
                    return;
                }
            };
            if exceeds_limit(elements.len(), def.members().len()) {
                parser.semantic_error(ErrorImpl::ArrayTooLarge {
                    name: name.to_string(),
                });
                return;
            }
            for element in elements.iter() {
                for member in instance_members(element, &def) {
                    declare_storage(parser, &member.path, member.kind, member.ty);
                }
            }
        }
    }
}

/// `struct Ident { members } ;` or an instance declaration `struct Ident declarators ;`.
pub fn parse_struct_decl(parser: &mut Parser) {
    parser.advance();
    let name = parser.expect_identifier().unwrap_or_default();

    if parser.at(TokenKind::OpenCurly) {
        parse_struct_def(parser, name);
    } else {
        parse_declarators(parser, DeclType::Struct(name));
    }
}

fn parse_struct_def(parser: &mut Parser, name: String) {
    if parser.session.structs.is_defined(&name) {
        parser.semantic_error(ErrorImpl::StructAlreadyDefined { name: name.clone() });
    }

    parser.expect(TokenKind::OpenCurly);
    let mut def = StructDef::new(&name);

    while !parser.at(TokenKind::CloseCurly) && !parser.at_eof() {
        if !matches!(
            parser.lookahead_kind(),
            TokenKind::Int | TokenKind::Bool | TokenKind::Struct
        ) {
            parser.skip_invalid("Decl");
            continue;
        }

        let ty = parse_type(parser);
        let member = parser.expect_identifier();
        let bounds = parse_bounds(parser);
        parser.expect(TokenKind::Semicolon);

        if let Some(member) = member {
            add_members(parser, &mut def, &member, &ty, &bounds);
        }
    }

    parser.expect(TokenKind::CloseCurly);
    parser.expect(TokenKind::Semicolon);

    parser.session.structs.define(def);
}

/// Element names for `bounds`, or `None` after reporting an oversized array.
fn flatten_array(
    parser: &mut Parser,
    name: &str,
    bounds: &[usize],
    members: usize,
) -> Option<Vec<String>> {
    let elements = element_names(name, bounds);
    match elements {
        Some(elements) if !exceeds_limit(elements.len(), members) => Some(elements),
        _ => {
            parser.semantic_error(ErrorImpl::ArrayTooLarge {
                name: name.to_string(),
            });
            None
        }
    }
}

fn exceeds_limit(elements: usize, members: usize) -> bool {
    elements
        .checked_mul(members)
        .map_or(true, |total| total > MAX_ELEMENTS)
}

fn add_members(
    parser: &mut Parser,
    def: &mut StructDef,
    member: &str,
    ty: &DeclType,
    bounds: &[usize],
) {
    let inner = match ty {
        DeclType::Scalar(_) => None,
        DeclType::Struct(inner_name) => match parser.session.structs.get(inner_name) {
            Some(inner) => Some(inner.clone()),
            None => {
                parser.semantic_error(ErrorImpl::StructNotDefined {
                    name: inner_name.clone(),
                });
                return;
            }
        },
    };
    let width = inner.as_ref().map_or(1, |inner| inner.members().len());

    let paths = if bounds.is_empty() {
        vec![member.to_string()]
    } else {
        match flatten_array(parser, member, bounds, width) {
            Some(paths) => paths,
            None => return,
        }
    };

    let added = paths.len().saturating_mul(width);
    if exceeds_limit(def.members().len().saturating_add(added), 1) {
        parser.semantic_error(ErrorImpl::ArrayTooLarge {
            name: member.to_string(),
        });
        return;
    }

    match (ty, inner) {
        (_, Some(inner)) => {
            for path in paths.iter() {
                def.embed(path, &inner);
            }
        }
        (DeclType::Scalar(ty), None) => {
            for path in paths.iter() {
                def.add_member(path, *ty);
            }
        }
        (DeclType::Struct(_), None) => {}
    }
}

/// `void Ident ( params ) { body }`.
///
/// The procedure's symbol goes into the enclosing scope before its body is
/// opened, so the body can call it recursively. The frame size is only
/// known at the closing brace, so `Enter` is patched then.
pub fn parse_proc_decl(parser: &mut Parser) {
    parser.advance();
    let name = parser.expect_identifier().unwrap_or_default();

    parser.session.scopes.declare_procedure(&name);
    let label = parser.session.scopes.enter_procedure(&name);
    let enter = parser.emitter().emit(Op::Enter(0));

    parser.expect(TokenKind::OpenParen);
    let params = parse_params(parser);
    parser.expect(TokenKind::CloseParen);

    parser
        .session
        .signatures
        .register(&label, &name, params.clone(), Type::Undefined);

    // Arguments arrive on the operand stack, last one on top
    for offset in (0..params.len()).rev() {
        parser.emitter().emit(Op::Sto(0, offset));
    }

    parser.expect(TokenKind::OpenCurly);

    while !parser.at(TokenKind::CloseCurly) && !parser.at_eof() {
        match parser.lookahead_kind() {
            TokenKind::Const => parse_const_decl(parser),
            TokenKind::Int | TokenKind::Bool => parse_var_decl(parser),
            TokenKind::Struct => parse_struct_decl(parser),
            TokenKind::Void => parse_nested_proc_decl(parser),
            _ if parser.at_stmt_start() => parse_stmt(parser),
            _ => parser.skip_invalid("Stat"),
        }
    }

    parser.expect(TokenKind::CloseCurly);

    parser.emitter().emit(Op::Leave);
    parser.emitter().emit(Op::Ret);

    let frame_size = parser
        .session
        .scopes
        .exit_procedure()
        .map_or(0, |scope| scope.storage_count());
    debug!("procedure {} needs a frame of {}", label, frame_size);
    parser
        .emitter()
        .patch(enter, Instruction::labelled(label, Op::Enter(frame_size)));
}

/// Nested procedures are laid out inline, so straight-line execution must jump over them.
fn parse_nested_proc_decl(parser: &mut Parser) {
    let skip = parser.emitter().open_label();
    parser.emitter().emit(Op::Jmp(skip));
    parse_proc_decl(parser);
    parser.emitter().close_label();
}

fn parse_params(parser: &mut Parser) -> Vec<Type> {
    let mut params = vec![];
    if parser.at(TokenKind::CloseParen) {
        return params;
    }

    loop {
        let ty = parse_scalar_type(parser);
        if let Some(name) = parser.expect_identifier() {
            parser.session.scopes.declare_local(&name, Kind::Var, ty);
        }
        params.push(ty);

        if !parser.accept(TokenKind::Comma) {
            break;
        }
    }
    params
}

/// `external` variables, constants and procedures, addressed by name.
pub fn parse_extern_decl(parser: &mut Parser) {
    parser.advance();

    match parser.lookahead_kind() {
        TokenKind::Int | TokenKind::Bool => {
            let ty = parse_scalar_type(parser);
            loop {
                if let Some(name) = parser.expect_identifier() {
                    parser.session.scopes.declare_external(&name, Kind::Var, ty);
                }
                if !parser.accept(TokenKind::Comma) {
                    break;
                }
            }
        }
        TokenKind::Const => {
            parser.advance();
            let ty = parse_scalar_type(parser);
            if let Some(name) = parser.expect_identifier() {
                parser.session.scopes.declare_external(&name, Kind::Const, ty);
            }
        }
        TokenKind::Procedure => {
            parser.advance();
            if let Some(name) = parser.expect_identifier() {
                parser.session.scopes.declare_external(&name, Kind::Proc, Type::Undefined);
                if parser.accept(TokenKind::OpenParen) {
                    let params = parse_param_types(parser);
                    parser.expect(TokenKind::CloseParen);
                    parser
                        .session
                        .signatures
                        .register(&name, &name, params, Type::Undefined);
                }
            }
        }
        _ => {
            parser.syntax_error(ErrorImpl::Invalid { production: "ExternDecl" });
            return;
        }
    }

    parser.expect(TokenKind::Semicolon);
}

fn parse_param_types(parser: &mut Parser) -> Vec<Type> {
    let mut params = vec![];
    if parser.at(TokenKind::CloseParen) {
        return params;
    }

    loop {
        params.push(parse_scalar_type(parser));
        if !parser.accept(TokenKind::Comma) {
            break;
        }
    }
    params
}

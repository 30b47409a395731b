use log::debug;

use crate::symbols::{
    scope::Scope,
    symbol::{Kind, Symbol},
};

use super::instruction::{Directive, Instruction, Op};

/// Declaration directives for a finished compilation unit.
///
/// `.names` counts every global symbol plus every external. Globals follow in
/// declaration order (constants get no directive), then the externals.
pub fn header(globals: &Scope, externals: &Scope) -> Vec<Instruction> {
    let mut out = vec![directive(Directive::Names(globals.len() + externals.len()))];

    for symbol in globals.iter() {
        match symbol.kind {
            Kind::Var => out.push(directive(Directive::Var(symbol.ty, symbol.name.clone()))),
            Kind::Proc => out.push(directive(Directive::Proc(symbol.name.clone()))),
            Kind::Const | Kind::Struct => {}
        }
    }

    out.extend(externals.iter().filter_map(external_directive).map(directive));

    debug!("header of {} directive(s)", out.len());
    out
}

fn external_directive(symbol: &Symbol) -> Option<Directive> {
    match symbol.kind {
        Kind::Var => Some(Directive::ExternalVar(symbol.ty, symbol.name.clone())),
        Kind::Proc => Some(Directive::ExternalProc(symbol.name.clone())),
        Kind::Const => Some(Directive::ExternalConst(symbol.ty, symbol.name.clone())),
        Kind::Struct => None,
    }
}

fn directive(directive: Directive) -> Instruction {
    Instruction::new(Op::Directive(directive))
}

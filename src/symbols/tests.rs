//! Unit tests for scopes, resolution, and procedure labels.

use super::scope::ScopeStack;
use super::signatures::SignatureRegistry;
use super::symbol::{Kind, Type};

#[test]
fn test_offsets_count_consts_and_vars_only() {
    let mut scopes = ScopeStack::new();
    scopes.open_scope();

    let a = scopes.declare_local("a", Kind::Var, Type::Integer);
    let c = scopes.declare_local("c", Kind::Const, Type::Boolean);
    scopes.declare_procedure("p");
    let b = scopes.declare_local("b", Kind::Var, Type::Integer);

    assert_eq!(a.offset, Some(0));
    assert_eq!(c.offset, Some(1));
    assert_eq!(b.offset, Some(2));
    assert_eq!(a.frame_depth, 0);
    assert!(a.is_global());
}

#[test]
fn test_procedure_symbol_lives_in_enclosing_scope() {
    let mut scopes = ScopeStack::new();
    scopes.open_scope();

    let proc = scopes.declare_procedure("main");
    assert_eq!(proc.frame_depth, 1);
    assert_eq!(proc.offset, None);

    scopes.enter_procedure("main");
    let local = scopes.declare_local("x", Kind::Var, Type::Integer);
    assert_eq!(local.frame_depth, 1);
    assert_eq!(local.offset, Some(0));

    scopes.exit_procedure();
    assert!(scopes.resolve("x").is_none());
    assert_eq!(scopes.resolve("main").unwrap().symbol.kind, Kind::Proc);
}

#[test]
fn test_resolve_innermost_first() {
    let mut scopes = ScopeStack::new();
    scopes.open_scope();
    scopes.declare_local("x", Kind::Var, Type::Integer);
    scopes.declare_procedure("p");
    scopes.enter_procedure("p");
    scopes.declare_local("x", Kind::Var, Type::Boolean);

    let resolved = scopes.resolve("x").unwrap();
    assert_eq!(resolved.symbol.ty, Type::Boolean);
    assert_eq!(resolved.symbol.frame_depth, 1);
    assert!(!resolved.external);
}

#[test]
fn test_resolve_falls_back_to_externals() {
    let mut scopes = ScopeStack::new();
    scopes.open_scope();
    let external = scopes.declare_external("counter", Kind::Var, Type::Integer);

    assert_eq!(external.frame_depth, 1);
    assert_eq!(external.offset, Some(0));

    let resolved = scopes.resolve("counter").unwrap();
    assert!(resolved.external);
    assert!(scopes.resolve("missing").is_none());
}

#[test]
fn test_declare_global_from_nested_scope() {
    let mut scopes = ScopeStack::new();
    scopes.open_scope();
    scopes.declare_local("a", Kind::Var, Type::Integer);
    scopes.enter_procedure("p");

    let g = scopes.declare_global("g", Kind::Var, Type::Integer);
    assert_eq!(g.frame_depth, 0);
    assert_eq!(g.offset, Some(1));
    assert_eq!(scopes.global().unwrap().len(), 2);
}

#[test]
fn test_level_differences() {
    let mut scopes = ScopeStack::new();
    scopes.open_scope();
    let outer = scopes.declare_procedure("outer");
    scopes.enter_procedure("outer");
    let v = scopes.declare_local("v", Kind::Var, Type::Integer);
    let inner = scopes.declare_procedure("inner");
    scopes.enter_procedure("inner");

    // depth 3 inside inner, v was declared at depth 1
    assert_eq!(scopes.data_level_difference(&v), 1);
    assert_eq!(scopes.call_level_difference(&inner), 1);
    assert_eq!(scopes.call_level_difference(&outer), 2);
}

#[test]
fn test_labels_compose_open_procedures() {
    let mut scopes = ScopeStack::new();
    scopes.open_scope();

    assert_eq!(scopes.enter_procedure("q"), "q");
    assert_eq!(scopes.enter_procedure("p"), "q$p");
    assert_eq!(scopes.label_for("foo"), "q$p$foo");
}

#[test]
fn test_call_label_matches_declaration_label() {
    let mut scopes = ScopeStack::new();
    scopes.open_scope();
    scopes.declare_procedure("foo");
    scopes.declare_procedure("q");
    scopes.enter_procedure("q");

    let inner_foo = scopes.declare_procedure("foo");
    let inner_label = scopes.label_for("foo");
    scopes.enter_procedure("foo");
    scopes.exit_procedure();

    scopes.declare_procedure("p");
    scopes.enter_procedure("p");

    // Inside q$p the innermost foo is q's foo
    let resolved = scopes.resolve("foo").unwrap().symbol;
    assert_eq!(resolved, inner_foo);
    let diff = scopes.call_level_difference(&resolved);
    assert_eq!(diff, 1);
    assert_eq!(scopes.label_for_call(diff, "foo"), inner_label);
    assert_eq!(inner_label, "q$foo");

    scopes.exit_procedure();
    scopes.exit_procedure();

    let outer = scopes.resolve("foo").unwrap().symbol;
    let diff = scopes.call_level_difference(&outer);
    assert_eq!(scopes.label_for_call(diff, "foo"), "foo");
}

#[test]
fn test_recursive_call_label() {
    let mut scopes = ScopeStack::new();
    scopes.open_scope();
    scopes.declare_procedure("q");
    scopes.enter_procedure("q");
    scopes.declare_procedure("r");
    let label = scopes.enter_procedure("r");

    let r = scopes.resolve("r").unwrap().symbol;
    let diff = scopes.call_level_difference(&r);
    assert_eq!(scopes.label_for_call(diff, "r"), label);
}

#[test]
fn test_signature_registry() {
    let mut signatures = SignatureRegistry::new();
    signatures.register("q$foo", "foo", vec![Type::Integer, Type::Boolean], Type::Undefined);

    let signature = signatures.get("q$foo").unwrap();
    assert_eq!(signature.param_count(), 2);
    assert_eq!(signature.name, "foo");
    assert!(signatures.get("foo").is_none());
}

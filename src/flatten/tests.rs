//! Unit tests for array and struct flattening.

use super::arrays::{element_names, ArrayRegistry, MAX_ELEMENTS};
use super::structs::{instance_members, StructDef, StructTable};
use crate::symbols::symbol::{Kind, Type};

#[test]
fn test_two_dimensional_names() {
    let names = element_names("a", &[1, 2]).unwrap();

    assert_eq!(
        names,
        vec!["a[0][0]", "a[0][1]", "a[0][2]", "a[1][0]", "a[1][1]", "a[1][2]"]
    );
}

#[test]
fn test_three_dimensional_order() {
    let names = element_names("m", &[1, 0, 1]).unwrap();

    assert_eq!(names.len(), 4);
    assert_eq!(names, vec!["m[0][0][0]", "m[0][0][1]", "m[1][0][0]", "m[1][0][1]"]);
}

#[test]
fn test_zero_bound_is_single_element() {
    assert_eq!(element_names("z", &[0]), Some(vec!["z[0]".to_string()]));
}

#[test]
fn test_oversized_bounds_are_refused() {
    assert_eq!(element_names("a", &[usize::MAX]), None);
    assert_eq!(element_names("a", &[u32::MAX as usize, u32::MAX as usize]), None);
    assert_eq!(element_names("a", &[MAX_ELEMENTS]), None);
    assert_eq!(
        element_names("a", &[MAX_ELEMENTS - 1]).map(|names| names.len()),
        Some(MAX_ELEMENTS)
    );
}

#[test]
fn test_array_registry_rejects_duplicates() {
    let mut registry = ArrayRegistry::new();

    assert!(registry.register("a", Type::Integer, 2));
    assert!(!registry.register("a", Type::Integer, 2));
    // A different element type or rank is a different array
    assert!(registry.register("a", Type::Boolean, 2));
    assert!(registry.register("a", Type::Integer, 1));
    assert!(registry.contains("a", Type::Boolean, 2));
}

#[test]
fn test_struct_embedding_prefixes_members() {
    let mut point = StructDef::new("Point");
    point.add_member("x", Type::Integer);
    point.add_member("y", Type::Integer);

    let mut particle = StructDef::new("Particle");
    particle.embed("pos", &point);
    particle.add_member("alive", Type::Boolean);

    let paths: Vec<&str> = particle.members().iter().map(|m| m.path.as_str()).collect();
    assert_eq!(paths, vec!["pos.x", "pos.y", "alive"]);
    assert_eq!(particle.member("alive").unwrap().ty, Type::Boolean);
    assert_eq!(particle.member("pos.y").unwrap().kind, Kind::Var);
}

#[test]
fn test_instance_members() {
    let mut point = StructDef::new("Point");
    point.add_member("x", Type::Integer);
    point.add_member("on", Type::Boolean);

    let members = instance_members("ps[1]", &point);
    assert_eq!(members[0].path, "ps[1].x");
    assert_eq!(members[1].path, "ps[1].on");
    assert_eq!(members[1].ty, Type::Boolean);
}

#[test]
fn test_struct_redefinition_keeps_first() {
    let mut table = StructTable::new();

    let mut first = StructDef::new("S");
    first.add_member("a", Type::Integer);
    let mut second = StructDef::new("S");
    second.add_member("b", Type::Boolean);

    assert!(table.define(first.clone()));
    assert!(!table.define(second));
    assert_eq!(table.get("S"), Some(&first));
    assert_eq!(table.len(), 1);
}

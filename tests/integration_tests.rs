//! Integration tests for end-to-end compilation.
//!
//! These tests go through the public `compile` entry point: scanning,
//! translation and the rendered listing with its header.

use tastier::{compile, compile_with, errors::errors::ErrorClass, Compilation, Options};

fn compile_source(source: &str) -> Compilation {
    compile(source.to_string(), Some("test.tas".to_string())).unwrap()
}

fn rendered_lines(compilation: &Compilation) -> Vec<String> {
    compilation.render().lines().map(String::from).collect()
}

fn count_starting_with(lines: &[String], prefix: &str) -> usize {
    lines.iter().filter(|line| line.starts_with(prefix)).count()
}

#[test]
fn test_names_counts_globals_and_externals() {
    let compilation = compile_source(
        "program Counts {
            int a, b;
            bool flag;
            const int limit := 3;
            external int shared;
            external procedure log(int);
            void main() { a := limit; }
        }",
    );

    assert!(compilation.is_success());
    let lines = rendered_lines(&compilation);
    // a, b, flag, limit, main + 2 externals
    assert_eq!(lines[0], ".names 7");
    assert_eq!(count_starting_with(&lines, ".var "), 3);
    assert_eq!(count_starting_with(&lines, ".proc "), 1);
    assert_eq!(count_starting_with(&lines, ".external "), 2);
}

#[test]
fn test_two_dimensional_array_flattening() {
    let compilation = compile_source("program Grid { int a[1][2]; }");

    assert!(compilation.is_success());
    assert_eq!(
        rendered_lines(&compilation),
        vec![
            ".names 6",
            ".var 1 a[0][0]",
            ".var 1 a[0][1]",
            ".var 1 a[0][2]",
            ".var 1 a[1][0]",
            ".var 1 a[1][1]",
            ".var 1 a[1][2]",
        ]
    );
}

#[test]
fn test_struct_redefinition_keeps_first_definition() {
    let compilation = compile_source(
        "program Shapes {
            struct S { int a; };
            struct S { bool b; int c; };
            struct S s;
        }",
    );

    assert_eq!(compilation.error_count, 1);
    assert_eq!(
        compilation.diagnostics[0].message,
        "struct 'S' is already defined"
    );
    assert_eq!(
        rendered_lines(&compilation),
        vec![".names 1", ".var 1 s.a"]
    );
}

#[test]
fn test_shadowed_procedure_resolves_innermost() {
    let compilation = compile_source(
        "program Shadows {
            void foo() { write 1; }
            void q() {
                void foo() { write 2; }
                void p() { foo(); }
                foo();
            }
            void main() { foo(); q(); }
        }",
    );

    assert!(compilation.is_success());
    let lines = rendered_lines(&compilation);

    assert!(lines.contains(&"foo: Enter 0".to_string()));
    assert!(lines.contains(&"q$foo: Enter 0".to_string()));
    assert!(lines.contains(&"q$p: Enter 0".to_string()));

    // Inside q$p and q, the inner foo; inside main, the outer one
    assert!(lines.contains(&"Call 1 q$foo".to_string()));
    assert!(lines.contains(&"Call 0 q$foo".to_string()));
    assert!(lines.contains(&"Call 1 foo".to_string()));
    assert!(lines.contains(&"Call 1 q".to_string()));
}

#[test]
fn test_assign_then_write() {
    let compilation = compile_source("program Out { int x; void main() { x := 5; write x; } }");

    assert!(compilation.is_success());
    assert_eq!(compilation.error_count, 0);
    let lines = rendered_lines(&compilation);
    let start = lines.iter().position(|l| l == "Const 5").unwrap();
    assert_eq!(lines[start..start + 4], ["Const 5", "StoG 3", "LoadG 3", "Write"]);
}

#[test]
fn test_if_else_shape() {
    let compilation = compile_source(
        "program Branch { void main() { if (1 = 1) { write 1; } else { write 0; } } }",
    );

    assert!(compilation.is_success());
    let lines = rendered_lines(&compilation);

    assert_eq!(count_starting_with(&lines, "FJmp "), 1);
    assert_eq!(count_starting_with(&lines, "Jmp "), 1);
    let landings: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, l)| l.ends_with(": Nop"))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(landings.len(), 2);

    let write_one = lines.iter().position(|l| l == "Const 1").unwrap();
    let write_one = write_one
        + lines[write_one..]
            .iter()
            .position(|l| l == "Write")
            .unwrap();
    assert!(write_one < landings[0]);
}

#[test]
fn test_switch_without_default_falls_to_end() {
    let compilation = compile_source(
        "program Pick {
            int x;
            void main() {
                switch (x) {
                    case 1: write 1;
                    case 2: write 2;
                }
            }
        }",
    );

    assert!(compilation.is_success());
    let lines = rendered_lines(&compilation);

    // The last failed test jumps to a landing directly followed by the switch end
    let last_fjmp = lines.iter().rposition(|l| l.starts_with("FJmp ")).unwrap();
    let target = lines[last_fjmp].trim_start_matches("FJmp ").to_string();
    let landing = lines
        .iter()
        .position(|l| *l == format!("{}: Nop", target))
        .unwrap();

    let end_label = lines
        .iter()
        .find(|l| l.starts_with("Jmp "))
        .unwrap()
        .trim_start_matches("Jmp ")
        .to_string();
    assert_eq!(lines[landing + 1], format!("{}: Nop", end_label));
    assert_eq!(count_starting_with(&lines, "Equ"), 2);
}

#[test]
fn test_external_assignment_is_addressed_by_name() {
    let compilation = compile_source(
        "program Linked { external int counter; void main() { counter := counter + 1; } }",
    );

    assert!(compilation.is_success());
    let lines = rendered_lines(&compilation);
    assert!(lines.contains(&"StoG counter".to_string()));
    assert!(lines.contains(&"LoadG counter".to_string()));
    assert!(lines.contains(&".external var 1 counter".to_string()));
}

#[test]
fn test_procedure_frame_size_is_patched() {
    let compilation = compile_source(
        "program Frames {
            void main() {
                int a, b;
                struct P { int x; int y; };
                struct P p;
                bool flags[2];
                a := 1;
            }
        }",
    );

    assert!(compilation.is_success());
    let lines = rendered_lines(&compilation);
    assert!(lines.contains(&"main: Enter 7".to_string()));
    assert!(!lines.contains(&"Enter 0".to_string()));
}

#[test]
fn test_listing_written_despite_errors() {
    let compilation = compile_source(
        "program Broken { int x; void main() { x := true; write y; } }",
    );

    assert!(!compilation.is_success());
    assert_eq!(compilation.error_count, 2);
    assert_eq!(compilation.summary(), "2 error(s) detected");
    assert!(compilation.render().contains("main: Enter 0"));

    let rendered: Vec<String> = compilation
        .diagnostics
        .iter()
        .map(|d| d.to_string())
        .collect();
    assert_eq!(
        rendered,
        vec![
            "-- line 1 col 48: incompatible types",
            "-- line 1 col 56: reference to undefined variable y",
        ]
    );
}

#[test]
fn test_success_summary() {
    let compilation = compile_source("program Fine { int x; }");
    assert_eq!(compilation.summary(), "compilation succeeded");
}

#[test]
fn test_unrecognised_character_is_fatal() {
    let result = compile(
        "program Bad { int x; # }".to_string(),
        Some("bad.tas".to_string()),
    );

    let error = result.unwrap_err();
    assert_eq!(error.class(), ErrorClass::Fatal);
    assert_eq!(error.get_position().col, 22);
}

#[test]
fn test_min_error_distance_option() {
    let source = "program Noisy { bool b; void main() { b := 1 + true; } }".to_string();

    let default = compile(source.clone(), None).unwrap();
    let strict = compile_with(source, None, Options { min_error_distance: 0 }).unwrap();

    assert_eq!(default.error_count, 1);
    assert_eq!(strict.error_count, 2);
}

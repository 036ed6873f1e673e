#![allow(non_snake_case)]

use super::*;

const SOURCE: &str = "fn main() {\n\tlet x = ;\n}\n";

#[test]
fn SyntaxError___new___captures_previous_line_and_caret() {
    let err = SyntaxError::new(Path::new("a_gen.rs"), SOURCE, 2, 9, "expected expression".into());

    assert_eq!(err.context, vec!["fn main() {", "\tlet x = ;", "\t        ^"]);
}

#[test]
fn SyntaxError___first_line___has_no_previous_context() {
    let err = SyntaxError::new(Path::new("a_gen.rs"), "struct {}", 1, 7, "expected identifier".into());

    assert_eq!(err.context, vec!["struct {}", "       ^"]);
}

#[test]
fn SyntaxError___line_past_end___has_no_snippet() {
    let err = SyntaxError::new(Path::new("a_gen.rs"), "", 3, 0, "unexpected end of input".into());

    assert!(err.context.is_empty());
}

#[test]
fn SyntaxError___display___includes_position_and_tabbed_context() {
    let err = SyntaxError::new(Path::new("a_gen.rs"), SOURCE, 2, 9, "expected expression".into());

    let rendered = err.to_string();

    assert_eq!(
        rendered,
        "a_gen.rs:2:10: expected expression\n\tfn main() {\n\t\tlet x = ;\n\t\t        ^"
    );
}

#[test]
fn CompileError___syntax___lists_every_error() {
    let first = SyntaxError::new(Path::new("x.rs"), SOURCE, 1, 0, "one".into());
    let second = SyntaxError::new(Path::new("x.rs"), SOURCE, 3, 0, "two".into());

    let rendered = CompileError::Syntax(vec![first, second]).to_string();

    assert!(rendered.starts_with("x.rs:1:1: one"), "{rendered}");
    assert!(rendered.contains("\nx.rs:3:1: two"), "{rendered}");
}

#[test]
fn CompileError___default___names_structure_and_field() {
    let err = CompileError::Default {
        structure: "EchoRequest".into(),
        field: "Value".into(),
        source: SchemaError::DefaultTypeMismatch { expected: "string" },
    };

    assert_eq!(err.to_string(), "EchoRequest.Value: default value is not a string");
}

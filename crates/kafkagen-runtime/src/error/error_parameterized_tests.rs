#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

fn conflict() -> GenerateError {
    GenerateError::Conflict {
        group: "api key 3".into(),
        slot: Slot::Request,
        existing: "ARequest".into(),
        incoming: "BRequest".into(),
    }
}

fn mismatch() -> GenerateError {
    GenerateError::NameMismatch {
        api_key: 1,
        request: "Fetch".into(),
        response: "Fetched".into(),
    }
}

fn fault() -> GenerateError {
    GenerateError::Fault("boom".into())
}

fn load() -> GenerateError {
    GenerateError::Load {
        path: PathBuf::from("x.json"),
        source: SchemaError::UnknownPrimitive("uuid".into()),
    }
}

fn compile() -> GenerateError {
    GenerateError::Compile {
        group: "headers".into(),
        source: CompileError::Syntax(Vec::new()),
    }
}

#[test_case(conflict(), true ; "conflict")]
#[test_case(mismatch(), true ; "name mismatch")]
#[test_case(fault(), true ; "fault")]
#[test_case(load(), false ; "load")]
#[test_case(compile(), false ; "compile")]
fn GenerateError___is_group_fatal___matches_category(err: GenerateError, expected: bool) {
    assert_eq!(err.is_group_fatal(), expected);
}

#[test_case(conflict(), "api key 3: request slot already holds ARequest" ; "conflict")]
#[test_case(mismatch(), "api key 1: request base name \"Fetch\"" ; "name mismatch")]
#[test_case(fault(), "internal fault: boom" ; "fault")]
#[test_case(load(), "x.json: " ; "load")]
#[test_case(compile(), "headers: " ; "compile")]
fn GenerateError___display___starts_with_context(err: GenerateError, prefix: &str) {
    assert!(err.to_string().starts_with(prefix), "{err}");
}

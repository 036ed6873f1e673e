#![allow(non_snake_case)]

use super::*;

fn preamble() -> String {
    (0..LICENSE_PREAMBLE_LINES)
        .map(|i| format!("// license line {i}\n"))
        .collect()
}

fn message(json: &str) -> MessageData {
    serde_json::from_str(json).unwrap()
}

// trim_comments

#[test]
fn trim_comments___drops_preamble_and_blank_edges() {
    let text = format!("{}//\n// Fetch records.\n//   \n// More.\n//\n", preamble());

    let trimmed = trim_comments(&text);

    assert_eq!(trimmed, "// Fetch records.\n//   \n// More.\n");
}

#[test]
fn trim_comments___short_text___is_empty() {
    assert_eq!(trim_comments("// one\n// two\n"), "");
    assert_eq!(trim_comments(""), "");
}

#[test]
fn trim_comments___only_preamble___is_empty() {
    assert_eq!(trim_comments(&preamble()), "");
}

#[test]
fn trim_comments___unterminated_last_line___is_kept() {
    let text = format!("{}// Version 1 adds X.", preamble());

    assert_eq!(trim_comments(&text), "// Version 1 adds X.");
}

// apply_fixups

#[test]
fn apply_fixups___incremental_alter_configs___renames_struct_refs_recursively() {
    let mut msg = message(
        r#"{ "type": "request", "name": "IncrementalAlterConfigsRequest", "apiKey": 44,
        "fields": [
            { "name": "Resources", "type": "[]AlterConfigsResource", "versions": "0+", "fields": [
                { "name": "Configs", "type": "[]AlterableConfig", "versions": "0+" },
                { "name": "Other", "type": "[]Unrelated", "versions": "0+" }
            ]},
            { "name": "Name", "type": "string", "versions": "0+" }
        ]}"#,
    );

    apply_fixups(&mut msg);

    let resources = &msg.fields[0];
    assert_eq!(resources.ty.to_string(), "[]IncrementalAlterConfigsResource");
    assert_eq!(resources.fields[0].ty.to_string(), "[]IncrementallyAlterableConfig");
    assert_eq!(resources.fields[1].ty.to_string(), "[]Unrelated");
    assert_eq!(msg.fields[1].ty.to_string(), "string");
}

#[test]
fn apply_fixups___incremental_response___renames_response_struct() {
    let mut msg = message(
        r#"{ "type": "response", "name": "IncrementalAlterConfigsResponse", "apiKey": 44,
        "fields": [
            { "name": "Responses", "type": "[]AlterConfigsResourceResponse", "versions": "0+" }
        ]}"#,
    );

    apply_fixups(&mut msg);

    assert_eq!(
        msg.fields[0].ty.elem,
        ElemType::Struct("IncrementalAlterConfigsResourceResponse".into())
    );
}

#[test]
fn apply_fixups___create_topics_request___exports_lowercase_names_recursively() {
    let mut msg = message(
        r#"{ "type": "request", "name": "CreateTopicsRequest", "apiKey": 19,
        "fields": [
            { "name": "Topics", "type": "[]CreatableTopic", "versions": "0+", "fields": [
                { "name": "name", "type": "string", "versions": "0+" },
                { "name": "validate_only", "type": "bool", "versions": "0+" }
            ]},
            { "name": "timeoutMs", "type": "int32", "versions": "0+" }
        ]}"#,
    );

    apply_fixups(&mut msg);

    assert_eq!(msg.fields[0].name, "Topics");
    assert_eq!(msg.fields[0].fields[0].name, "Name");
    assert_eq!(msg.fields[0].fields[1].name, "ValidateOnly");
    assert_eq!(msg.fields[1].name, "TimeoutMs");
}

#[test]
fn apply_fixups___unrelated_message___only_trims_comments() {
    let mut msg = message(
        r#"{ "type": "request", "name": "CreateTopicsResponse", "apiKey": 19,
        "fields": [ { "name": "throttle", "type": "[]AlterableConfig", "versions": "0+" } ]}"#,
    );
    msg.comments = format!("{}// Kept.\n", preamble());

    apply_fixups(&mut msg);

    assert_eq!(msg.fields[0].name, "throttle");
    assert_eq!(msg.fields[0].ty.to_string(), "[]AlterableConfig");
    assert_eq!(msg.comments, "// Kept.\n");
}

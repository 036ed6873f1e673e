#![allow(non_snake_case)]

use super::*;

fn msg(kind: &str, name: &str, api_key: Option<i16>) -> MessageData {
    let api_key = api_key.map_or(String::new(), |k| format!("\"apiKey\": {k},"));
    serde_json::from_str(&format!(
        r#"{{ {api_key} "type": "{kind}", "name": "{name}", "validVersions": "0+" }}"#
    ))
    .unwrap()
}

// ApiGroup

#[test]
fn ApiGroup___first_fill___does_not_complete() {
    let group = ApiGroup::new(3);

    let result = group.fill(msg("request", "MetadataRequest", Some(3))).unwrap();

    assert!(result.is_none());
    assert_eq!(group.missing(), Some(Slot::Response));
}

#[test]
fn ApiGroup___second_fill___returns_pair() {
    let group = ApiGroup::new(3);
    group.fill(msg("response", "MetadataResponse", Some(3))).unwrap();

    let pair = group
        .fill(msg("request", "MetadataRequest", Some(3)))
        .unwrap()
        .unwrap();

    assert_eq!(pair.request.name, "MetadataRequest");
    assert_eq!(pair.response.name, "MetadataResponse");
    assert_eq!(group.missing(), None);
}

#[test]
fn ApiGroup___refill___is_conflict() {
    let group = ApiGroup::new(3);
    group.fill(msg("request", "MetadataRequest", Some(3))).unwrap();

    let err = group
        .fill(msg("request", "OtherRequest", Some(3)))
        .unwrap_err();

    match err {
        GenerateError::Conflict {
            group,
            slot,
            existing,
            incoming,
        } => {
            assert_eq!(group, "api key 3");
            assert_eq!(slot, Slot::Request);
            assert_eq!(existing, "MetadataRequest");
            assert_eq!(incoming, "OtherRequest");
        }
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[test]
fn ApiGroup___refill_after_completion___is_conflict() {
    let group = ApiGroup::new(3);
    group.fill(msg("request", "MetadataRequest", Some(3))).unwrap();
    group.fill(msg("response", "MetadataResponse", Some(3))).unwrap();

    let result = group.fill(msg("response", "MetadataResponse", Some(3)));

    assert!(matches!(result, Err(GenerateError::Conflict { .. })));
}

#[test]
fn ApiGroup___header_message___is_fault() {
    let group = ApiGroup::new(3);

    let result = group.fill(msg("header", "RequestHeader", None));

    assert!(matches!(result, Err(GenerateError::Fault(_))));
}

// HeaderGroup

#[test]
fn HeaderGroup___routes_by_exact_name() {
    let group = HeaderGroup::new("RequestHeader", "ResponseHeader");
    group.fill(msg("header", "ResponseHeader", None)).unwrap();

    let pair = group
        .fill(msg("header", "RequestHeader", None))
        .unwrap()
        .unwrap();

    assert_eq!(pair.request.name, "RequestHeader");
    assert_eq!(pair.response.name, "ResponseHeader");
}

#[test]
fn HeaderGroup___unknown_name___is_fault() {
    let group = HeaderGroup::new("RequestHeader", "ResponseHeader");

    let result = group.fill(msg("header", "requestheader", None));

    assert!(matches!(result, Err(GenerateError::Fault(m)) if m.contains("requestheader")));
    assert_eq!(group.missing(), None);
}

#[test]
fn Slot___display___is_lowercase() {
    assert_eq!(Slot::Request.to_string(), "request");
    assert_eq!(Slot::Response.to_string(), "response");
}

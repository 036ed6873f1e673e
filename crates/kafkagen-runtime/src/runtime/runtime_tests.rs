#![allow(non_snake_case)]

use super::*;
use std::fs;
use tempfile::TempDir;

struct Workspace {
    src: TempDir,
    dst: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            src: TempDir::new().unwrap(),
            dst: TempDir::new().unwrap(),
        }
    }

    fn schema(&self, file: &str, body: &str) -> PathBuf {
        let path = self.src.path().join(file);
        fs::write(&path, body).unwrap();
        path
    }

    fn api(&self, kind: &str, name: &str, api_key: i16) -> PathBuf {
        self.schema(
            &format!("{name}.json"),
            &format!(
                r#"{{ "apiKey": {api_key}, "type": "{kind}", "name": "{name}", "validVersions": "0-1",
                "fields": [ {{ "name": "Value", "type": "int32", "versions": "0+" }} ] }}"#
            ),
        )
    }

    fn header(&self, name: &str) -> PathBuf {
        self.schema(
            &format!("{name}.json"),
            &format!(
                r#"{{ "type": "header", "name": "{name}", "validVersions": "0-2",
                "fields": [ {{ "name": "CorrelationId", "type": "int32", "versions": "0+" }} ] }}"#
            ),
        )
    }

    fn generator(&self) -> Generator {
        Generator::new(self.dst.path(), GeneratorOptions::default())
    }

    fn output(&self, file: &str) -> PathBuf {
        self.dst.path().join(file)
    }
}

#[test]
fn Generator___complete_groups___write_one_file_each() {
    let ws = Workspace::new();
    let sources = vec![
        ws.api("request", "ApiVersionsRequest", 18),
        ws.header("ResponseHeader"),
        ws.api("response", "ApiVersionsResponse", 18),
        ws.header("RequestHeader"),
    ];
    let generator = ws.generator();

    let report = generator.run(&sources);

    assert!(report.is_clean(), "{report:?}");
    assert_eq!(report.written.len(), 2);
    assert_eq!(generator.compiled_groups(), 2);
    let api = fs::read_to_string(ws.output("api_versions_gen.rs")).unwrap();
    assert!(api.contains("pub struct ApiVersionsRequest {"));
    assert!(api.contains("pub struct ApiVersionsResponse {"));
    assert!(api.contains("use kafkagen_protocol::{CodecError, Decoder, Encoder, Message};"));
    let headers = fs::read_to_string(ws.output("headers_gen.rs")).unwrap();
    assert!(headers.contains("pub struct RequestHeader {"));
}

#[test]
fn Generator___duplicate_request___fails_only_that_group() {
    let ws = Workspace::new();
    let duplicate = ws.schema(
        "Duplicate.json",
        r#"{ "apiKey": 1, "type": "request", "name": "FetchRequest", "validVersions": "0+" }"#,
    );
    let sources = vec![
        ws.api("request", "FetchRequest", 1),
        duplicate,
        ws.api("request", "ListOffsetsRequest", 2),
        ws.api("response", "ListOffsetsResponse", 2),
    ];

    let report = ws.generator().run(&sources);

    assert_eq!(report.failures.len(), 1, "{report:?}");
    assert!(matches!(
        report.failures[0].error,
        GenerateError::Conflict { slot: Slot::Request, .. }
    ));
    assert_eq!(report.written, vec![ws.output("list_offsets_gen.rs")]);
    assert_eq!(report.incomplete, vec!["api key 1 (missing response)".to_string()]);
}

#[test]
fn Generator___mismatched_base_names___is_name_mismatch() {
    let ws = Workspace::new();
    let sources = vec![
        ws.api("request", "ProduceRequest", 0),
        ws.api("response", "ProducedResponse", 0),
    ];

    let report = ws.generator().run(&sources);

    assert!(report.written.is_empty());
    assert_eq!(report.failures.len(), 1);
    match &report.failures[0].error {
        GenerateError::NameMismatch {
            api_key,
            request,
            response,
        } => {
            assert_eq!(*api_key, 0);
            assert_eq!(request, "Produce");
            assert_eq!(response, "Produced");
        }
        other => panic!("expected name mismatch, got {other:?}"),
    }
    assert_eq!(fs::read_dir(ws.dst.path()).unwrap().count(), 0);
}

#[test]
fn Generator___invalid_document___is_skipped_without_stopping_run() {
    let ws = Workspace::new();
    let bad = ws.schema(
        "Bad.json",
        r#"{ "type": "header", "name": "RequestHeader", "unknownKey": 1 }"#,
    );
    let sources = vec![
        bad.clone(),
        ws.api("request", "HeartbeatRequest", 12),
        ws.api("response", "HeartbeatResponse", 12),
    ];

    let report = ws.generator().run(&sources);

    assert_eq!(report.written, vec![ws.output("heartbeat_gen.rs")]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].source.as_deref(), Some(bad.as_path()));
    assert!(matches!(report.failures[0].error, GenerateError::Load { .. }));
}

#[test]
fn Generator___unexpected_header_name___is_fault() {
    let ws = Workspace::new();

    let result = ws.generator().process(&ws.header("EnvelopeHeader"));

    assert!(matches!(result, Err(GenerateError::Fault(_))));
}

#[test]
fn Generator___uncompilable_group___writes_nothing() {
    let ws = Workspace::new();
    let request = ws.schema(
        "SyncGroupRequest.json",
        r#"{ "apiKey": 14, "type": "request", "name": "SyncGroupRequest", "validVersions": "0+",
        "fields": [ { "name": "GroupId", "type": "string", "versions": "0+", "default": 7 } ] }"#,
    );
    let sources = vec![request, ws.api("response", "SyncGroupResponse", 14)];

    let report = ws.generator().run(&sources);

    assert!(report.written.is_empty());
    assert!(matches!(
        report.failures[0].error,
        GenerateError::Compile { .. }
    ));
    assert!(!ws.output("sync_group_gen.rs").exists());
}

#[test]
fn Generator___custom_options___change_names_and_runtime_path() {
    let ws = Workspace::new();
    let options = GeneratorOptions {
        compile: CompileOptions::new("crate::wire"),
        header_file_name: "hdr.rs".into(),
        file_suffix: ".rs".into(),
        request_header_name: "Req".into(),
        response_header_name: "Resp".into(),
    };
    let generator = Generator::new(ws.dst.path(), options);
    let sources = vec![
        ws.header("Req"),
        ws.header("Resp"),
        ws.api("request", "FindCoordinatorRequest", 10),
        ws.api("response", "FindCoordinatorResponse", 10),
    ];

    let report = generator.run(&sources);

    assert!(report.is_clean(), "{report:?}");
    assert!(ws.output("hdr.rs").exists());
    let api = fs::read_to_string(ws.output("find_coordinator.rs")).unwrap();
    assert!(api.contains("use crate::wire::{CodecError, Decoder, Encoder, Message};"));
}

#[test]
fn Generator___submit___routes_loaded_messages() {
    let ws = Workspace::new();
    let generator = ws.generator();
    let request = load_message(&ws.api("request", "DescribeGroupsRequest", 15)).unwrap();
    let response = load_message(&ws.api("response", "DescribeGroupsResponse", 15)).unwrap();

    assert_eq!(generator.submit(request).unwrap(), None);
    let written = generator.submit(response).unwrap();

    assert_eq!(written, Some(ws.output("describe_groups_gen.rs")));
}

#[test]
fn panic_message___reads_string_payloads() {
    let payload: Box<dyn Any + Send> = Box::new("boom");
    let owned: Box<dyn Any + Send> = Box::new(String::from("bang"));
    let other: Box<dyn Any + Send> = Box::new(7u8);

    assert_eq!(panic_message(payload.as_ref()), "worker panicked: boom");
    assert_eq!(panic_message(owned.as_ref()), "worker panicked: bang");
    assert_eq!(panic_message(other.as_ref()), "worker panicked");
}

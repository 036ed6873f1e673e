//! Concurrency and race condition tests
//!
//! These tests verify that racing fillers complete each group exactly once and
//! that a full run over many documents compiles every group a single time.

use kafkagen_core::MessageData;
use kafkagen_runtime::{ApiGroup, GenerateError, Generator, GeneratorOptions};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

fn api_message(kind: &str, name: &str, api_key: i16) -> MessageData {
    serde_json::from_str(&format!(
        r#"{{ "apiKey": {api_key}, "type": "{kind}", "name": "{name}", "validVersions": "0+" }}"#
    ))
    .unwrap()
}

#[test]
fn test_racing_pair_completes_exactly_once() {
    for _ in 0..100 {
        let group = Arc::new(ApiGroup::new(7));
        let barrier = Arc::new(Barrier::new(2));
        let completions = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = [("request", "JoinGroupRequest"), ("response", "JoinGroupResponse")]
            .into_iter()
            .map(|(kind, name)| {
                let group = group.clone();
                let barrier = barrier.clone();
                let completions = completions.clone();
                thread::spawn(move || {
                    let msg = api_message(kind, name, 7);
                    barrier.wait();
                    if group.fill(msg).unwrap().is_some() {
                        completions.fetch_add(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(completions.load(Ordering::SeqCst), 1);
    }
}

#[test]
fn test_racing_fillers_of_one_slot_admit_exactly_one() {
    let num_threads = 16;
    let group = Arc::new(ApiGroup::new(9));
    let barrier = Arc::new(Barrier::new(num_threads));

    let handles: Vec<_> = (0..num_threads)
        .map(|i| {
            let group = group.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                let msg = api_message("request", &format!("Request{i}"), 9);
                barrier.wait();
                group.fill(msg)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let admitted = results.iter().filter(|r| matches!(r, Ok(None))).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(GenerateError::Conflict { .. })))
        .count();
    assert_eq!(admitted, 1);
    assert_eq!(conflicts, num_threads - 1);
}

#[test]
fn test_racing_second_slot_fillers_compile_exactly_once() {
    let dst = tempfile::TempDir::new().unwrap();
    let generator = Generator::new(dst.path(), GeneratorOptions::default());
    let num_threads = 12;
    let barrier = Barrier::new(num_threads);

    let first = generator
        .submit(api_message("response", "JoinGroupResponse", 11))
        .unwrap();
    assert_eq!(first, None);

    let (generator, barrier) = (&generator, &barrier);
    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..num_threads)
            .map(|_| {
                scope.spawn(move || {
                    let msg = api_message("request", "JoinGroupRequest", 11);
                    barrier.wait();
                    generator.submit(msg)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let written = results.iter().filter(|r| matches!(r, Ok(Some(_)))).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(GenerateError::Conflict { .. })))
        .count();
    assert_eq!(written, 1);
    assert_eq!(conflicts, num_threads - 1);
    assert_eq!(generator.compiled_groups(), 1);
    assert!(dst.path().join("join_group_gen.rs").exists());
}

#[test]
fn test_run_over_many_groups_compiles_each_once() {
    let src = tempfile::TempDir::new().unwrap();
    let dst = tempfile::TempDir::new().unwrap();
    let groups = 24;

    let mut sources = Vec::new();
    for key in 0..groups {
        for (kind, suffix) in [("request", "Request"), ("response", "Response")] {
            let name = format!("Api{key}{suffix}");
            let path = src.path().join(format!("{name}.json"));
            let body = format!(
                r#"{{ "apiKey": {key}, "type": "{kind}", "name": "{name}", "validVersions": "0-2",
                "fields": [ {{ "name": "Items", "type": "[]string", "versions": "1+" }} ] }}"#
            );
            std::fs::write(&path, body).unwrap();
            sources.push(path);
        }
    }
    let generator = Generator::new(dst.path(), GeneratorOptions::default());

    let report = generator.run(&sources);

    assert!(report.is_clean(), "{report:?}");
    assert_eq!(report.written.len(), groups as usize);
    assert_eq!(generator.compiled_groups(), groups as usize);
    assert_eq!(std::fs::read_dir(dst.path()).unwrap().count(), groups as usize);
}

//! Generates the bundled messages from `schemas/` into `OUT_DIR`.

use kafkagen_codegen::CompileOptions;
use kafkagen_runtime::{Generator, GeneratorOptions};
use std::error::Error;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn Error>> {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);
    let schema_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR")?).join("schemas");
    println!("cargo:rerun-if-changed={}", schema_dir.display());

    let mut sources = Vec::new();
    for entry in std::fs::read_dir(&schema_dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            println!("cargo:rerun-if-changed={}", path.display());
            sources.push(path);
        }
    }
    sources.sort();

    let options = GeneratorOptions {
        compile: CompileOptions::new("crate"),
        ..GeneratorOptions::default()
    };
    let report = Generator::new(&out_dir, options).run(&sources);

    if !report.is_clean() {
        let mut problems: Vec<String> = report
            .failures
            .iter()
            .map(|failure| match &failure.source {
                Some(source) => format!("{}: {}", source.display(), failure.error),
                None => failure.error.to_string(),
            })
            .collect();
        problems.extend(report.incomplete.iter().map(|group| format!("incomplete: {group}")));
        return Err(problems.join("\n").into());
    }
    Ok(())
}

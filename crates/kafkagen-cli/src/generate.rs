//! Generate command implementation

use crate::config::GeneratorConfig;
use anyhow::{Context, Result};
use kafkagen_runtime::{Generator, RunReport};
use std::path::{Path, PathBuf};

/// Compile every source into `dst`.
///
/// Only an unusable destination is an error; per-document failures are
/// returned in the report.
pub fn run(config: &GeneratorConfig, dst: &Path, sources: &[PathBuf]) -> Result<RunReport> {
    prepare_destination(dst)?;

    tracing::info!(
        dst = %dst.display(),
        sources = sources.len(),
        "generating"
    );
    let generator = Generator::new(dst, config.to_options());
    Ok(generator.run(sources))
}

fn prepare_destination(dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst)
        .with_context(|| format!("Failed to create destination: {}", dst.display()))?;

    let metadata = std::fs::metadata(dst)
        .with_context(|| format!("Failed to inspect destination: {}", dst.display()))?;
    if metadata.permissions().readonly() {
        anyhow::bail!("Destination is read-only: {}", dst.display());
    }
    Ok(())
}

/// One-line summary printed after a run.
pub fn summary(report: &RunReport) -> String {
    let mut line = format!(
        "{} file(s) written, {} failure(s)",
        report.written.len(),
        report.failures.len()
    );
    if !report.incomplete.is_empty() {
        line.push_str(&format!(", {} incomplete group(s)", report.incomplete.len()));
    }
    line
}

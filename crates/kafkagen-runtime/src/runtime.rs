//! Generation runs
//!
//! [`Generator::run`] loads every document on its own scoped thread and routes
//! it into a group. The worker whose message completes a group compiles the
//! pair and writes the file; no lock is held while it does.

use crate::error::{GenerateError, GenerateResult};
use crate::group::{ApiGroup, CompletedPair, HeaderGroup, Slot};
use dashmap::DashMap;
use kafkagen_codegen::{CompileOptions, compile_group};
use kafkagen_core::naming::to_snake_case;
use kafkagen_core::{MessageData, MessageKind, load_message};
use std::any::Any;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Options for a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub compile: CompileOptions,
    /// File name of the header artifact.
    pub header_file_name: String,
    /// Appended to the snake_case base name of API artifacts.
    pub file_suffix: String,
    pub request_header_name: String,
    pub response_header_name: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            compile: CompileOptions::default(),
            header_file_name: "headers_gen.rs".to_string(),
            file_suffix: "_gen.rs".to_string(),
            request_header_name: "RequestHeader".to_string(),
            response_header_name: "ResponseHeader".to_string(),
        }
    }
}

/// A failure tied to a source document, when one is known.
#[derive(Debug)]
pub struct Failure {
    pub source: Option<PathBuf>,
    pub error: GenerateError,
}

/// Outcome of [`Generator::run`].
#[derive(Debug, Default)]
pub struct RunReport {
    /// Files written, in completion order.
    pub written: Vec<PathBuf>,
    pub failures: Vec<Failure>,
    /// Groups that never received their second message.
    pub incomplete: Vec<String>,
}

impl RunReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.incomplete.is_empty()
    }
}

/// Routes loaded documents into groups and emits completed groups.
pub struct Generator {
    dst: PathBuf,
    options: GeneratorOptions,
    apis: DashMap<i16, Arc<ApiGroup>>,
    headers: HeaderGroup,
    compiled: AtomicUsize,
}

impl Generator {
    pub fn new(dst: impl Into<PathBuf>, options: GeneratorOptions) -> Self {
        let headers = HeaderGroup::new(
            options.request_header_name.clone(),
            options.response_header_name.clone(),
        );
        Self {
            dst: dst.into(),
            options,
            apis: DashMap::new(),
            headers,
            compiled: AtomicUsize::new(0),
        }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Number of groups compiled so far.
    pub fn compiled_groups(&self) -> usize {
        self.compiled.load(Ordering::SeqCst)
    }

    /// Process every source concurrently, one thread per document.
    ///
    /// Failures are collected and logged; they never stop sibling documents.
    pub fn run<P: AsRef<Path> + Sync>(&self, sources: &[P]) -> RunReport {
        let mut report = RunReport::default();

        std::thread::scope(|scope| {
            let workers: Vec<_> = sources
                .iter()
                .map(|source| {
                    let path = source.as_ref();
                    (path, scope.spawn(move || self.process(path)))
                })
                .collect();

            for (path, worker) in workers {
                let result = worker
                    .join()
                    .unwrap_or_else(|payload| Err(GenerateError::Fault(panic_message(payload.as_ref()))));
                match result {
                    Ok(Some(written)) => report.written.push(written),
                    Ok(None) => {}
                    Err(error) => {
                        if error.is_group_fatal() {
                            tracing::error!(source = %path.display(), %error, "group aborted");
                        } else {
                            tracing::error!(source = %path.display(), %error, "document skipped");
                        }
                        report.failures.push(Failure {
                            source: Some(path.to_path_buf()),
                            error,
                        });
                    }
                }
            }
        });

        report.incomplete = self.incomplete_groups();
        for group in &report.incomplete {
            tracing::warn!(%group, "group incomplete, nothing generated");
        }
        tracing::info!(
            written = report.written.len(),
            failures = report.failures.len(),
            "generation finished"
        );
        report
    }

    /// Load one document and route it.
    ///
    /// Returns the written path when this document completed its group.
    pub fn process(&self, path: &Path) -> GenerateResult<Option<PathBuf>> {
        let msg = load_message(path).map_err(|source| GenerateError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        self.submit(msg)
    }

    /// Route an already loaded message.
    pub fn submit(&self, msg: MessageData) -> GenerateResult<Option<PathBuf>> {
        match msg.kind {
            MessageKind::Header => match self.headers.fill(msg)? {
                Some(pair) => {
                    let path = self.dst.join(&self.options.header_file_name);
                    self.emit("headers", path, &pair).map(Some)
                }
                None => Ok(None),
            },
            MessageKind::Request | MessageKind::Response => {
                let api_key = msg.api_key.ok_or_else(|| {
                    GenerateError::Fault(format!("{} {} has no api key", msg.kind, msg.name))
                })?;
                let group = self
                    .apis
                    .entry(api_key)
                    .or_insert_with(|| Arc::new(ApiGroup::new(api_key)))
                    .clone();

                match group.fill(msg)? {
                    Some(pair) => {
                        let path = self.dst.join(self.api_file_name(api_key, &pair)?);
                        self.emit(&format!("api key {api_key}"), path, &pair).map(Some)
                    }
                    None => Ok(None),
                }
            }
        }
    }

    fn api_file_name(&self, api_key: i16, pair: &CompletedPair) -> GenerateResult<String> {
        let request = pair.request.base_name();
        let response = pair.response.base_name();
        if request != response {
            return Err(GenerateError::NameMismatch {
                api_key,
                request: request.to_string(),
                response: response.to_string(),
            });
        }
        Ok(format!("{}{}", to_snake_case(request), self.options.file_suffix))
    }

    fn emit(&self, group: &str, path: PathBuf, pair: &CompletedPair) -> GenerateResult<PathBuf> {
        let wrap = |source| GenerateError::Compile {
            group: group.to_string(),
            source,
        };

        self.compiled.fetch_add(1, Ordering::SeqCst);
        let file = compile_group(
            &path,
            &[pair.request.as_ref(), pair.response.as_ref()],
            &self.options.compile,
        )
        .map_err(wrap)?;
        file.persist().map_err(wrap)?;

        tracing::info!(%group, path = %path.display(), "wrote generated file");
        Ok(path)
    }

    fn incomplete_groups(&self) -> Vec<String> {
        let mut incomplete: Vec<(i16, Slot)> = self
            .apis
            .iter()
            .filter_map(|entry| entry.value().missing().map(|slot| (*entry.key(), slot)))
            .collect();
        incomplete.sort_unstable_by_key(|(key, _)| *key);

        let mut names: Vec<String> = incomplete
            .into_iter()
            .map(|(key, slot)| format!("api key {key} (missing {slot})"))
            .collect();
        if let Some(slot) = self.headers.missing() {
            names.push(format!("headers (missing {slot})"));
        }
        names
    }
}

/// Extract a readable message from a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("worker panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("worker panicked: {s}")
    } else {
        "worker panicked".to_string()
    }
}

#[cfg(test)]
#[path = "runtime/runtime_tests.rs"]
mod runtime_tests;

//! Configuration file parsing

use anyhow::{Context, Result};
use kafkagen_codegen::CompileOptions;
use kafkagen_logging::LogLevel;
use kafkagen_runtime::GeneratorOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// kafkagen.toml structure
///
/// Every key is optional; missing keys take the generator defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Crate path generated code imports the codec from
    pub runtime_path: String,
    pub header_file_name: String,
    pub file_suffix: String,
    pub request_header_name: String,
    pub response_header_name: String,
    pub log_level: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let options = GeneratorOptions::default();
        Self {
            runtime_path: options.compile.runtime_path,
            header_file_name: options.header_file_name,
            file_suffix: options.file_suffix,
            request_header_name: options.request_header_name,
            response_header_name: options.response_header_name,
            log_level: LogLevel::default().as_str().to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Load config from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Invalid config: {}", path.display()))
    }

    /// Parse and validate config from a string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the config
    pub fn validate(&self) -> Result<()> {
        if self.runtime_path.trim().is_empty() {
            anyhow::bail!("runtime_path cannot be empty");
        }
        if self.header_file_name.trim().is_empty() {
            anyhow::bail!("header_file_name cannot be empty");
        }
        if self.request_header_name == self.response_header_name {
            anyhow::bail!(
                "request and response headers must differ (both are {})",
                self.request_header_name
            );
        }
        self.level()?;
        Ok(())
    }

    /// The configured log level
    pub fn level(&self) -> Result<LogLevel> {
        self.log_level
            .parse()
            .with_context(|| format!("Invalid log_level: {}", self.log_level))
    }

    pub fn to_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            compile: CompileOptions::new(self.runtime_path.clone()),
            header_file_name: self.header_file_name.clone(),
            file_suffix: self.file_suffix.clone(),
            request_header_name: self.request_header_name.clone(),
            response_header_name: self.response_header_name.clone(),
        }
    }
}

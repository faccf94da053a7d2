use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("cannot parse config {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_input_folder")]
    pub input_folder: String,
    #[serde(default = "default_output_file")]
    pub output_file: String,
    #[serde(default = "default_categories_file")]
    pub categories_file: String,
    #[serde(default)]
    pub report: ReportSection,
    #[serde(default)]
    pub processing: ProcessingSection,
}

fn default_input_folder() -> String {
    "input".to_string()
}

fn default_output_file() -> String {
    "results/output.csv".to_string()
}

fn default_categories_file() -> String {
    "config.kolory.txt".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReportSection {
    /// When off, categories that never contributed are dropped from the
    /// rendered report. They are always present in the in-memory totals.
    pub include_zero_categories: bool,
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            include_zero_categories: true,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ProcessingSection {
    /// Worker-pool bound; `None` means one worker per CPU.
    pub max_concurrent: Option<usize>,
    /// Per-document deadline. A document that exceeds it counts as zero.
    pub document_timeout_secs: u64,
}

impl Default for ProcessingSection {
    fn default() -> Self {
        Self {
            max_concurrent: None,
            document_timeout_secs: 60,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

//! Persisting a [`CombinedOutput`] to disk

use super::combined::{render_text, CombinedOutput};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

const FILE_STEM_PREFIX: &str = "credit_report_langgraph_";

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize combined output: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A file format the writer can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn all() -> Vec<OutputFormat> {
        vec![OutputFormat::Text, OutputFormat::Json]
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "Unknown output format '{}'. Valid formats: text, json",
                other
            )),
        }
    }
}

/// Paths written by [`OutputWriter::write`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrittenOutputs {
    pub text_path: Option<PathBuf>,
    pub json_path: Option<PathBuf>,
}

impl WrittenOutputs {
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.text_path
            .iter()
            .chain(self.json_path.iter())
            .map(PathBuf::as_path)
    }
}

/// Writes combined outputs under one directory
///
/// File names derive from the combined timestamp at second resolution, so
/// writing the same output twice replaces the same files and two runs within
/// one second into the same directory collide.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    output_dir: PathBuf,
    formats: Vec<OutputFormat>,
}

impl OutputWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            formats: OutputFormat::all(),
        }
    }

    pub fn with_formats(mut self, formats: Vec<OutputFormat>) -> Self {
        self.formats = formats;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn path_for(&self, combined: &CombinedOutput, format: OutputFormat) -> PathBuf {
        let stamp = combined.timestamp().format("%Y%m%d%H%M%S");
        self.output_dir.join(format!(
            "{}{}.{}",
            FILE_STEM_PREFIX,
            stamp,
            format.extension()
        ))
    }

    pub fn write(&self, combined: &CombinedOutput) -> Result<WrittenOutputs, OutputError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| OutputError::Io {
            path: self.output_dir.clone(),
            source,
        })?;

        let mut written = WrittenOutputs::default();

        if self.formats.contains(&OutputFormat::Text) {
            let path = self.path_for(combined, OutputFormat::Text);
            write_file(&path, render_text(combined).as_bytes())?;
            info!("Text output saved to: {}", path.display());
            written.text_path = Some(path);
        }

        if self.formats.contains(&OutputFormat::Json) {
            let path = self.path_for(combined, OutputFormat::Json);
            let json = serde_json::to_string_pretty(combined)?;
            write_file(&path, json.as_bytes())?;
            info!("JSON output saved to: {}", path.display());
            written.json_path = Some(path);
        }

        Ok(written)
    }
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), OutputError> {
    fs::write(path, contents).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a combined output previously written as JSON
pub fn read_combined(path: &Path) -> Result<CombinedOutput, OutputError> {
    let content = fs::read_to_string(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

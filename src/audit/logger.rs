// Exchange log for model-backed stages
use chrono::Utc;
use serde::{Serialize, Serializer};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

#[derive(Serialize)]
struct ExchangeEntry<'a, I, O>
where
    I: Serialize,
    O: Serialize,
{
    stage: &'a str,
    #[serde(serialize_with = "serialize_as_json")]
    request: &'a I,
    #[serde(serialize_with = "serialize_as_json")]
    response: &'a O,
    latency_ms: u64,
    timestamp: String,
}

fn serialize_as_json<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    let json_string = serde_json::to_string(value).map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&json_string)
}

/// Appends one JSON line per model exchange to a file
///
/// A logger whose file cannot be opened degrades to a disabled one; logging
/// never fails a stage.
pub struct ExchangeLogger {
    writer: Option<Mutex<BufWriter<File>>>,
    path: Option<PathBuf>,
}

impl ExchangeLogger {
    pub fn new(log_file: Option<PathBuf>) -> Self {
        let Some(path) = log_file else {
            return Self::disabled();
        };

        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => Self {
                writer: Some(Mutex::new(BufWriter::new(file))),
                path: Some(path),
            },
            Err(e) => {
                warn!("Failed to open exchange log {}: {}", path.display(), e);
                Self::disabled()
            }
        }
    }

    pub fn disabled() -> Self {
        Self {
            writer: None,
            path: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn log_exchange<I, O>(&self, stage: &str, request: &I, response: &O, latency_ms: u64)
    where
        I: Serialize,
        O: Serialize,
    {
        let Some(writer) = &self.writer else {
            return;
        };

        let entry = ExchangeEntry {
            stage,
            request,
            response,
            latency_ms,
            timestamp: Utc::now().to_rfc3339(),
        };

        let json = match serde_json::to_string(&entry) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize exchange entry for stage {}: {}", stage, e);
                return;
            }
        };

        let mut writer = writer.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = writeln!(writer, "{}", json) {
            warn!("Failed to write exchange log entry: {}", e);
        }
        if let Err(e) = writer.flush() {
            warn!("Failed to flush exchange log: {}", e);
        }

        debug!("Exchange log: stage={} latency_ms={}", stage, latency_ms);
    }
}

impl std::fmt::Debug for ExchangeLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeLogger")
            .field("path", &self.path)
            .finish()
    }
}

//! Locating and reading the credit report under assessment

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Extensions searched when none are given explicitly
pub const DEFAULT_EXTENSIONS: &[&str] = &["txt", "md"];

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("No document found in searched directories:\n  {}", join_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join("\n  ")
}

/// Returns the first matching file of the first directory that has one
///
/// Files are matched by extension, case-insensitively, and taken in name
/// order. Directories that do not exist or cannot be listed are skipped.
pub fn find_document(
    search_dirs: &[PathBuf],
    extensions: &[&str],
) -> Result<PathBuf, DocumentError> {
    for directory in search_dirs {
        info!("Searching for document in: {}", directory.display());

        if !directory.is_dir() {
            warn!("Directory does not exist: {}", directory.display());
            continue;
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Error searching directory {}: {}", directory.display(), e);
                continue;
            }
        };

        let mut candidates: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && has_extension(path, extensions))
            .collect();
        candidates.sort();

        if let Some(found) = candidates.into_iter().next() {
            info!("Found document: {}", found.display());
            return Ok(found);
        }
    }

    Err(DocumentError::NotFound {
        searched: search_dirs.to_vec(),
    })
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Reads the document's text
///
/// A failure does not stop the run: the returned text then describes the
/// error and is assessed like any other document content.
pub fn read_document_text(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(text) => {
            debug!("Read {} chars from {}", text.len(), path.display());
            text
        }
        Err(e) => {
            warn!("Failed to read document {}: {}", path.display(), e);
            format!("Error extracting text from document: {}", e)
        }
    }
}

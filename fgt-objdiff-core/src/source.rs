use std::fs;
use std::path::Path;

use thiserror::Error;

const UTF8_BOM: &str = "\u{feff}";

/// Errors that can occur while acquiring configuration text.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The file could not be read at all.
    #[error("failed to read config file {path}: {source}")]
    Unreadable {
        path: String,
        source: std::io::Error,
    },
}

/// Decode configuration bytes, replacing invalid UTF-8 sequences.
///
/// Device dumps occasionally contain latin-1 comments; they must never abort a run.
pub fn decode_lossy(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    match text.strip_prefix(UTF8_BOM) {
        Some(stripped) => stripped.to_string(),
        None => text.into_owned(),
    }
}

/// Read a configuration file and decode it permissively.
pub fn load_file(path: &Path) -> Result<String, SourceError> {
    let bytes = fs::read(path).map_err(|source| SourceError::Unreadable {
        path: path.display().to_string(),
        source,
    })?;
    Ok(decode_lossy(&bytes))
}

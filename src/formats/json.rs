// JSON export/import of a decoded codeplug

use crate::core::Codeplug;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, JsonError>;

/// Serialize a codeplug as pretty-printed JSON
pub fn to_json(codeplug: &Codeplug) -> Result<String> {
    Ok(serde_json::to_string_pretty(codeplug)?)
}

/// Parse a codeplug from JSON. DTMF codes and tones are validated here.
pub fn from_json(json: &str) -> Result<Codeplug> {
    Ok(serde_json::from_str(json)?)
}

/// Write a codeplug to a JSON file
pub fn export_json(filename: impl AsRef<Path>, codeplug: &Codeplug) -> Result<()> {
    let path = filename.as_ref();
    fs::write(path, to_json(codeplug)?)?;
    tracing::info!(
        "Exported {} programmed channels to {}",
        codeplug.programmed_channels().count(),
        path.display()
    );
    Ok(())
}

/// Read a codeplug from a JSON file
pub fn import_json(filename: impl AsRef<Path>) -> Result<Codeplug> {
    let path = filename.as_ref();
    let codeplug = from_json(&fs::read_to_string(path)?)?;
    tracing::info!(
        "Imported {} programmed channels from {}",
        codeplug.programmed_channels().count(),
        path.display()
    );
    Ok(codeplug)
}

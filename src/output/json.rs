//! JSON index persistence

use crate::output::record::DocumentRecord;
use crate::output::write_atomic;
use crate::Result;
use std::path::Path;

/// Writes the index as a pretty-printed JSON array
///
/// The file is replaced atomically, so a crash mid-write leaves the previous
/// index in place.
pub fn write_json_index(records: &[DocumentRecord], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    write_atomic(path, json.as_bytes())?;
    tracing::info!("Index saved to: {}", path.display());
    Ok(())
}

/// Reads a JSON index
///
/// # Returns
///
/// * `Ok(None)` - No index file exists
/// * `Ok(Some(records))` - Parsed index
/// * `Err(ScraperError)` - The file could not be read or is not a valid index
pub fn read_json_index(path: &Path) -> Result<Option<Vec<DocumentRecord>>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    let records = serde_json::from_str(&content)?;
    Ok(Some(records))
}

//! Output module for the document index
//!
//! This module handles:
//! - The per-document index record
//! - Writing the index as JSON and as a flattened CSV
//! - Summarizing an existing index

mod csv;
mod json;
mod record;
pub mod stats;

pub use csv::{format_csv, write_csv_index, CSV_HEADER};
pub use json::{read_json_index, write_json_index};
pub use record::{Attachment, DocumentRecord};
pub use stats::{compute_statistics, print_statistics, IndexStatistics};

use crate::config::OutputConfig;
use crate::Result;
use std::io::Write;
use std::path::Path;

/// Writes the JSON and CSV indexes for the accumulated records
///
/// Both files are overwritten, never appended to. The JSON index is written
/// first and the CSV is attempted even when it fails; the first error is
/// returned.
pub fn write_index(records: &[DocumentRecord], output: &OutputConfig) -> Result<()> {
    std::fs::create_dir_all(&output.directory)?;
    let json = write_json_index(records, &output.index_json_path());
    let csv = write_csv_index(records, &output.index_csv_path());
    json.and(csv)
}

/// Replaces a file's content through a sibling temporary file and a rename
pub(crate) fn write_atomic(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut tmp_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    {
        let mut file = std::fs::File::create(&tmp_path)?;
        file.write_all(content)?;
        file.sync_all()?;
    }

    std::fs::rename(&tmp_path, path)
}

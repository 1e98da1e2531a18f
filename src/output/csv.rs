//! Flattened CSV index
//!
//! One row per attachment, or a single row with empty file columns for a
//! document without attachments.

use crate::output::record::DocumentRecord;
use crate::output::write_atomic;
use crate::Result;
use std::path::Path;

/// Header row of the CSV index
pub const CSV_HEADER: &str = "Título,Pasta,PDF,Tipo do Arquivo,Caminho do Arquivo,Página";

/// Writes the flattened CSV index
pub fn write_csv_index(records: &[DocumentRecord], path: &Path) -> Result<()> {
    let csv = format_csv(records);
    write_atomic(path, csv.as_bytes())?;
    tracing::info!("CSV saved to: {}", path.display());
    Ok(())
}

/// Formats the records as CSV text, header included
pub fn format_csv(records: &[DocumentRecord]) -> String {
    let mut csv = String::new();
    csv.push_str(CSV_HEADER);
    csv.push('\n');

    for record in records {
        let title = quote(&record.title);
        let folder = quote(&record.folder_path);
        let pdf = quote(&record.primary_pdf_path);

        if record.attachments.is_empty() {
            csv.push_str(&format!(
                "{},{},{},,,{}\n",
                title, folder, pdf, record.page_number
            ));
            continue;
        }

        for attachment in &record.attachments {
            csv.push_str(&format!(
                "{},{},{},{},{},{}\n",
                title,
                folder,
                pdf,
                quote(&attachment.kind),
                quote(&attachment.path),
                record.page_number
            ));
        }
    }

    csv
}

/// Wraps a field in double quotes, doubling embedded quotes
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

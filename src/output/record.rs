use serde::{Deserialize, Serialize};

/// A file downloaded for a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// File kind inferred from the link text (also the file extension)
    #[serde(rename = "tipo")]
    pub kind: String,

    /// Local path of the file
    #[serde(rename = "caminho")]
    pub path: String,
}

impl Attachment {
    pub fn new(kind: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            path: path.into(),
        }
    }
}

/// Index entry for one harvested document
///
/// Serialized with the field names of the `documentos_info.json` format so
/// that indexes written by earlier runs can be resumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    #[serde(rename = "titulo")]
    pub title: String,

    /// Folder holding every file of the document
    #[serde(rename = "pasta")]
    pub folder_path: String,

    /// Rendered or exported page PDF, empty when none was produced
    #[serde(rename = "pdf", default)]
    pub primary_pdf_path: String,

    #[serde(rename = "documentos", default)]
    pub attachments: Vec<Attachment>,

    /// Listing page the document was found on
    #[serde(rename = "pagina")]
    pub page_number: u32,
}

impl DocumentRecord {
    /// Number of CSV rows this record expands to
    pub fn csv_row_count(&self) -> usize {
        self.attachments.len().max(1)
    }
}

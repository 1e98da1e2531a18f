//! Harvest module: walking listings and fetching documents
//!
//! This module contains the core harvesting logic, including:
//! - Listing and detail page extraction
//! - File kind classification from link text
//! - File name sanitization
//! - Per-document downloads
//! - The page-by-page coordinator

mod classify;
mod detail;
mod documents;
mod listing;
mod sanitize;
mod walker;

pub use classify::Classifier;
pub use detail::{extract_attachment_links, extract_export_pdf_link, AttachmentLink};
pub use documents::DocumentFetcher;
pub use listing::{extract_documents, DocumentDescriptor};
pub use sanitize::sanitize_file_name;
pub use walker::{Harvester, RunOptions, RunSummary};

use crate::browser::Chrome;
use crate::config::Config;
use crate::Result;

/// Runs a complete harvest with the default page renderer
///
/// Page rendering uses the configured Chrome executable, or one found in
/// PATH. When rendering is enabled but no browser is available the run goes
/// on without page PDFs.
pub async fn harvest(config: Config, options: RunOptions) -> Result<RunSummary> {
    let renderer = if config.render.enabled {
        match &config.render.chrome_path {
            Some(path) => Some(Chrome::at(path)),
            None => match Chrome::discover() {
                Ok(chrome) => Some(chrome),
                Err(e) => {
                    tracing::warn!("{}; page PDFs will not be rendered", e);
                    None
                }
            },
        }
    } else {
        None
    };

    let mut harvester = Harvester::new(config, renderer)?;
    harvester.run(options).await
}

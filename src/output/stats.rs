//! Statistics over a harvested index
//!
//! This module summarizes an existing index for the `--stats` mode.

use crate::output::record::DocumentRecord;
use std::collections::BTreeMap;

/// Index statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexStatistics {
    /// Number of documents in the index
    pub total_documents: u64,

    /// Number of attachment entries across all documents
    pub total_attachments: u64,

    /// Documents with a page PDF
    pub documents_with_page_pdf: u64,

    /// Documents without any attachment
    pub documents_without_attachments: u64,

    /// Attachment count by file kind
    pub attachments_by_kind: BTreeMap<String, u64>,

    /// Document count by listing page
    pub documents_by_page: BTreeMap<u32, u64>,
}

impl IndexStatistics {
    /// Last listing page present in the index
    pub fn last_page(&self) -> Option<u32> {
        self.documents_by_page.keys().next_back().copied()
    }

    /// Rows the CSV index has for these documents
    pub fn csv_rows(&self) -> u64 {
        self.total_attachments + self.documents_without_attachments
    }
}

/// Computes statistics for a list of records
pub fn compute_statistics(records: &[DocumentRecord]) -> IndexStatistics {
    let mut stats = IndexStatistics::default();

    for record in records {
        stats.total_documents += 1;
        stats.total_attachments += record.attachments.len() as u64;

        if !record.primary_pdf_path.is_empty() {
            stats.documents_with_page_pdf += 1;
        }
        if record.attachments.is_empty() {
            stats.documents_without_attachments += 1;
        }

        for attachment in &record.attachments {
            *stats
                .attachments_by_kind
                .entry(attachment.kind.clone())
                .or_insert(0) += 1;
        }

        *stats.documents_by_page.entry(record.page_number).or_insert(0) += 1;
    }

    stats
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &IndexStatistics) {
    println!("=== Index Statistics ===\n");

    println!("Overview:");
    println!("  Documents: {}", stats.total_documents);
    println!("  Attachments: {}", stats.total_attachments);
    println!("  Documents with page PDF: {}", stats.documents_with_page_pdf);
    println!(
        "  Documents without attachments: {}",
        stats.documents_without_attachments
    );
    println!("  CSV rows: {}", stats.csv_rows());
    println!();

    if !stats.attachments_by_kind.is_empty() {
        println!("Attachments by Kind:");
        for (kind, count) in &stats.attachments_by_kind {
            println!("  {}: {}", kind, count);
        }
        println!();
    }

    match stats.last_page() {
        Some(last) => println!(
            "Pages: {} distinct, last page {}",
            stats.documents_by_page.len(),
            last
        ),
        None => println!("Pages: none"),
    }
}

//! Detail page extraction

use crate::browser::{element_text, LoadedPage};
use crate::harvest::classify::Classifier;
use crate::harvest::listing::{anchor_url, create_selector};
use crate::Result;
use url::Url;

/// Anchor pointing to the "export as PDF" version of a detail page
const EXPORT_PDF_SELECTOR: &str = r#"a[href*="?Export=Pdf"]"#;

/// Rows of the attachment table, the first anchor of each row is the file
const ATTACHMENT_ROW_SELECTOR: &str = ".table-striped tbody tr";

/// A downloadable file listed on a detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentLink {
    /// Trimmed link text
    pub text: String,
    pub url: Url,
    /// Kind inferred from the link text
    pub kind: String,
}

/// Extracts the attachment links of a detail page
pub fn extract_attachment_links(
    page: &LoadedPage,
    classifier: &Classifier,
) -> Result<Vec<AttachmentLink>> {
    let document = page.document();
    let row_selector = create_selector(ATTACHMENT_ROW_SELECTOR)?;
    let anchor_selector = create_selector("a")?;

    let mut links = Vec::new();
    for row in document.select(&row_selector) {
        let Some(anchor) = row.select(&anchor_selector).next() else {
            continue;
        };
        let Some(url) = anchor_url(&anchor, page.url()) else {
            tracing::debug!("Skipping attachment row without a usable link");
            continue;
        };

        let text = element_text(&anchor);
        let kind = classifier.classify(&text).to_string();
        links.push(AttachmentLink { text, url, kind });
    }

    Ok(links)
}

/// Finds the export-as-PDF link of a detail page
pub fn extract_export_pdf_link(page: &LoadedPage) -> Result<Option<Url>> {
    let document = page.document();
    let selector = create_selector(EXPORT_PDF_SELECTOR)?;

    Ok(document
        .select(&selector)
        .next()
        .and_then(|anchor| anchor_url(&anchor, page.url())))
}

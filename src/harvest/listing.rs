//! Listing page extraction
//!
//! Turns a loaded listing page into the documents it enumerates. The layout
//! depends on the portal:
//!
//! - **proposituras**: one `.data-list-item` per document, the title anchor
//!   inside its `h4` links to the detail page.
//! - **normas**: one `.normas-lista` per document; the first anchor links to
//!   the detail page and the third to the document's PDF. Entries missing
//!   either link are skipped.

use crate::browser::{element_text, resolve_link, LoadedPage};
use crate::config::SiteKind;
use crate::{Result, ScraperError};
use scraper::{ElementRef, Selector};
use url::Url;

/// A document found on a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentDescriptor {
    pub title: String,

    /// Detail page of the document
    pub detail_url: Url,

    /// Direct link to the document file, when the listing provides one
    pub pdf_url: Option<Url>,
}

/// Extracts the documents listed on a page
pub fn extract_documents(page: &LoadedPage, kind: SiteKind) -> Result<Vec<DocumentDescriptor>> {
    tracing::debug!("Extracting documents from {}", page.url());
    match kind {
        SiteKind::Proposituras => extract_data_list(page),
        SiteKind::Normas => extract_normas_list(page),
    }
}

fn extract_data_list(page: &LoadedPage) -> Result<Vec<DocumentDescriptor>> {
    let document = page.document();
    let anchor_selector = create_selector(".data-list-item h4 a")?;

    let documents = document
        .select(&anchor_selector)
        .filter_map(|anchor| {
            let detail_url = anchor_url(&anchor, page.url())?;
            Some(DocumentDescriptor {
                title: element_text(&anchor),
                detail_url,
                pdf_url: None,
            })
        })
        .collect();

    Ok(documents)
}

fn extract_normas_list(page: &LoadedPage) -> Result<Vec<DocumentDescriptor>> {
    let document = page.document();
    let item_selector = create_selector(".normas-lista")?;
    let anchor_selector = create_selector("a")?;

    let mut documents = Vec::new();
    for item in document.select(&item_selector) {
        let anchors: Vec<ElementRef<'_>> = item.select(&anchor_selector).collect();

        let detail = anchors.first().and_then(|a| anchor_url(a, page.url()));
        let pdf = anchors.get(2).and_then(|a| anchor_url(a, page.url()));

        match (detail, pdf) {
            (Some(detail_url), Some(pdf_url)) => documents.push(DocumentDescriptor {
                title: element_text(&anchors[0]),
                detail_url,
                pdf_url: Some(pdf_url),
            }),
            _ => tracing::debug!("Skipping listing entry without detail and PDF links"),
        }
    }

    Ok(documents)
}

pub(crate) fn anchor_url(anchor: &ElementRef<'_>, base_url: &Url) -> Option<Url> {
    anchor
        .value()
        .attr("href")
        .and_then(|href| resolve_link(href, base_url))
}

pub(crate) fn create_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|_| ScraperError::Selector(selector.to_string()))
}

//! Loaded page handle
//!
//! A loaded page keeps the final URL and the raw HTML of a navigation. DOM
//! queries parse the HTML on demand, so the handle stays cheap to hold across
//! awaits.

use scraper::{Html, Selector};
use url::Url;

/// A page that finished loading
#[derive(Debug, Clone)]
pub struct LoadedPage {
    url: Url,
    html: String,
}

impl LoadedPage {
    pub fn new(url: Url, html: String) -> Self {
        Self { url, html }
    }

    /// Final URL of the page, used as the base for relative links
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Parses the page into a DOM tree
    pub fn document(&self) -> Html {
        Html::parse_document(&self.html)
    }

    /// Returns true if at least one element matches the selector
    ///
    /// An unparsable selector never matches.
    pub fn has_element(&self, selector: &str) -> bool {
        match Selector::parse(selector) {
            Ok(selector) => self.document().select(&selector).next().is_some(),
            Err(_) => {
                tracing::debug!("Unparsable selector: {}", selector);
                false
            }
        }
    }
}

/// Resolves a link href against the page URL
///
/// Returns None for links that cannot lead to a document:
/// - javascript:, mailto:, tel: and data: schemes
/// - fragment-only and empty hrefs
/// - non-HTTP(S) URLs after resolution
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) if matches!(absolute_url.scheme(), "http" | "https") => Some(absolute_url),
        _ => None,
    }
}

/// Trimmed text content of an element
pub fn element_text(element: &scraper::ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

//! Browser module: page loading, downloads and page rendering
//!
//! The harvester only relies on three black-box capabilities:
//! - navigate to a URL and get the loaded page back
//! - query the loaded DOM
//! - GET a URL and store its bytes, or fail with the non-OK status
//!
//! Rendering a page to PDF is provided separately by a [`PageRenderer`].

mod chrome;
mod fetcher;
mod page;

pub use chrome::{Chrome, PageRenderer};
pub use fetcher::{build_http_client, download_file, fetch_page};
pub use page::{element_text, resolve_link, LoadedPage};

use crate::config::HttpConfig;
use crate::Result;
use reqwest::Client;
use std::path::Path;

/// Shared navigation context for a run
///
/// Every page opened through it is an independent, short-lived handle, so a
/// detail page can be opened and dropped while the listing page stays loaded.
#[derive(Debug, Clone)]
pub struct Browser {
    client: Client,
}

impl Browser {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }

    /// Navigates to a URL and waits for the page to load
    pub async fn open(&self, url: &str) -> Result<LoadedPage> {
        tracing::debug!("Navigating to {}", url);
        fetch_page(&self.client, url).await
    }

    /// Downloads a remote file to disk
    pub async fn download(&self, url: &str, destination: &Path) -> Result<u64> {
        tracing::info!("Downloading: {}", url);
        download_file(&self.client, url, destination).await
    }
}

//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests made by the harvester:
//! - Building the shared HTTP client with the configured user agent and timeouts
//! - GET requests for listing and detail pages
//! - Binary downloads of attachment files

use crate::browser::page::LoadedPage;
use crate::config::HttpConfig;
use crate::{Result, ScraperError};
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use camara_scraper::browser::build_http_client;
/// use camara_scraper::config::HttpConfig;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Loads an HTML page
///
/// The returned page carries the final URL after redirects, which is the base
/// for resolving relative links found in it.
pub async fn fetch_page(client: &Client, url: &str) -> Result<LoadedPage> {
    let response = client.get(url).send().await.map_err(|source| ScraperError::Http {
        url: url.to_string(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScraperError::PageStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let final_url: Url = response.url().clone();
    let html = response.text().await.map_err(|source| ScraperError::Http {
        url: url.to_string(),
        source,
    })?;

    Ok(LoadedPage::new(final_url, html))
}

/// Downloads a URL to a file on disk
///
/// # Returns
///
/// * `Ok(u64)` - Number of bytes written
/// * `Err(ScraperError::DownloadStatus)` - The server answered with a non-OK status
/// * `Err(ScraperError)` - Transport or filesystem failure
pub async fn download_file(client: &Client, url: &str, destination: &Path) -> Result<u64> {
    let response = client.get(url).send().await.map_err(|source| ScraperError::Http {
        url: url.to_string(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScraperError::DownloadStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let bytes = response.bytes().await.map_err(|source| ScraperError::Http {
        url: url.to_string(),
        source,
    })?;

    tokio::fs::write(destination, &bytes).await?;
    tracing::info!("File saved to: {}", destination.display());

    Ok(bytes.len() as u64)
}

//! Camara-Scraper: a legislative document harvester
//!
//! This crate walks the paginated listing of a municipal legislative portal,
//! downloads the files attached to every document it finds and keeps a JSON
//! and CSV index of what was collected, resuming from where a previous run
//! stopped.

pub mod browser;
pub mod config;
pub mod harvest;
pub mod output;
pub mod state;

use thiserror::Error;

/// Main error type for Camara-Scraper operations
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Download of {url} failed with status {status}")]
    DownloadStatus { url: String, status: u16 },

    #[error("Page {url} returned status {status}")]
    PageStatus { url: String, status: u16 },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Chrome/Chromium executable not found")]
    ChromeNotFound,

    #[error("Rendering {url} to PDF failed: {message}")]
    Render { url: String, message: String },

    #[error("Invalid run phase transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::RunPhase,
        to: state::RunPhase,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector in config: {0}")]
    InvalidSelector(String),
}

/// Result type alias for Camara-Scraper operations
pub type Result<T> = std::result::Result<T, ScraperError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, SiteKind};
pub use harvest::{sanitize_file_name, Harvester, RunOptions};
pub use output::{Attachment, DocumentRecord};
pub use state::{Checkpoint, ResumePoint};

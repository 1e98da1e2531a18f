//! Configuration module for Camara-Scraper
//!
//! This module handles loading, parsing, and validating TOML configuration files,
//! and provides the built-in profiles for the supported portals.
//!
//! # Example
//!
//! ```no_run
//! use camara_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Listing: {}", config.site.listing_url_for(1));
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ClassificationRule, Config, HttpConfig, OutputConfig, RenderConfig, SiteConfig, SiteKind,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;

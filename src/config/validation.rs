use crate::config::types::{
    ClassificationRule, Config, HttpConfig, OutputConfig, RenderConfig, SiteConfig,
};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Characters that may not appear in a file kind, since it becomes a file extension
const UNSAFE_KIND_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*', '.'];

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_http_config(&config.http)?;
    validate_render_config(&config.render)?;
    validate_output_config(&config.output)?;
    validate_classification(&config.classification)?;
    validate_kind(&config.default_kind)?;
    Ok(())
}

/// Validates the listing source
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    if !config.listing_url.contains("{page}") {
        return Err(ConfigError::Validation(format!(
            "listing-url must contain a {{page}} placeholder, got '{}'",
            config.listing_url
        )));
    }

    let url = Url::parse(&config.listing_url_for(1))
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid listing-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "listing-url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    Selector::parse(&config.listing_marker).map_err(|_| {
        ConfigError::InvalidSelector(format!("listing-marker '{}'", config.listing_marker))
    })?;

    if config.max_pages == Some(0) {
        return Err(ConfigError::Validation(
            "max-pages must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates HTTP client settings
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    Ok(())
}

fn validate_render_config(config: &RenderConfig) -> Result<(), ConfigError> {
    if let Some(path) = &config.chrome_path {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "chrome-path cannot be empty when set".to_string(),
            ));
        }
    }
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    for (key, name) in [
        ("index-json", &config.index_json),
        ("index-csv", &config.index_csv),
        ("checkpoint", &config.checkpoint),
    ] {
        if name.is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", key)));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(ConfigError::Validation(format!(
                "{} must be a file name, not a path: '{}'",
                key, name
            )));
        }
    }

    if config.index_json == config.checkpoint {
        return Err(ConfigError::Validation(
            "index-json and checkpoint must be different files".to_string(),
        ));
    }

    Ok(())
}

/// Validates the classification rule table
fn validate_classification(rules: &[ClassificationRule]) -> Result<(), ConfigError> {
    for rule in rules {
        if rule.pattern.trim().is_empty() {
            return Err(ConfigError::Validation(
                "classification pattern cannot be empty".to_string(),
            ));
        }
        validate_kind(&rule.kind)?;
    }
    Ok(())
}

fn validate_kind(kind: &str) -> Result<(), ConfigError> {
    if kind.is_empty() {
        return Err(ConfigError::Validation("file kind cannot be empty".to_string()));
    }

    if kind
        .chars()
        .any(|c| c.is_whitespace() || UNSAFE_KIND_CHARS.contains(&c))
    {
        return Err(ConfigError::Validation(format!(
            "file kind '{}' contains characters not allowed in an extension",
            kind
        )));
    }

    Ok(())
}

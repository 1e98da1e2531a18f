//! Page-to-PDF rendering with a headless Chrome/Chromium
//!
//! Rendering shells out to the browser's `--print-to-pdf` mode, one process
//! per page.

use crate::{Result, ScraperError};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;
use url::Url;

/// Upper bound for a single render
const RENDER_TIMEOUT: Duration = Duration::from_secs(120);

/// Renders a loaded detail page to a PDF file
pub trait PageRenderer {
    fn render_pdf(&self, url: &Url, destination: &Path) -> impl Future<Output = Result<()>>;
}

/// A Chrome/Chromium executable
#[derive(Debug, Clone)]
pub struct Chrome {
    path: PathBuf,
}

impl Chrome {
    /// Uses an explicit executable
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Looks for a Chrome/Chromium executable in PATH
    pub fn discover() -> Result<Self> {
        let executables = ["google-chrome", "google-chrome-stable", "chromium", "chromium-browser", "chrome"];
        for exe in executables {
            if let Ok(path) = which::which(exe) {
                tracing::debug!("Using Chrome executable: {}", path.display());
                return Ok(Self { path });
            }
        }
        tracing::info!("Chrome executable not found in PATH");
        Err(ScraperError::ChromeNotFound)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn print_args(url: &Url, destination: &Path) -> Vec<String> {
        vec![
            "--headless".to_string(),
            "--disable-gpu".to_string(),
            "--no-sandbox".to_string(),
            "--no-pdf-header-footer".to_string(),
            "--run-all-compositor-stages-before-draw".to_string(),
            format!("--print-to-pdf={}", destination.display()),
            url.to_string(),
        ]
    }
}

impl PageRenderer for Chrome {
    async fn render_pdf(&self, url: &Url, destination: &Path) -> Result<()> {
        let output = tokio::time::timeout(
            RENDER_TIMEOUT,
            Command::new(&self.path)
                .args(Self::print_args(url, destination))
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| ScraperError::Render {
            url: url.to_string(),
            message: format!("timed out after {}s", RENDER_TIMEOUT.as_secs()),
        })??;

        if !output.status.success() {
            return Err(ScraperError::Render {
                url: url.to_string(),
                message: format!(
                    "chrome exited with {}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        if !destination.exists() {
            return Err(ScraperError::Render {
                url: url.to_string(),
                message: "chrome did not produce a PDF".to_string(),
            });
        }

        tracing::info!("Page PDF saved to: {}", destination.display());
        Ok(())
    }
}

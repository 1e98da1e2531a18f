//! Per-document processing
//!
//! For every descriptor found on a listing page this module:
//! 1. Creates the document folder
//! 2. Opens the detail page
//! 3. Produces the page PDF (rendered or exported, depending on the portal)
//! 4. Downloads every attachment
//!
//! A failed download is logged and skipped so the remaining files of the
//! document are still fetched. Any other failure is returned to the caller.

use crate::browser::{Browser, LoadedPage, PageRenderer};
use crate::config::{Config, SiteKind};
use crate::harvest::classify::Classifier;
use crate::harvest::detail::{extract_attachment_links, extract_export_pdf_link};
use crate::harvest::listing::DocumentDescriptor;
use crate::harvest::sanitize::sanitize_file_name;
use crate::output::{Attachment, DocumentRecord};
use crate::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Kind recorded for the direct PDF link of a listing entry
const DIRECT_PDF_KIND: &str = "pdf";

/// Fetches the files of single documents
pub struct DocumentFetcher<'a, R> {
    config: &'a Config,
    browser: &'a Browser,
    renderer: Option<&'a R>,
    classifier: &'a Classifier,
}

impl<'a, R: PageRenderer> DocumentFetcher<'a, R> {
    pub fn new(
        config: &'a Config,
        browser: &'a Browser,
        renderer: Option<&'a R>,
        classifier: &'a Classifier,
    ) -> Self {
        Self {
            config,
            browser,
            renderer,
            classifier,
        }
    }

    /// Processes one document and returns its index record
    pub async fn fetch(
        &self,
        descriptor: &DocumentDescriptor,
        page_number: u32,
    ) -> Result<DocumentRecord> {
        let base_name = sanitize_file_name(&descriptor.title);
        let folder = self.config.output.directory.join(&base_name);
        tokio::fs::create_dir_all(&folder).await?;

        // Auxiliary page, dropped once this document is done
        let detail = self.browser.open(descriptor.detail_url.as_str()).await?;

        let (primary_pdf, attachments) = match self.config.site.kind {
            SiteKind::Proposituras => self.fetch_proposicao(&detail, &folder, &base_name).await?,
            SiteKind::Normas => {
                self.fetch_norma(descriptor, &detail, &folder, &base_name)
                    .await?
            }
        };

        Ok(DocumentRecord {
            title: descriptor.title.clone(),
            folder_path: path_string(&folder),
            primary_pdf_path: primary_pdf.as_deref().map(path_string).unwrap_or_default(),
            attachments,
            page_number,
        })
    }

    /// Renders the detail page and downloads the files of its attachment table
    async fn fetch_proposicao(
        &self,
        detail: &LoadedPage,
        folder: &Path,
        base_name: &str,
    ) -> Result<(Option<PathBuf>, Vec<Attachment>)> {
        let links = extract_attachment_links(detail, self.classifier)?;
        tracing::debug!("Found {} attachment links", links.len());

        let primary_pdf = match self.renderer {
            Some(renderer) if self.config.render.enabled => {
                let destination = folder.join(format!("{}.pdf", base_name));
                tracing::info!("Rendering page PDF...");
                let rendered = match renderer.render_pdf(detail.url(), &destination).await {
                    Ok(()) => Some(destination),
                    Err(e) => {
                        tracing::warn!("Failed to render {}: {}", detail.url(), e);
                        None
                    }
                };
                let settle = self.config.render.settle_delay_ms;
                if settle > 0 {
                    tokio::time::sleep(Duration::from_millis(settle)).await;
                }
                rendered
            }
            _ => None,
        };

        let mut attachments = Vec::with_capacity(links.len());
        for link in links {
            let file_name = format!(
                "{}_{}.{}",
                base_name,
                sanitize_file_name(&link.text),
                link.kind
            );
            let destination = folder.join(file_name);
            self.download_isolated(link.url.as_str(), &destination).await;
            attachments.push(Attachment::new(link.kind, path_string(&destination)));
        }

        Ok((primary_pdf, attachments))
    }

    /// Downloads the exported page PDF and the listing's direct PDF link
    async fn fetch_norma(
        &self,
        descriptor: &DocumentDescriptor,
        detail: &LoadedPage,
        folder: &Path,
        base_name: &str,
    ) -> Result<(Option<PathBuf>, Vec<Attachment>)> {
        let primary_pdf = match extract_export_pdf_link(detail)? {
            Some(export_url) => {
                let destination = folder.join(format!("{}_pagina.pdf", base_name));
                self.download_isolated(export_url.as_str(), &destination)
                    .await
                    .then_some(destination)
            }
            None => {
                tracing::info!("No export-as-PDF link on {}", detail.url());
                None
            }
        };

        let mut attachments = Vec::new();
        if let Some(pdf_url) = &descriptor.pdf_url {
            let destination = folder.join(format!("{}_manuscrito1.pdf", base_name));
            self.download_isolated(pdf_url.as_str(), &destination).await;
            attachments.push(Attachment::new(DIRECT_PDF_KIND, path_string(&destination)));
        }

        Ok((primary_pdf, attachments))
    }

    /// Downloads a file, logging instead of failing
    ///
    /// Returns true when the file was written.
    async fn download_isolated(&self, url: &str, destination: &Path) -> bool {
        match self.browser.download(url, destination).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("Failed to download {}: {}", url, e);
                false
            }
        }
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

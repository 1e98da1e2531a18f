//! Harvest coordinator - the page-by-page loop
//!
//! This module contains the main loop that ties the run together:
//! - Locating the resume point
//! - Walking listing pages until one comes back empty
//! - Fetching every document of a page
//! - Saving the index, then the checkpoint, after each completed page
//! - Flushing the index whether the run succeeds or fails

use crate::browser::{Browser, PageRenderer};
use crate::config::Config;
use crate::harvest::classify::Classifier;
use crate::harvest::documents::DocumentFetcher;
use crate::harvest::listing::{extract_documents, DocumentDescriptor};
use crate::output::{write_index, DocumentRecord};
use crate::state::{locate_resume_point, Checkpoint, RunPhase};
use crate::{Result, ScraperError};

/// Command-line switches that shape a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Process exactly one listing page
    pub single_page: bool,

    /// Ignore the checkpoint and previous index
    pub fresh: bool,
}

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Page the run started at
    pub start_page: u32,

    /// Listing pages walked, the final empty one included
    pub pages_walked: u32,

    /// Last page whose documents were all processed
    pub last_completed_page: Option<u32>,

    /// Documents collected during this run
    pub documents_collected: usize,

    /// Records in the written index, carried-over ones included
    pub total_records: usize,
}

/// Main harvester structure
pub struct Harvester<R> {
    config: Config,
    browser: Browser,
    renderer: Option<R>,
    classifier: Classifier,
    records: Vec<DocumentRecord>,
    phase: RunPhase,
}

impl<R: PageRenderer> Harvester<R> {
    /// Creates a new harvester
    ///
    /// # Arguments
    ///
    /// * `config` - The validated configuration
    /// * `renderer` - Page-to-PDF renderer, None when pages are not rendered
    pub fn new(config: Config, renderer: Option<R>) -> Result<Self> {
        let browser = Browser::new(&config.http)?;
        let classifier = Classifier::from_config(&config);

        Ok(Self {
            config,
            browser,
            renderer,
            classifier,
            records: Vec::new(),
            phase: RunPhase::Init,
        })
    }

    /// Records accumulated so far
    pub fn records(&self) -> &[DocumentRecord] {
        &self.records
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Runs the harvest to completion
    ///
    /// The JSON and CSV indexes are written before returning, also when the
    /// run fails; the error is returned after the flush.
    pub async fn run(&mut self, options: RunOptions) -> Result<RunSummary> {
        self.advance(RunPhase::Resuming)?;

        let outcome = self.walk(options).await;
        self.finish(outcome)
    }

    async fn walk(&mut self, options: RunOptions) -> Result<RunSummary> {
        let output = &self.config.output;
        std::fs::create_dir_all(&output.directory)?;

        let resume = locate_resume_point(output, options.fresh);
        if options.fresh {
            Checkpoint::clear(&output.checkpoint_path())?;
        }
        tracing::info!(
            "Starting at page {} ({}, {} records carried over)",
            resume.start_page,
            resume.source,
            resume.records.len()
        );
        self.records = resume.records;

        let mut summary = RunSummary {
            start_page: resume.start_page,
            pages_walked: 0,
            last_completed_page: None,
            documents_collected: 0,
            total_records: 0,
        };

        let mut page_number = resume.start_page;
        loop {
            self.advance(RunPhase::WalkingPage)?;
            let descriptors = self.load_listing(page_number).await?;
            summary.pages_walked += 1;

            if descriptors.is_empty() {
                tracing::info!("Page {} has no documents, stopping", page_number);
                self.advance(RunPhase::Done)?;
                break;
            }

            self.advance(RunPhase::FetchingDocs)?;
            let collected = self.process_page(page_number, &descriptors).await?;
            summary.documents_collected += collected;
            summary.last_completed_page = Some(page_number);

            // The checkpoint must never point past what the index holds
            write_index(&self.records, &self.config.output)?;
            Checkpoint::new(page_number).save(&self.config.output.checkpoint_path())?;

            if !self.should_continue(options, summary.pages_walked, page_number) {
                self.advance(RunPhase::Done)?;
                break;
            }

            page_number += 1;
            tracing::info!("Preparing to process page {}...", page_number);
        }

        summary.total_records = self.records.len();
        Ok(summary)
    }

    /// Loop predicate, evaluated after every completed page
    fn should_continue(&self, options: RunOptions, pages_walked: u32, page_number: u32) -> bool {
        if options.single_page {
            tracing::info!("Single page run, stopping after page {}", page_number);
            return false;
        }

        if let Some(max_pages) = self.config.site.max_pages {
            if pages_walked >= max_pages {
                tracing::info!("Reached max-pages ({}), stopping", max_pages);
                return false;
            }
        }

        page_number < u32::MAX
    }

    /// Loads a listing page and extracts its documents
    ///
    /// A page without the listing marker counts as an empty page.
    async fn load_listing(&self, page_number: u32) -> Result<Vec<DocumentDescriptor>> {
        let site = &self.config.site;
        let url = site.listing_url_for(page_number);

        tracing::info!("Accessing page {}...", page_number);
        tracing::debug!("Listing URL: {}", url);
        let listing = self.browser.open(&url).await?;

        if !listing.has_element(&site.listing_marker) {
            tracing::info!(
                "Listing marker '{}' not found on page {}",
                site.listing_marker,
                page_number
            );
            return Ok(Vec::new());
        }

        let descriptors = extract_documents(&listing, site.kind)?;
        tracing::info!(
            "Found {} documents on page {}",
            descriptors.len(),
            page_number
        );
        Ok(descriptors)
    }

    /// Fetches every document of a page, appending their records
    async fn process_page(
        &mut self,
        page_number: u32,
        descriptors: &[DocumentDescriptor],
    ) -> Result<usize> {
        let fetcher = DocumentFetcher::new(
            &self.config,
            &self.browser,
            self.renderer.as_ref(),
            &self.classifier,
        );

        for (i, descriptor) in descriptors.iter().enumerate() {
            tracing::info!(
                "Processing document {} of {} on page {}: {}",
                i + 1,
                descriptors.len(),
                page_number,
                descriptor.title
            );
            tracing::debug!("Detail link: {}", descriptor.detail_url);

            let record = fetcher.fetch(descriptor, page_number).await?;
            self.records.push(record);
        }

        Ok(descriptors.len())
    }

    /// Flushes the index and closes the run
    fn finish(&mut self, outcome: Result<RunSummary>) -> Result<RunSummary> {
        self.advance(RunPhase::WritingIndex)?;
        let flushed = write_index(&self.records, &self.config.output);

        match outcome {
            Ok(summary) => {
                flushed?;
                self.advance(RunPhase::Closed)?;
                tracing::info!(
                    "Run finished: {} pages walked, {} documents collected, {} records in index",
                    summary.pages_walked,
                    summary.documents_collected,
                    summary.total_records
                );
                Ok(summary)
            }
            Err(e) => {
                tracing::error!("Run failed: {}", e);
                if let Err(flush_error) = flushed {
                    tracing::error!("Failed to save index after error: {}", flush_error);
                }
                self.advance(RunPhase::ClosedOnError)?;
                Err(e)
            }
        }
    }

    fn advance(&mut self, next: RunPhase) -> Result<()> {
        if !self.phase.can_transition_to(next) {
            return Err(ScraperError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        tracing::trace!("Run phase: {} -> {}", self.phase, next);
        self.phase = next;
        Ok(())
    }
}

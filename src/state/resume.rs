//! Resume point location
//!
//! Decides where a run continues from, using (in order of preference) the
//! page checkpoint, then the last record of a previously written index.

use crate::config::OutputConfig;
use crate::output::{read_json_index, DocumentRecord};
use crate::state::checkpoint::Checkpoint;
use std::fmt;

/// Where the resume point was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeSource {
    /// Nothing usable on disk, or a fresh run was requested
    Start,
    /// Page after the last completed page in the checkpoint
    Checkpoint,
    /// Page of the last record in the index
    Index,
}

impl fmt::Display for ResumeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Checkpoint => write!(f, "checkpoint"),
            Self::Index => write!(f, "index"),
        }
    }
}

/// The page a run starts at and the records it carries over
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumePoint {
    pub start_page: u32,
    pub records: Vec<DocumentRecord>,
    pub source: ResumeSource,
}

impl ResumePoint {
    pub fn start() -> Self {
        Self {
            start_page: 1,
            records: Vec::new(),
            source: ResumeSource::Start,
        }
    }
}

/// Locates the page a run should begin at
///
/// - With a readable checkpoint, the run starts at the page after the last
///   completed one and keeps the records up to that page.
/// - Otherwise, with a non-empty index, the run starts at the page of the
///   last record, since that page may not have finished. Records of that
///   page are dropped; they will be collected again.
/// - Otherwise the run starts at page 1.
///
/// Unreadable files are logged and treated as absent.
pub fn locate_resume_point(output: &OutputConfig, fresh: bool) -> ResumePoint {
    if fresh {
        tracing::info!("Fresh run requested, ignoring previous state");
        return ResumePoint::start();
    }

    let index_path = output.index_json_path();
    let mut records = match read_json_index(&index_path) {
        Ok(Some(records)) => records,
        Ok(None) => Vec::new(),
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", index_path.display(), e);
            return ResumePoint::start();
        }
    };

    let checkpoint_path = output.checkpoint_path();
    let checkpoint = match Checkpoint::load(&checkpoint_path) {
        Ok(checkpoint) => checkpoint,
        Err(e) => {
            tracing::warn!("Ignoring unreadable checkpoint {}: {}", checkpoint_path.display(), e);
            None
        }
    };

    if let Some(checkpoint) = checkpoint {
        records.retain(|r| r.page_number <= checkpoint.last_completed_page);
        let start_page = checkpoint.next_page();
        tracing::info!("Resuming from page {} (checkpoint)", start_page);
        return ResumePoint {
            start_page,
            records,
            source: ResumeSource::Checkpoint,
        };
    }

    match records.last().map(|r| r.page_number) {
        Some(last_page) => {
            records.retain(|r| r.page_number < last_page);
            let start_page = last_page.max(1);
            tracing::info!("Resuming from page {} (index)", start_page);
            ResumePoint {
                start_page,
                records,
                source: ResumeSource::Index,
            }
        }
        None => ResumePoint::start(),
    }
}

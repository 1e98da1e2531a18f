//! Page checkpoint persistence
//!
//! The checkpoint records the last listing page whose documents were all
//! processed. It is written after every page, independently of the index.

use crate::output::write_atomic;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Progress marker written after each completed listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Last listing page processed to completion
    pub last_completed_page: u32,

    /// When the checkpoint was written
    pub updated_at: DateTime<Utc>,
}

impl Checkpoint {
    pub fn new(last_completed_page: u32) -> Self {
        Self {
            last_completed_page,
            updated_at: Utc::now(),
        }
    }

    /// First page that still has to be processed
    pub fn next_page(&self) -> u32 {
        self.last_completed_page.saturating_add(1)
    }

    /// Loads a checkpoint, returning None when the file does not exist
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Atomically replaces the checkpoint file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        write_atomic(path, json.as_bytes())?;
        tracing::debug!(
            "Checkpoint saved: page {} completed",
            self.last_completed_page
        );
        Ok(())
    }

    /// Removes the checkpoint file if present
    pub fn clear(path: &Path) -> Result<()> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

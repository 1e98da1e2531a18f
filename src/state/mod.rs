//! State module for tracking harvest progress
//!
//! # Components
//!
//! - `RunPhase`: The phase a run is in (resuming, walking a page, writing the index, etc.)
//! - `Checkpoint`: The last listing page processed to completion
//! - `ResumePoint`: The page a new run begins at, derived from what is on disk

mod checkpoint;
mod resume;
mod run_phase;

// Re-export main types
pub use checkpoint::Checkpoint;
pub use resume::{locate_resume_point, ResumePoint, ResumeSource};
pub use run_phase::RunPhase;

/// Run phase definitions for tracking harvest progress
///
/// A run moves linearly through these phases; the only loop is between
/// walking a listing page and fetching its documents.
use std::fmt;

/// Represents the current phase of a harvest run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunPhase {
    // ===== Startup =====
    /// Nothing done yet
    Init,

    /// Locating the page to continue from
    Resuming,

    // ===== Main loop =====
    /// Loading a listing page and extracting its documents
    WalkingPage,

    /// Visiting the detail pages and downloading files
    FetchingDocs,

    /// Pagination finished
    Done,

    // ===== Shutdown =====
    /// Flushing the JSON and CSV indexes
    WritingIndex,

    /// Run finished normally
    Closed,

    /// Run finished after an error
    ClosedOnError,
}

impl RunPhase {
    /// Returns true if the run is over
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::ClosedOnError)
    }

    /// Returns true if moving from `self` to `next` is a legal transition
    ///
    /// Any non-terminal phase may jump to `WritingIndex`, since the index is
    /// flushed whenever the run stops, successfully or not.
    pub fn can_transition_to(&self, next: RunPhase) -> bool {
        use RunPhase::*;

        if next == WritingIndex {
            return !self.is_terminal() && *self != WritingIndex;
        }

        matches!(
            (self, next),
            (Init, Resuming)
                | (Resuming, WalkingPage)
                | (WalkingPage, FetchingDocs)
                | (WalkingPage, Done)
                | (FetchingDocs, WalkingPage)
                | (FetchingDocs, Done)
                | (WritingIndex, Closed)
                | (WritingIndex, ClosedOnError)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Resuming => "resuming",
            Self::WalkingPage => "walking_page",
            Self::FetchingDocs => "fetching_docs",
            Self::Done => "done",
            Self::WritingIndex => "writing_index",
            Self::Closed => "closed",
            Self::ClosedOnError => "closed_on_error",
        }
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

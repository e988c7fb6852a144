/// Outcome definitions for the per-URL state machine
///
/// A URL is skipped if already processed; otherwise it is inspected and, when
/// not indexed, submitted. Each path ends in exactly one `UrlOutcome`.
use crate::google::ApiError;
use std::fmt;

/// Index status of a single URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// The URL is in the index
    Indexed,

    /// The URL is not in the index, or its coverage state is unspecified
    NotIndexed,

    /// The inspection call failed
    Unknown,
}

impl Classification {
    /// Maps a coverage state string to a classification
    ///
    /// Only `INDEXED` (in any case) counts as indexed. Absent values count as
    /// not indexed.
    pub fn from_coverage_state(coverage_state: Option<&str>) -> Self {
        match coverage_state {
            Some(state) if state.eq_ignore_ascii_case("INDEXED") => Self::Indexed,
            _ => Self::NotIndexed,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Indexed => "indexed",
            Self::NotIndexed => "not indexed",
            Self::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// Result of an indexing request
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The URL was queued for crawling
    Submitted,

    /// The API reported its rate limit (HTTP 429)
    QuotaExceeded,

    /// Any other failure
    Failed(ApiError),
}

impl SubmitOutcome {
    /// Classifies a failed request, separating quota exhaustion from other errors
    pub fn from_error(error: ApiError) -> Self {
        if error.is_quota_exceeded() {
            Self::QuotaExceeded
        } else {
            Self::Failed(error)
        }
    }
}

/// How a URL was resolved during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlOutcome {
    // ===== Resolved States =====
    /// Already in the processed set before this run looked at it
    Skipped,

    /// Inspection reported the URL as indexed
    AlreadyIndexed,

    /// Indexing was requested successfully
    Submitted,

    /// Inspection failed; recorded so it is not retried every run
    InspectionFailed,

    /// Indexing request failed for a non-quota reason and was dropped
    SubmissionFailed,

    // ===== Unresolved States =====
    /// Indexing request failed and the URL is left for the next run
    Deferred,

    /// The indexing quota ran out; the run stops here
    QuotaExceeded,
}

impl UrlOutcome {
    /// Returns true if the URL must be added to the processed set
    ///
    /// `Skipped` URLs are already members, so adding them again is a no-op.
    pub fn marks_processed(&self) -> bool {
        matches!(
            self,
            Self::AlreadyIndexed | Self::Submitted | Self::InspectionFailed | Self::SubmissionFailed
        )
    }

    /// Returns true if no further URLs should be handled in this run
    pub fn halts_run(&self) -> bool {
        matches!(self, Self::QuotaExceeded)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skipped => "skipped",
            Self::AlreadyIndexed => "already_indexed",
            Self::Submitted => "submitted",
            Self::InspectionFailed => "inspection_failed",
            Self::SubmissionFailed => "submission_failed",
            Self::Deferred => "deferred",
            Self::QuotaExceeded => "quota_exceeded",
        }
    }
}

impl fmt::Display for UrlOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

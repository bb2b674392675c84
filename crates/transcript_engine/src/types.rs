use std::fmt;
use std::path::PathBuf;

use crate::save::SaveError;

/// Job handle minted by the caller; the runner only threads it through.
pub type JobId = String;

/// A fetched document, held just long enough to relay or save it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPayload {
    /// Raw PDF bytes, exactly as the upstream served them.
    pub bytes: Vec<u8>,
    /// Suggested download filename, `Document_{identifier}.pdf`.
    pub filename: String,
}

/// Outcome of a HEAD existence probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    Missing,
}

/// Failure of a single upstream fetch or probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FetchError {}

/// The whole error vocabulary callers ever see from the fetch path.
///
/// Upstream-specific failure codes are folded into these four cases; the
/// one exception is `UpstreamStatus`, which keeps the raw status so the
/// HTTP surface can pass it through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The identifier failed the 8-digit pattern; no request was made.
    InvalidIdentifier,
    /// Upstream confirmed there is no document for this identifier.
    NotFound,
    /// Upstream answered with an unexpected status.
    UpstreamStatus(u16),
    /// Transport-level failure: refused, unreachable, or timed out.
    Connection,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidIdentifier => write!(f, "invalid identifier"),
            FailureKind::NotFound => write!(f, "not found"),
            FailureKind::UpstreamStatus(code) => write!(f, "upstream status {code}"),
            FailureKind::Connection => write!(f, "connection error"),
        }
    }
}

/// Why one batch job failed. The runner never aborts the batch over these.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("{}", .0.kind)]
    Fetch(#[from] FetchError),
    #[error("could not save document: {0}")]
    Save(#[from] SaveError),
}

/// A document the runner wrote to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedDocument {
    pub path: PathBuf,
    pub bytes: u64,
}

/// Progress reported by the batch runner, one entry per job transition.
#[derive(Debug)]
pub enum RunnerEvent {
    JobStarted {
        job_id: JobId,
    },
    JobFinished {
        job_id: JobId,
        result: Result<SavedDocument, RunError>,
    },
}

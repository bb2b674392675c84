//! Transcript engine: upstream fetch, disk persistence, and batch execution.
mod fetch;
mod filename;
mod identifier;
mod runner;
mod save;
mod types;

pub use fetch::{
    DocumentFetcher, FetchSettings, ReqwestFetcher, DEFAULT_BASE_URL, DEFAULT_USER_AGENT,
};
pub use filename::{content_disposition, document_filename};
pub use identifier::Identifier;
pub use runner::{
    BatchJob, BatchRunner, ChannelEventSink, EventSink, RunnerSettings, DEFAULT_PACING,
};
pub use save::{prepare_output_dir, DocumentWriter, SaveError};
pub use types::{
    Availability, DocumentPayload, FailureKind, FetchError, JobId, RunError, RunnerEvent,
    SavedDocument,
};

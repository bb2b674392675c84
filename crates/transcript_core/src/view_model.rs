use std::path::PathBuf;

use crate::{Job, JobId, JobStatus, ManifestStats};

/// Read-only projection of the batch for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchViewModel {
    pub processing: bool,
    pub jobs: Vec<JobRowView>,
    pub last_manifest: Option<ManifestStats>,
    pub completed: usize,
    pub errored: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    pub job_id: JobId,
    pub identifier: String,
    pub status: JobStatus,
    pub error: Option<String>,
    pub bytes: Option<u64>,
    pub saved_to: Option<PathBuf>,
}

impl From<&Job> for JobRowView {
    fn from(job: &Job) -> Self {
        Self {
            job_id: job.id.clone(),
            identifier: job.identifier.clone(),
            status: job.status,
            error: job.error.clone(),
            bytes: job.bytes,
            saved_to: job.saved_to.clone(),
        }
    }
}

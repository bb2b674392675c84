use std::path::PathBuf;

use crate::view_model::{BatchViewModel, JobRowView};

/// Unique job handle, shaped `{identifier}-{load timestamp ms}-{ordinal}`.
///
/// The ordinal makes duplicate identifiers within one manifest distinct.
pub type JobId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Downloading,
    Completed,
    Error,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Error)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Pending => write!(f, "pending"),
            JobStatus::Downloading => write!(f, "downloading"),
            JobStatus::Completed => write!(f, "completed"),
            JobStatus::Error => write!(f, "error"),
        }
    }
}

/// Terminal result reported by the download runner for one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Saved { path: PathBuf, bytes: u64 },
    Failed { message: String },
}

/// One unit of batch work: the attempt to fetch one identifier's document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: JobId,
    pub identifier: String,
    pub status: JobStatus,
    pub error: Option<String>,
    pub bytes: Option<u64>,
    pub saved_to: Option<PathBuf>,
}

impl Job {
    fn new(id: JobId, identifier: String) -> Self {
        Self {
            id,
            identifier,
            status: JobStatus::Pending,
            error: None,
            bytes: None,
            saved_to: None,
        }
    }
}

/// Counts reported after a manifest parse: how many lines became jobs and
/// how many were silently dropped for failing the identifier pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ManifestStats {
    pub enqueued: usize,
    pub dropped: usize,
}

/// The whole batch: the ordered job set plus the single processing flag.
///
/// Jobs are owned exclusively by this state; the runner only reports events
/// back, so no locking is ever needed around the job list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchState {
    jobs: Vec<Job>,
    processing: bool,
    last_manifest: Option<ManifestStats>,
}

impl BatchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> BatchViewModel {
        BatchViewModel {
            processing: self.processing,
            completed: self.count(JobStatus::Completed),
            errored: self.count(JobStatus::Error),
            jobs: self.jobs.iter().map(JobRowView::from).collect(),
            last_manifest: self.last_manifest,
        }
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// Replace the job set with one job per identifier, in manifest order.
    pub(crate) fn install_jobs(
        &mut self,
        identifiers: Vec<String>,
        dropped: usize,
        loaded_at_ms: u64,
    ) {
        self.jobs = identifiers
            .into_iter()
            .enumerate()
            .map(|(index, identifier)| {
                let id = format!("{identifier}-{loaded_at_ms}-{}", index + 1);
                Job::new(id, identifier)
            })
            .collect();
        self.last_manifest = Some(ManifestStats {
            enqueued: self.jobs.len(),
            dropped,
        });
    }

    /// Mark the batch as processing and return the pending jobs in order.
    ///
    /// Returns an empty list (and stays idle) when nothing is pending.
    pub(crate) fn begin_run(&mut self) -> Vec<crate::JobDispatch> {
        let pending: Vec<_> = self
            .jobs
            .iter()
            .filter(|job| job.status == JobStatus::Pending)
            .map(|job| crate::JobDispatch {
                job_id: job.id.clone(),
                identifier: job.identifier.clone(),
            })
            .collect();
        if !pending.is_empty() {
            self.processing = true;
        }
        pending
    }

    pub(crate) fn apply_started(&mut self, job_id: &str) {
        if let Some(job) = self.job_mut(job_id) {
            job.status = JobStatus::Downloading;
        }
    }

    pub(crate) fn apply_finished(&mut self, job_id: &str, outcome: JobOutcome) {
        if let Some(job) = self.job_mut(job_id) {
            match outcome {
                JobOutcome::Saved { path, bytes } => {
                    job.status = JobStatus::Completed;
                    job.bytes = Some(bytes);
                    job.saved_to = Some(path);
                }
                JobOutcome::Failed { message } => {
                    job.status = JobStatus::Error;
                    job.error = Some(message);
                }
            }
        }
        // The runner never reports a batch-level end; the batch is over once
        // every job has reached a terminal state.
        if self.processing && self.jobs.iter().all(|job| job.status.is_terminal()) {
            self.processing = false;
        }
    }

    /// Full reset of the job set. Refused while a run is in flight.
    pub(crate) fn clear(&mut self) {
        if self.processing {
            return;
        }
        self.jobs.clear();
        self.last_manifest = None;
    }

    fn job_mut(&mut self, job_id: &str) -> Option<&mut Job> {
        self.jobs.iter_mut().find(|job| job.id == job_id)
    }

    fn count(&self, status: JobStatus) -> usize {
        self.jobs.iter().filter(|job| job.status == status).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Manifest text arrived (file contents); rebuild the pending job set.
    /// `loaded_at_ms` is the wall-clock read of whoever loaded the file.
    ManifestLoaded { raw: String, loaded_at_ms: u64 },
    /// Start working through the pending job set.
    RunRequested,
    /// The runner picked up a job.
    JobStarted { job_id: crate::JobId },
    /// The runner finished a job, one way or the other.
    JobFinished {
        job_id: crate::JobId,
        outcome: crate::JobOutcome,
    },
    /// Discard the whole job set (honored only while idle).
    ClearRequested,
}

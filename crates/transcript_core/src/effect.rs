#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Hand the ordered pending jobs to the download runner.
    RunBatch { jobs: Vec<JobDispatch> },
}

/// What the runner needs to know about one job: its handle and identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDispatch {
    pub job_id: crate::JobId,
    pub identifier: String,
}

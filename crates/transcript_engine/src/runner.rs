use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use transcript_logging::{transcript_info, transcript_warn};

use crate::fetch::DocumentFetcher;
use crate::save::DocumentWriter;
use crate::types::{JobId, RunError, RunnerEvent, SavedDocument};

/// How long to idle between consecutive jobs. The upstream is a fragile
/// legacy host, so the runner spaces requests out rather than hammering it.
pub const DEFAULT_PACING: Duration = Duration::from_millis(800);

#[derive(Debug, Clone)]
pub struct RunnerSettings {
    pub pacing: Duration,
    pub output_dir: PathBuf,
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            pacing: DEFAULT_PACING,
            output_dir: PathBuf::from("downloads"),
        }
    }
}

/// One unit of work for the runner: a caller-minted id plus the raw
/// identifier to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchJob {
    pub job_id: JobId,
    pub identifier: String,
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: RunnerEvent);
}

pub struct ChannelEventSink {
    tx: tokio::sync::mpsc::UnboundedSender<RunnerEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: tokio::sync::mpsc::UnboundedSender<RunnerEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: RunnerEvent) {
        let _ = self.tx.send(event);
    }
}

/// Drives a batch of download jobs strictly one at a time, in order.
///
/// A failed job is reported through the sink and the runner moves on to the
/// next one; nothing short-circuits the batch.
pub struct BatchRunner {
    fetcher: Arc<dyn DocumentFetcher>,
    writer: DocumentWriter,
    pacing: Duration,
}

impl BatchRunner {
    pub fn new(fetcher: Arc<dyn DocumentFetcher>, settings: RunnerSettings) -> Self {
        Self {
            fetcher,
            writer: DocumentWriter::new(settings.output_dir),
            pacing: settings.pacing,
        }
    }

    pub async fn run(&self, jobs: &[BatchJob], sink: &dyn EventSink) {
        transcript_info!("starting batch of {} job(s)", jobs.len());

        for (index, job) in jobs.iter().enumerate() {
            sink.emit(RunnerEvent::JobStarted {
                job_id: job.job_id.clone(),
            });

            let result = self.process(job).await;
            if let Err(err) = &result {
                transcript_warn!("job {} failed: {err}", job.job_id);
            }
            sink.emit(RunnerEvent::JobFinished {
                job_id: job.job_id.clone(),
                result,
            });

            // Pace between jobs only; the last one finishes immediately.
            if index + 1 < jobs.len() {
                tokio::time::sleep(self.pacing).await;
            }
        }

        transcript_info!("batch finished");
    }

    async fn process(&self, job: &BatchJob) -> Result<SavedDocument, RunError> {
        let payload = self.fetcher.fetch_document(&job.identifier).await?;
        let path = self.writer.write(&payload.filename, &payload.bytes)?;
        Ok(SavedDocument {
            path,
            bytes: payload.bytes.len() as u64,
        })
    }
}

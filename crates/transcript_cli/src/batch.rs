//! Batch command: bridges the pure batch state machine to the download
//! runner and renders progress to the terminal.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use transcript_core::{update, BatchState, BatchViewModel, Effect, JobOutcome, JobStatus, Msg};
use transcript_engine::{
    BatchJob, BatchRunner, ChannelEventSink, DocumentFetcher, RunnerEvent, RunnerSettings,
};
use transcript_logging::transcript_info;

pub async fn run(
    fetcher: Arc<dyn DocumentFetcher>,
    manifest: &Path,
    output_dir: PathBuf,
    pacing: Duration,
) -> anyhow::Result<BatchViewModel> {
    let raw = std::fs::read_to_string(manifest)
        .with_context(|| format!("reading manifest {}", manifest.display()))?;
    let loaded_at_ms = Utc::now().timestamp_millis().max(0) as u64;

    let mut state = BatchState::new();
    let (next, _) = update(state, Msg::ManifestLoaded { raw, loaded_at_ms });
    state = next;

    if let Some(stats) = state.view().last_manifest {
        transcript_info!(
            "manifest: {} job(s) enqueued, {} line(s) dropped",
            stats.enqueued,
            stats.dropped
        );
    }

    let (next, effects) = update(state, Msg::RunRequested);
    state = next;

    let Some(Effect::RunBatch { jobs }) = effects.into_iter().next() else {
        println!("nothing to download");
        return Ok(state.view());
    };

    let dispatch: Vec<BatchJob> = jobs
        .into_iter()
        .map(|job| BatchJob {
            job_id: job.job_id,
            identifier: job.identifier,
        })
        .collect();
    let runner = BatchRunner::new(fetcher, RunnerSettings { pacing, output_dir });

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let worker = tokio::spawn(async move {
        let sink = ChannelEventSink::new(tx);
        runner.run(&dispatch, &sink).await;
    });

    // The channel closes once the runner task drops its sink.
    while let Some(event) = rx.recv().await {
        let msg = match event {
            RunnerEvent::JobStarted { job_id } => {
                if let Some(identifier) = job_identifier(&state, &job_id) {
                    println!("downloading {identifier}...");
                }
                Msg::JobStarted { job_id }
            }
            RunnerEvent::JobFinished { job_id, result } => {
                let outcome = match result {
                    Ok(saved) => {
                        println!("  saved {} ({} bytes)", saved.path.display(), saved.bytes);
                        JobOutcome::Saved {
                            path: saved.path,
                            bytes: saved.bytes,
                        }
                    }
                    Err(err) => {
                        println!("  failed: {err}");
                        JobOutcome::Failed {
                            message: err.to_string(),
                        }
                    }
                };
                Msg::JobFinished { job_id, outcome }
            }
        };
        let (next, _) = update(state, msg);
        state = next;
    }
    worker.await.context("batch runner crashed")?;

    let view = state.view();
    println!(
        "batch done: {} completed, {} failed, {} total",
        view.completed,
        view.errored,
        view.jobs.len()
    );
    for row in view.jobs.iter().filter(|row| row.status == JobStatus::Error) {
        println!(
            "  {}: {}",
            row.identifier,
            row.error.as_deref().unwrap_or("unknown error")
        );
    }

    Ok(view)
}

fn job_identifier(state: &BatchState, job_id: &str) -> Option<String> {
    state
        .view()
        .jobs
        .into_iter()
        .find(|row| row.job_id == job_id)
        .map(|row| row.identifier)
}

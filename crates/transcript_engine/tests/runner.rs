use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use transcript_engine::{
    Availability, BatchJob, BatchRunner, ChannelEventSink, DocumentFetcher, DocumentPayload,
    EventSink, FailureKind, FetchError, FetchSettings, ReqwestFetcher, RunError, RunnerEvent,
    RunnerSettings,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PDF_BYTES: &[u8] = b"%PDF-1.4 fake transcript body";

/// Serves canned PDF bytes for every identifier except the listed ones.
struct ScriptedFetcher {
    missing: HashSet<String>,
}

impl ScriptedFetcher {
    fn new(missing: &[&str]) -> Self {
        Self {
            missing: missing.iter().map(|id| id.to_string()).collect(),
        }
    }
}

#[async_trait::async_trait]
impl DocumentFetcher for ScriptedFetcher {
    async fn fetch_document(&self, identifier: &str) -> Result<DocumentPayload, FetchError> {
        if self.missing.contains(identifier) {
            return Err(FetchError {
                kind: FailureKind::NotFound,
                message: format!("no document for identifier {identifier}"),
            });
        }
        Ok(DocumentPayload {
            bytes: PDF_BYTES.to_vec(),
            filename: format!("Document_{identifier}.pdf"),
        })
    }

    async fn check_existence(&self, identifier: &str) -> Result<Availability, FetchError> {
        if self.missing.contains(identifier) {
            Ok(Availability::Missing)
        } else {
            Ok(Availability::Available)
        }
    }
}

#[derive(Default)]
struct TestSink {
    events: Arc<Mutex<Vec<RunnerEvent>>>,
}

impl TestSink {
    fn new() -> Self {
        Self::default()
    }

    fn take(&self) -> Vec<RunnerEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl EventSink for TestSink {
    fn emit(&self, event: RunnerEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn jobs(identifiers: &[&str]) -> Vec<BatchJob> {
    identifiers
        .iter()
        .enumerate()
        .map(|(index, id)| BatchJob {
            job_id: format!("{id}-{}", index + 1),
            identifier: id.to_string(),
        })
        .collect()
}

/// Compact (job_id, outcome) view of the event stream for order assertions.
fn summarize(events: &[RunnerEvent]) -> Vec<(String, &'static str)> {
    events
        .iter()
        .map(|event| match event {
            RunnerEvent::JobStarted { job_id } => (job_id.clone(), "started"),
            RunnerEvent::JobFinished {
                job_id,
                result: Ok(_),
            } => (job_id.clone(), "saved"),
            RunnerEvent::JobFinished {
                job_id,
                result: Err(_),
            } => (job_id.clone(), "failed"),
        })
        .collect()
}

#[tokio::test]
async fn runner_processes_jobs_in_order_and_survives_failures() {
    let server = MockServer::start().await;
    // No document upstream for the middle identifier.
    Mock::given(method("GET"))
        .and(path("/sisacad/libretas/descarga.php"))
        .and(query_param("codal", "11111111"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sisacad/libretas/descarga.php"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PDF_BYTES, "application/pdf"))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let settings = FetchSettings {
        base_url: server.uri(),
        ..FetchSettings::default()
    };
    let fetcher = Arc::new(ReqwestFetcher::new(settings).expect("client builds"));
    let runner = BatchRunner::new(
        fetcher,
        RunnerSettings {
            pacing: Duration::from_millis(1),
            output_dir: temp.path().to_path_buf(),
        },
    );

    let jobs = jobs(&["20233489", "11111111", "20228741"]);
    let sink = TestSink::new();
    runner.run(&jobs, &sink).await;

    let events = sink.take();
    assert_eq!(
        summarize(&events),
        vec![
            ("20233489-1".to_string(), "started"),
            ("20233489-1".to_string(), "saved"),
            ("11111111-2".to_string(), "started"),
            ("11111111-2".to_string(), "failed"),
            ("20228741-3".to_string(), "started"),
            ("20228741-3".to_string(), "saved"),
        ]
    );

    // The failure in the middle must not stop the later downloads.
    let first = std::fs::read(temp.path().join("Document_20233489.pdf")).unwrap();
    assert_eq!(first, PDF_BYTES);
    assert!(!temp.path().join("Document_11111111.pdf").exists());
    assert!(temp.path().join("Document_20228741.pdf").is_file());

    let failed = events
        .iter()
        .find_map(|event| match event {
            RunnerEvent::JobFinished {
                result: Err(err), ..
            } => Some(err),
            _ => None,
        })
        .expect("one failed job");
    assert_eq!(failed.to_string(), "not found");
}

#[tokio::test]
async fn runner_paces_between_jobs() {
    let temp = TempDir::new().unwrap();
    let pacing = Duration::from_millis(120);
    let fetcher = Arc::new(ScriptedFetcher::new(&[]));
    let runner = BatchRunner::new(
        fetcher,
        RunnerSettings {
            pacing,
            output_dir: temp.path().to_path_buf(),
        },
    );

    let jobs = jobs(&["20233489", "20228741", "20231112"]);
    let sink = TestSink::new();
    let started = Instant::now();
    runner.run(&jobs, &sink).await;

    // Two gaps for three jobs.
    assert!(started.elapsed() >= pacing * 2, "elapsed: {:?}", started.elapsed());
}

#[tokio::test]
async fn runner_does_not_pace_after_the_last_job() {
    let temp = TempDir::new().unwrap();
    let fetcher = Arc::new(ScriptedFetcher::new(&[]));
    // Pacing long enough that an extra trailing sleep would blow the bound.
    let runner = BatchRunner::new(
        fetcher,
        RunnerSettings {
            pacing: Duration::from_secs(60),
            output_dir: temp.path().to_path_buf(),
        },
    );

    let jobs = jobs(&["20233489"]);
    let sink = TestSink::new();
    let started = Instant::now();
    runner.run(&jobs, &sink).await;

    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(summarize(&sink.take()).len(), 2);
}

#[tokio::test]
async fn runner_reports_save_failures() {
    let temp = TempDir::new().unwrap();
    let blocking_file = temp.path().join("not_a_dir");
    std::fs::write(&blocking_file, "x").unwrap();

    let fetcher = Arc::new(ScriptedFetcher::new(&[]));
    let runner = BatchRunner::new(
        fetcher,
        RunnerSettings {
            pacing: Duration::from_millis(1),
            output_dir: blocking_file,
        },
    );

    let jobs = jobs(&["20233489"]);
    let sink = TestSink::new();
    runner.run(&jobs, &sink).await;

    let events = sink.take();
    assert_eq!(summarize(&events)[1].1, "failed");
    match &events[1] {
        RunnerEvent::JobFinished {
            result: Err(RunError::Save(_)),
            ..
        } => {}
        other => panic!("expected a save error, got {other:?}"),
    }
}

#[tokio::test]
async fn channel_sink_forwards_events() {
    let temp = TempDir::new().unwrap();
    let fetcher = Arc::new(ScriptedFetcher::new(&[]));
    let runner = BatchRunner::new(
        fetcher,
        RunnerSettings {
            pacing: Duration::from_millis(1),
            output_dir: temp.path().to_path_buf(),
        },
    );

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let sink = ChannelEventSink::new(tx);
    runner.run(&jobs(&["20233489"]), &sink).await;

    let mut received = Vec::new();
    while let Ok(event) = rx.try_recv() {
        received.push(event);
    }
    assert_eq!(
        summarize(&received),
        vec![
            ("20233489-1".to_string(), "started"),
            ("20233489-1".to_string(), "saved"),
        ]
    );
}

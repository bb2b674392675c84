use crate::{BatchState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: BatchState, msg: Msg) -> (BatchState, Vec<Effect>) {
    let effects = match msg {
        Msg::ManifestLoaded { raw, loaded_at_ms } => {
            // A new manifest replaces the previous job set, but never while a
            // run is in flight: only one batch may be processing at a time.
            if state.is_processing() {
                return (state, Vec::new());
            }
            let (identifiers, dropped) = parse_manifest(&raw);
            state.install_jobs(identifiers, dropped, loaded_at_ms);
            Vec::new()
        }
        Msg::RunRequested => {
            if state.is_processing() {
                return (state, Vec::new());
            }
            let jobs = state.begin_run();
            if jobs.is_empty() {
                Vec::new()
            } else {
                vec![Effect::RunBatch { jobs }]
            }
        }
        Msg::JobStarted { job_id } => {
            state.apply_started(&job_id);
            Vec::new()
        }
        Msg::JobFinished { job_id, outcome } => {
            state.apply_finished(&job_id, outcome);
            Vec::new()
        }
        Msg::ClearRequested => {
            state.clear();
            Vec::new()
        }
    };

    (state, effects)
}

/// Split the manifest into identifier candidates and count the rejects.
///
/// Lines may end in LF or CRLF. Each non-empty line contributes the text up
/// to the first delimiter (comma, semicolon, or tab); candidates that are
/// not exactly eight ASCII digits are dropped without per-line reporting,
/// which also sheds any header line.
fn parse_manifest(raw: &str) -> (Vec<String>, usize) {
    let mut identifiers = Vec::new();
    let mut dropped = 0;
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let candidate = line.split([',', ';', '\t']).next().unwrap_or(line).trim();
        if is_identifier(candidate) {
            identifiers.push(candidate.to_owned());
        } else {
            dropped += 1;
        }
    }
    (identifiers, dropped)
}

fn is_identifier(candidate: &str) -> bool {
    candidate.len() == 8 && candidate.bytes().all(|b| b.is_ascii_digit())
}

//! Transcript core: pure batch state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, JobDispatch};
pub use msg::Msg;
pub use state::{BatchState, Job, JobId, JobOutcome, JobStatus, ManifestStats};
pub use update::update;
pub use view_model::{BatchViewModel, JobRowView};

use std::sync::Arc;

use transcript_engine::DocumentFetcher;

/// Shared application state: the upstream client behind every handler.
pub struct GatewayState {
    pub fetcher: Arc<dyn DocumentFetcher>,
}

impl GatewayState {
    pub fn new(fetcher: Arc<dyn DocumentFetcher>) -> Self {
        Self { fetcher }
    }
}

pub type SharedState = Arc<GatewayState>;

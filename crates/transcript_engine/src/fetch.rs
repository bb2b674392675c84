use std::time::Duration;

use crate::filename::document_filename;
use crate::identifier::Identifier;
use crate::types::{Availability, DocumentPayload, FailureKind, FetchError};

/// Default upstream serving the transcript PDFs.
pub const DEFAULT_BASE_URL: &str = "http://extranet.unsa.edu.pe";

/// The upstream rejects requests without a browser-like agent string.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub base_url: String,
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Upstream access, abstracted so the gateway and the batch runner can be
/// exercised against a fake in tests.
#[async_trait::async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Downloads the transcript PDF for `identifier`.
    async fn fetch_document(&self, identifier: &str) -> Result<DocumentPayload, FetchError>;

    /// Probes whether a transcript exists without downloading the body.
    async fn check_existence(&self, identifier: &str) -> Result<Availability, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Connection, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn document_url(&self, identifier: &Identifier) -> String {
        // The legacy upstream addresses documents through a download script
        // that takes both a server-side path and the identifier again.
        format!(
            "{base}/sisacad/libretas/descarga.php?file=/var/temporal/Libreta_De_Notas_{id}_.pdf&codal={id}",
            base = self.settings.base_url.trim_end_matches('/'),
            id = identifier,
        )
    }
}

#[async_trait::async_trait]
impl DocumentFetcher for ReqwestFetcher {
    async fn fetch_document(&self, identifier: &str) -> Result<DocumentPayload, FetchError> {
        let identifier = Identifier::parse(identifier)?;
        let url = self.document_url(&identifier);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            let bytes = response
                .bytes()
                .await
                .map_err(map_transport_error)?
                .to_vec();
            return Ok(DocumentPayload {
                bytes,
                filename: document_filename(&identifier),
            });
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::new(
                FailureKind::NotFound,
                format!("no document for identifier {identifier}"),
            ));
        }

        Err(FetchError::new(
            FailureKind::UpstreamStatus(status.as_u16()),
            status.to_string(),
        ))
    }

    async fn check_existence(&self, identifier: &str) -> Result<Availability, FetchError> {
        let identifier = Identifier::parse(identifier)?;
        let url = self.document_url(&identifier);

        let response = self
            .client
            .head(&url)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(Availability::Available);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(Availability::Missing);
        }

        Err(FetchError::new(
            FailureKind::UpstreamStatus(status.as_u16()),
            status.to_string(),
        ))
    }
}

fn map_transport_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Connection, "upstream timed out");
    }
    FetchError::new(FailureKind::Connection, err.to_string())
}

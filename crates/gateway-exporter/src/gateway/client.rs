//! HTTP client for the gateway status API.

use async_trait::async_trait;
use error_stack::Report;
use error_stack::ResultExt;
use reqwest::Client;
use tracing::debug;

use super::types::StatusDocument;
use crate::error::ScrapeError;
use crate::error::ScrapeResult;

/// Path that returns the complete status document in one response.
pub const STATUS_PATH: &str = "/TMI/v1/gateway?get=all";

/// Longest body excerpt attached to a decode failure.
const BODY_SNIPPET_LEN: usize = 256;

/// Something that can produce one fresh [`StatusDocument`] per call.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetch and decode the current status. One attempt, no retry.
    async fn fetch(&self) -> ScrapeResult<StatusDocument>;
}

/// Fetches status from a gateway over plain HTTP
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: Client,
    url: String,
}

impl GatewayClient {
    /// Create a client for `target`, either a bare `host[:port]` or a base URL
    /// with an explicit `http://`/`https://` scheme.
    pub fn new(target: &str) -> ScrapeResult<Self> {
        let http = Client::builder()
            .build()
            .change_context(ScrapeError::ClientSetup {
                target: target.to_string(),
            })?;

        Ok(Self {
            http,
            url: status_url(target),
        })
    }

    /// Full URL that every fetch requests
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl StatusSource for GatewayClient {
    async fn fetch(&self) -> ScrapeResult<StatusDocument> {
        debug!(url = %self.url, "Fetching gateway status");

        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .change_context_lazy(|| ScrapeError::Transport {
                url: self.url.clone(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Report::new(ScrapeError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            }));
        }

        let body = response
            .bytes()
            .await
            .change_context_lazy(|| ScrapeError::Transport {
                url: self.url.clone(),
            })?;

        serde_json::from_slice(&body)
            .change_context_lazy(|| ScrapeError::Decode {
                url: self.url.clone(),
            })
            .attach_printable_lazy(|| format!("response body: {}", body_snippet(&body)))
    }
}

fn status_url(target: &str) -> String {
    let target = target.trim().trim_end_matches('/');
    if target.starts_with("http://") || target.starts_with("https://") {
        format!("{target}{STATUS_PATH}")
    } else {
        format!("http://{target}{STATUS_PATH}")
    }
}

fn body_snippet(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    match text.char_indices().nth(BODY_SNIPPET_LEN) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.into_owned(),
    }
}

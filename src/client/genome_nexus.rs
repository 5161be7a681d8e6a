//! HTTP exchange against the Genome Nexus annotation API.
//!
//! Batches are posted to `/annotation/genomic` with the genomic locations as a
//! JSON array. Only the annotation summary is requested.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use tracing::{debug, warn};

use crate::client::exchange::{AnnotationExchange, ExchangeError};
use crate::core::annotation::AnnotationResult;
use crate::core::query::GenomicLocationQuery;

/// Public Genome Nexus server
pub const DEFAULT_BASE_URL: &str = "https://www.genomenexus.org";

/// Isoform override source used unless configured otherwise
pub const DEFAULT_ISOFORM_OVERRIDE_SOURCE: &str = "mskcc";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Response fields requested from the service
pub const ANNOTATION_FIELDS: &str = "annotation_summary";

/// Maximum number of characters of an error body kept in `ExchangeError::Status`
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Connection settings for the annotation service
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub isoform_override_source: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            isoform_override_source: DEFAULT_ISOFORM_OVERRIDE_SOURCE.to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Genome Nexus client
#[derive(Debug, Clone)]
pub struct GenomeNexusClient {
    client: Client,
    config: ClientConfig,
}

impl GenomeNexusClient {
    /// Build a client with the given settings
    ///
    /// # Errors
    ///
    /// Returns `ExchangeError::Http` if the underlying HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ExchangeError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Full URL of the genomic-location annotation endpoint
    #[must_use]
    pub fn endpoint(&self) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        format!("{base}/annotation/genomic")
    }

    fn query_params(&self) -> Vec<(&'static str, &str)> {
        let mut params = vec![("fields", ANNOTATION_FIELDS)];
        let source = self.config.isoform_override_source.as_str();
        if !source.is_empty() {
            params.push(("isoformOverrideSource", source));
        }
        if let Some(token) = self.config.token.as_deref().filter(|t| !t.is_empty()) {
            params.push(("token", token));
        }
        params
    }
}

impl AnnotationExchange for GenomeNexusClient {
    async fn submit_batch(
        &self,
        queries: &[GenomicLocationQuery],
    ) -> Result<Vec<AnnotationResult>, ExchangeError> {
        let endpoint = self.endpoint();
        debug!("POST {} with {} genomic locations", endpoint, queries.len());

        let body = serde_json::to_vec(queries)?;
        let response = self
            .client
            .post(&endpoint)
            .query(&self.query_params())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                warn!("Annotation request to {} failed: {}", endpoint, e);
                ExchangeError::Http(e)
            })?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!("Annotation service returned HTTP {}", status.as_u16());
            return Err(ExchangeError::Status {
                status: status.as_u16(),
                body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let results: Vec<AnnotationResult> = serde_json::from_str(&text)?;
        debug!("Received {} variant annotations", results.len());
        Ok(results)
    }
}

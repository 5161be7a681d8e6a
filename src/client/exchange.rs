use std::future::Future;

use thiserror::Error;
use tracing::debug;

use crate::core::annotation::AnnotationResult;
use crate::core::query::GenomicLocationQuery;

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Annotation service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode annotation response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Annotation service unavailable: {0}")]
    Unavailable(String),
}

/// The "submit batch" operation the annotator consumes.
///
/// One call per batch: either the complete response list comes back, or an
/// error that fails the whole batch. Results may be in any order.
pub trait AnnotationExchange {
    fn submit_batch(
        &self,
        queries: &[GenomicLocationQuery],
    ) -> impl Future<Output = Result<Vec<AnnotationResult>, ExchangeError>> + Send;
}

/// Exchange that answers every batch with a fixed, previously saved response
#[derive(Debug, Clone, Default)]
pub struct ReplayExchange {
    results: Vec<AnnotationResult>,
}

impl ReplayExchange {
    #[must_use]
    pub fn new(results: Vec<AnnotationResult>) -> Self {
        Self { results }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl AnnotationExchange for ReplayExchange {
    async fn submit_batch(
        &self,
        queries: &[GenomicLocationQuery],
    ) -> Result<Vec<AnnotationResult>, ExchangeError> {
        debug!(
            "Replaying {} saved annotations for {} queries",
            self.results.len(),
            queries.len()
        );
        Ok(self.results.clone())
    }
}

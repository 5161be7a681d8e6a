use serde::{Deserialize, Serialize};

use crate::core::types::StripMode;
use crate::correlation::CorrelationPolicy;

/// Configuration for the annotator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatorConfig {
    /// How the input alleles are trimmed when the annotation echo is used
    pub strip_mode: StripMode,
    /// Policy for matching results back to records
    pub correlation: CorrelationPolicy,
    /// Resolve records on the rayon thread pool
    pub parallel: bool,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            strip_mode: StripMode::All,
            correlation: CorrelationPolicy::Keyed,
            parallel: true,
        }
    }
}

impl AnnotatorConfig {
    #[must_use]
    pub fn with_strip_mode(mut self, strip_mode: StripMode) -> Self {
        self.strip_mode = strip_mode;
        self
    }

    #[must_use]
    pub fn with_correlation(mut self, correlation: CorrelationPolicy) -> Self {
        self.correlation = correlation;
        self
    }

    #[must_use]
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

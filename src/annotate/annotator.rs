use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::annotate::config::AnnotatorConfig;
use crate::client::exchange::{AnnotationExchange, ExchangeError};
use crate::core::annotation::AnnotationResult;
use crate::core::query::GenomicLocationQuery;
use crate::core::record::MutationRecord;
use crate::core::types::FailureReason;
use crate::correlation::engine::{Correlation, CorrelationStrategy, CountMismatch, Uncorrelated};
use crate::correlation::mutator::{annotate_record, mark_failed};
use crate::resolve::patterns::ResolverPatterns;

#[derive(Error, Debug)]
pub enum AnnotateError {
    #[error("Annotation exchange failed: {0}")]
    Exchange(#[from] ExchangeError),

    #[error("Failed to compile resolver patterns: {0}")]
    Patterns(#[from] regex::Error),
}

/// Summary of one annotation cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnnotationReport {
    /// Records submitted to the exchange
    pub submitted: usize,
    /// Results returned by the exchange
    pub returned: usize,
    /// Records left with SUCCESS status
    pub succeeded: usize,
    /// Records left with FAILED status
    pub failed: usize,
    /// Records that received no result
    pub unmatched: usize,
    /// Results that could not be assigned (missing echo, unknown key, surplus)
    pub uncorrelated: usize,
    /// Results repeating an already answered key
    pub duplicates: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count_mismatch: Option<CountMismatch>,
}

impl AnnotationReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed == 0 && self.uncorrelated == 0 && self.duplicates == 0
    }
}

/// Drives one batch through exchange, correlation and per-record resolution
pub struct Annotator<E> {
    exchange: E,
    config: AnnotatorConfig,
    patterns: ResolverPatterns,
    strategy: Box<dyn CorrelationStrategy>,
}

impl<E: AnnotationExchange> Annotator<E> {
    /// Create an annotator using the correlation policy named in `config`
    ///
    /// # Errors
    ///
    /// Returns `AnnotateError::Patterns` if the resolver patterns fail to compile.
    pub fn new(exchange: E, config: AnnotatorConfig) -> Result<Self, AnnotateError> {
        Ok(Self {
            exchange,
            config,
            patterns: ResolverPatterns::new()?,
            strategy: config.correlation.strategy(),
        })
    }

    /// Replace the correlation strategy
    #[must_use]
    pub fn with_strategy(mut self, strategy: Box<dyn CorrelationStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub fn exchange(&self) -> &E {
        &self.exchange
    }

    #[must_use]
    pub fn config(&self) -> &AnnotatorConfig {
        &self.config
    }

    #[must_use]
    pub fn patterns(&self) -> &ResolverPatterns {
        &self.patterns
    }

    /// Annotate every record in place.
    ///
    /// Each record ends the cycle with either SUCCESS and all resolved fields,
    /// or FAILED with a reason and its other fields untouched.
    ///
    /// # Errors
    ///
    /// Returns `AnnotateError::Exchange` if the batch could not be exchanged;
    /// no record is modified in that case.
    pub async fn annotate(
        &self,
        records: &mut [MutationRecord],
    ) -> Result<AnnotationReport, AnnotateError> {
        if records.is_empty() {
            debug!("No records to annotate");
            return Ok(AnnotationReport::default());
        }

        let queries: Vec<GenomicLocationQuery> = records
            .iter()
            .map(|record| GenomicLocationQuery::from_record(record, &self.patterns))
            .collect();

        info!(
            "Submitting {} genomic locations for annotation",
            queries.len()
        );
        let results = self.exchange.submit_batch(&queries).await?;
        info!("Received {} variant annotations", results.len());

        let correlation = self.strategy.correlate(&queries, &results);
        log_diagnostics(self.strategy.name(), &correlation);

        self.apply(records, &queries, &results, &correlation);

        let report = build_report(records, &queries, &results, &correlation);
        info!(
            "Annotation finished: {} succeeded, {} failed",
            report.succeeded, report.failed
        );
        Ok(report)
    }

    fn apply(
        &self,
        records: &mut [MutationRecord],
        queries: &[GenomicLocationQuery],
        results: &[AnnotationResult],
        correlation: &Correlation,
    ) {
        let patterns = &self.patterns;
        let strip_mode = self.config.strip_mode;

        let resolve_one = |(idx, record): (usize, &mut MutationRecord)| {
            let query = &queries[idx];
            // A short assignment list or a stale result index counts as no result
            let result = correlation
                .assignments
                .get(idx)
                .copied()
                .flatten()
                .and_then(|result_idx| results.get(result_idx));
            match result {
                Some(result) => annotate_record(record, query, result, strip_mode, patterns),
                None => mark_failed(record, FailureReason::Unmatched { key: query.key() }),
            }
            let status = record.annotation_status.as_ref();
            if let Some(status) = status.filter(|s| !s.is_success()) {
                debug!("Record {}: {}", idx, status);
            }
        };

        if self.config.parallel {
            records.par_iter_mut().enumerate().for_each(resolve_one);
        } else {
            records.iter_mut().enumerate().for_each(resolve_one);
        }
    }
}

fn log_diagnostics(strategy: &str, correlation: &Correlation) {
    if let Some(mismatch) = correlation.count_mismatch {
        warn!("{} correlation: {}", strategy, mismatch);
    }

    for (result_idx, reason) in &correlation.uncorrelated {
        match reason {
            Uncorrelated::MissingEcho => {
                warn!(
                    "Annotation {} carries no original query; ignored",
                    result_idx
                );
            }
            Uncorrelated::UnknownKey { key } => {
                warn!(
                    "Annotation {} answers unknown genomic location {}; ignored",
                    result_idx, key
                );
            }
            Uncorrelated::Duplicate { key } => {
                warn!(
                    "Annotation {} repeats genomic location {}; first result kept",
                    result_idx, key
                );
            }
            Uncorrelated::Surplus => {
                warn!(
                    "Annotation {} has no submitted genomic location; ignored",
                    result_idx
                );
            }
        }
    }
}

fn build_report(
    records: &[MutationRecord],
    queries: &[GenomicLocationQuery],
    results: &[AnnotationResult],
    correlation: &Correlation,
) -> AnnotationReport {
    let statuses = || records.iter().filter_map(|r| r.annotation_status.as_ref());
    let succeeded = statuses().filter(|s| s.is_success()).count();
    let unmatched = statuses().filter(|s| s.is_unmatched()).count();
    let duplicates = correlation
        .uncorrelated
        .iter()
        .filter(|(_, reason)| matches!(reason, Uncorrelated::Duplicate { .. }))
        .count();

    AnnotationReport {
        submitted: queries.len(),
        returned: results.len(),
        succeeded,
        failed: records.len() - succeeded,
        unmatched,
        uncorrelated: correlation.uncorrelated.len() - duplicates,
        duplicates,
        count_mismatch: correlation.count_mismatch,
    }
}

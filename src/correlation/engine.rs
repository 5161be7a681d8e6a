use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::annotation::AnnotationResult;
use crate::core::query::GenomicLocationQuery;
use crate::core::types::CorrelationKey;

/// Why a returned annotation could not be assigned to any record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Uncorrelated {
    /// The result carries no query echo
    MissingEcho,
    /// The echoed key matches no submitted query
    UnknownKey { key: CorrelationKey },
    /// Another result already answered this key
    Duplicate { key: CorrelationKey },
    /// Positional pairing ran out of submitted queries
    Surplus,
}

/// Response count differs from request count under positional pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountMismatch {
    pub submitted: usize,
    pub returned: usize,
}

impl std::fmt::Display for CountMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "returned number of variant annotations ({}) does not match genomic locations submitted ({})",
            self.returned, self.submitted
        )
    }
}

/// Outcome of correlating one response batch with the submitted queries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Correlation {
    /// For each submitted query index, the index of the result assigned to it
    pub assignments: Vec<Option<usize>>,

    /// Results that were not assigned to any record, with the reason
    pub uncorrelated: Vec<(usize, Uncorrelated)>,

    /// Set when response and request counts differ under positional pairing
    pub count_mismatch: Option<CountMismatch>,
}

impl Correlation {
    fn unassigned(submitted: usize) -> Self {
        Self {
            assignments: vec![None; submitted],
            uncorrelated: Vec::new(),
            count_mismatch: None,
        }
    }

    /// Number of record indices that received a result
    #[must_use]
    pub fn assigned_count(&self) -> usize {
        self.assignments.iter().filter(|a| a.is_some()).count()
    }

    /// Record indices left without a result
    pub fn unassigned_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.assignments
            .iter()
            .enumerate()
            .filter_map(|(i, a)| a.is_none().then_some(i))
    }
}

/// Policy for matching response elements back to submitted queries
///
/// Implementations return one `assignments` slot per submitted query, each
/// naming at most one index into `results`. A missing slot or an index past
/// the end of `results` leaves that record FAILED as unmatched.
pub trait CorrelationStrategy: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    fn correlate(
        &self,
        queries: &[GenomicLocationQuery],
        results: &[AnnotationResult],
    ) -> Correlation;
}

/// Selectable correlation policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationPolicy {
    /// Match on the echoed genomic-location key
    #[default]
    Keyed,
    /// Pair results with queries by position
    Positional,
}

impl CorrelationPolicy {
    #[must_use]
    pub fn strategy(self) -> Box<dyn CorrelationStrategy> {
        match self {
            Self::Keyed => Box::new(KeyedCorrelation),
            Self::Positional => Box::new(PositionalCorrelation),
        }
    }
}

/// Correlate by the `originalVariantQuery` echo.
///
/// Tolerates reordered, dropped and deduplicated responses: identical
/// queries share a key, so one result populates every record submitted
/// under it.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyedCorrelation;

impl KeyedCorrelation {
    /// Index: key -> submitted query indices, in submission order
    #[must_use]
    pub fn key_index(queries: &[GenomicLocationQuery]) -> HashMap<CorrelationKey, Vec<usize>> {
        let mut index: HashMap<CorrelationKey, Vec<usize>> = HashMap::new();
        for (i, query) in queries.iter().enumerate() {
            index.entry(query.key()).or_default().push(i);
        }
        index
    }
}

impl CorrelationStrategy for KeyedCorrelation {
    fn name(&self) -> &'static str {
        "keyed"
    }

    fn correlate(
        &self,
        queries: &[GenomicLocationQuery],
        results: &[AnnotationResult],
    ) -> Correlation {
        // Complete before any result is looked at
        let index = Self::key_index(queries);
        let mut correlation = Correlation::unassigned(queries.len());

        for (result_idx, result) in results.iter().enumerate() {
            let Some(key) = result.echoed_key() else {
                correlation
                    .uncorrelated
                    .push((result_idx, Uncorrelated::MissingEcho));
                continue;
            };

            let Some(record_indices) = index.get(&key) else {
                correlation
                    .uncorrelated
                    .push((result_idx, Uncorrelated::UnknownKey { key }));
                continue;
            };

            // Every index under a key is assigned together, so checking the
            // first is enough to detect a repeated answer.
            if correlation.assignments[record_indices[0]].is_some() {
                correlation
                    .uncorrelated
                    .push((result_idx, Uncorrelated::Duplicate { key }));
                continue;
            }

            for &record_idx in record_indices {
                correlation.assignments[record_idx] = Some(result_idx);
            }
        }

        correlation
    }
}

/// Pair result *i* with query *i* (legacy protocol)
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalCorrelation;

impl CorrelationStrategy for PositionalCorrelation {
    fn name(&self) -> &'static str {
        "positional"
    }

    fn correlate(
        &self,
        queries: &[GenomicLocationQuery],
        results: &[AnnotationResult],
    ) -> Correlation {
        let mut correlation = Correlation::unassigned(queries.len());

        if queries.len() != results.len() {
            correlation.count_mismatch = Some(CountMismatch {
                submitted: queries.len(),
                returned: results.len(),
            });
        }

        for result_idx in 0..results.len() {
            if let Some(slot) = correlation.assignments.get_mut(result_idx) {
                *slot = Some(result_idx);
            } else {
                correlation
                    .uncorrelated
                    .push((result_idx, Uncorrelated::Surplus));
            }
        }

        correlation
    }
}

use serde::{Deserialize, Serialize};

use crate::core::record::MutationRecord;
use crate::core::types::CorrelationKey;
use crate::resolve::allele::resolve_alt_allele;
use crate::resolve::patterns::ResolverPatterns;

/// The genomic location submitted to the annotation service for one record
///
/// Serialized with the field names the Genome Nexus `GenomicLocation` model uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenomicLocationQuery {
    pub chromosome: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
    pub reference_allele: String,
    pub variant_allele: String,
}

impl GenomicLocationQuery {
    pub fn new(
        chromosome: impl Into<String>,
        start: Option<i64>,
        end: Option<i64>,
        reference_allele: impl Into<String>,
        variant_allele: impl Into<String>,
    ) -> Self {
        Self {
            chromosome: chromosome.into(),
            start,
            end,
            reference_allele: reference_allele.into(),
            variant_allele: variant_allele.into(),
        }
    }

    /// Project a record onto the location sent for annotation.
    ///
    /// The variant allele is resolved from the raw input alleles; nothing from
    /// a previous annotation is consulted.
    #[must_use]
    pub fn from_record(record: &MutationRecord, patterns: &ResolverPatterns) -> Self {
        Self {
            chromosome: record.chromosome.trim().to_string(),
            start: parse_position(&record.start_position),
            end: parse_position(&record.end_position),
            reference_allele: record.reference_allele.clone(),
            variant_allele: resolve_alt_allele(
                &record.reference_allele,
                &record.tumor_seq_allele1,
                &record.tumor_seq_allele2,
                patterns,
            ),
        }
    }

    /// Correlation key: `chromosome,start,end,reference,variant`
    #[must_use]
    pub fn key(&self) -> CorrelationKey {
        CorrelationKey(format!(
            "{},{},{},{},{}",
            self.chromosome,
            format_position(self.start),
            format_position(self.end),
            self.reference_allele,
            self.variant_allele
        ))
    }
}

fn parse_position(s: &str) -> Option<i64> {
    s.trim().parse().ok()
}

pub(crate) fn format_position(position: Option<i64>) -> String {
    position.map(|p| p.to_string()).unwrap_or_default()
}

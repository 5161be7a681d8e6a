//! Annotation response model.
//!
//! Mirrors the subset of the Genome Nexus `VariantAnnotation` schema that the
//! resolvers read. Every field is optional: the service omits whatever it
//! could not compute, and unknown fields are ignored.
//!
//! The NCBI build is read from the top-level `assembly_name` only; the
//! summary's `assemblyName` is not part of this model.

use serde::{Deserialize, Serialize};

use crate::core::types::CorrelationKey;

/// One element of an annotation batch response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationResult {
    /// Echo of the query string this result answers
    #[serde(
        rename = "originalVariantQuery",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub original_variant_query: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assembly_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successfully_annotated: Option<bool>,

    #[serde(
        rename = "colocatedVariants",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub colocated_variants: Vec<ColocatedVariant>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation_summary: Option<AnnotationSummary>,
}

impl AnnotationResult {
    /// Whether the service reported this variant as annotated.
    /// A missing flag counts as unsuccessful.
    #[must_use]
    pub fn is_successful(&self) -> bool {
        self.successfully_annotated.unwrap_or(false)
    }

    /// The echoed query key, if present and non-empty
    #[must_use]
    pub fn echoed_key(&self) -> Option<CorrelationKey> {
        self.original_variant_query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(CorrelationKey::new)
    }

    /// Genomic-location echo from the summary, if any
    #[must_use]
    pub fn genomic_location(&self) -> Option<&GenomicLocationEcho> {
        self.annotation_summary
            .as_ref()
            .and_then(|s| s.genomic_location.as_ref())
    }
}

/// Summary substructure of an annotation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genomic_location: Option<GenomicLocationEcho>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strand_sign: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript_consequences: Option<Vec<TranscriptConsequence>>,
}

/// The location the service actually annotated (after its own normalization)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenomicLocationEcho {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chromosome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_allele: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_allele: Option<String>,
}

/// A known variant at the same position
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColocatedVariant {
    #[serde(rename = "dbSnpId", default, skip_serializing_if = "Option::is_none")]
    pub dbsnp_id: Option<String>,
}

/// Amino-acid range affected on the protein
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProteinPosition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
}

/// Effect of the variant on one transcript
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptConsequence {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hugo_gene_symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entrez_gene_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_classification: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hgvsc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hgvsp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hgvsp_short: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_seq: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codon_change: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consequence_terms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_position: Option<ProteinPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sift_prediction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sift_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polyphen_prediction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polyphen_score: Option<f64>,
}

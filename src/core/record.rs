use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::types::AnnotationStatus;

/// A single genomic variant under annotation
///
/// Identity fields come from the caller; annotation fields are overwritten by
/// a successful annotation cycle. Any additional columns from the input are
/// kept in `extra` and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationRecord {
    // === Identity ===
    pub chromosome: String,
    pub start_position: String,
    pub end_position: String,
    pub reference_allele: String,
    pub tumor_seq_allele1: String,
    pub tumor_seq_allele2: String,
    pub tumor_sample_barcode: String,

    // === Annotation output ===
    pub hugo_symbol: String,
    pub entrez_gene_id: String,
    pub ncbi_build: String,
    pub strand: String,
    pub variant_classification: String,
    pub variant_type: String,
    pub dbsnp_rs: String,
    pub hgvsc: String,
    pub hgvsp: String,
    pub hgvsp_short: String,
    pub transcript_id: String,
    pub refseq: String,
    pub codons: String,
    pub consequence: String,
    pub protein_position: String,
    pub exon_number: String,
    pub polyphen_prediction: String,
    pub polyphen_score: String,
    pub sift_prediction: String,
    pub sift_score: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation_status: Option<AnnotationStatus>,

    /// Pass-through columns not interpreted by the annotator
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl MutationRecord {
    pub fn new(
        chromosome: impl Into<String>,
        start_position: impl Into<String>,
        end_position: impl Into<String>,
        reference_allele: impl Into<String>,
    ) -> Self {
        Self {
            chromosome: chromosome.into(),
            start_position: start_position.into(),
            end_position: end_position.into(),
            reference_allele: reference_allele.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_tumor_alleles(
        mut self,
        allele1: impl Into<String>,
        allele2: impl Into<String>,
    ) -> Self {
        self.tumor_seq_allele1 = allele1.into();
        self.tumor_seq_allele2 = allele2.into();
        self
    }

    #[must_use]
    pub fn with_sample(mut self, barcode: impl Into<String>) -> Self {
        self.tumor_sample_barcode = barcode.into();
        self
    }

    /// True once a cycle has written a terminal status
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.annotation_status.is_some()
    }

    #[must_use]
    pub fn is_annotated(&self) -> bool {
        self.annotation_status
            .as_ref()
            .is_some_and(AnnotationStatus::is_success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_partial_record() {
        let json = r#"{
            "chromosome": "17",
            "start_position": "7577120",
            "end_position": "7577120",
            "reference_allele": "C",
            "tumor_seq_allele1": "C",
            "tumor_seq_allele2": "T",
            "t_alt_count": 42
        }"#;

        let record: MutationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.chromosome, "17");
        assert_eq!(record.tumor_seq_allele2, "T");
        assert!(record.hugo_symbol.is_empty());
        assert!(!record.is_resolved());
        assert_eq!(record.extra["t_alt_count"], 42);
    }

    #[test]
    fn test_extra_columns_round_trip() {
        let mut record = MutationRecord::new("1", "100", "100", "A").with_tumor_alleles("A", "G");
        record
            .extra
            .insert("Center".to_string(), serde_json::Value::from("MSKCC"));

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"Center\":\"MSKCC\""));
        assert!(!json.contains("annotation_status"));

        let back: MutationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}

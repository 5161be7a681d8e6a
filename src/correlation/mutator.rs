use crate::core::annotation::AnnotationResult;
use crate::core::query::GenomicLocationQuery;
use crate::core::record::MutationRecord;
use crate::core::types::{AnnotationStatus, FailureReason, StripMode};
use crate::resolve::fields::{resolve_fields, ResolvedFields};
use crate::resolve::patterns::ResolverPatterns;

/// Resolve and apply one correlated annotation to its record.
///
/// An annotation the service flagged as unsuccessful only sets the failure
/// status; otherwise every field is resolved before the record is touched.
pub fn annotate_record(
    record: &mut MutationRecord,
    query: &GenomicLocationQuery,
    result: &AnnotationResult,
    strip_mode: StripMode,
    patterns: &ResolverPatterns,
) {
    if !result.is_successful() {
        mark_failed(record, FailureReason::Unsuccessful { key: query.key() });
        return;
    }

    let fields = resolve_fields(result, query, record, strip_mode, patterns);
    apply_fields(record, fields);
}

/// Write a complete set of resolved fields and mark the record successful
pub fn apply_fields(record: &mut MutationRecord, fields: ResolvedFields) {
    record.chromosome = fields.chromosome;
    record.start_position = fields.start_position;
    record.end_position = fields.end_position;
    record.strand = fields.strand;
    record.ncbi_build = fields.ncbi_build;
    record.hugo_symbol = fields.hugo_symbol;
    record.entrez_gene_id = fields.entrez_gene_id;
    record.variant_classification = fields.variant_classification;
    record.variant_type = fields.variant_type;
    record.dbsnp_rs = fields.dbsnp_rs;
    record.hgvsc = fields.hgvsc;
    record.hgvsp = fields.hgvsp;
    record.hgvsp_short = fields.hgvsp_short;
    record.transcript_id = fields.transcript_id;
    record.refseq = fields.refseq;
    record.codons = fields.codons;
    record.consequence = fields.consequence;
    record.protein_position = fields.protein_position;
    record.exon_number = fields.exon_number;
    record.polyphen_prediction = fields.polyphen_prediction;
    record.polyphen_score = fields.polyphen_score;
    record.sift_prediction = fields.sift_prediction;
    record.sift_score = fields.sift_score;
    record.reference_allele = fields.alleles.reference;
    record.tumor_seq_allele1 = fields.alleles.tumor_seq_allele1;
    record.tumor_seq_allele2 = fields.alleles.tumor_seq_allele2;
    record.annotation_status = Some(AnnotationStatus::Success);
}

/// Set only the failure status; every other field is left as it was
pub fn mark_failed(record: &mut MutationRecord, reason: FailureReason) {
    record.annotation_status = Some(AnnotationStatus::Failed { reason });
}

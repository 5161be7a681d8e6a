//! Per-field resolution of annotation output.
//!
//! Each function resolves one output column from an annotation, preferring
//! the most specific value available and falling back to a fixed default or
//! the record's existing value. None of them fail, and all accept an absent
//! canonical transcript.

use serde::Serialize;

use crate::core::annotation::{AnnotationResult, TranscriptConsequence};
use crate::core::query::{format_position, GenomicLocationQuery};
use crate::core::record::MutationRecord;
use crate::core::types::StripMode;
use crate::resolve::allele::{resolve_reference_and_alt, ResolvedAlleles};
use crate::resolve::patterns::ResolverPatterns;
use crate::resolve::transcript::select_canonical;

/// Build reported when the annotation carries no assembly name
pub const DEFAULT_NCBI_BUILD: &str = "37";

/// Strand reported when the annotation carries no strand sign
pub const DEFAULT_STRAND: &str = "+";

/// Hugo symbol written when no canonical transcript provides one
pub const FAILED_HUGO_SYMBOL: &str = "FAILED";

/// Every output field of one annotated record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedFields {
    pub chromosome: String,
    pub start_position: String,
    pub end_position: String,
    pub strand: String,
    pub ncbi_build: String,
    pub hugo_symbol: String,
    pub entrez_gene_id: String,
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
    pub alleles: ResolvedAlleles,
}

/// Resolve every output field of `record` from `result`.
///
/// The canonical transcript is selected once and shared by all field
/// resolvers. The record is only read.
#[must_use]
pub fn resolve_fields(
    result: &AnnotationResult,
    query: &GenomicLocationQuery,
    record: &MutationRecord,
    strip_mode: StripMode,
    patterns: &ResolverPatterns,
) -> ResolvedFields {
    let canonical = select_canonical(result);

    ResolvedFields {
        chromosome: resolve_chromosome(result, query),
        start_position: resolve_start(result, query),
        end_position: resolve_end(result, query),
        strand: resolve_strand_sign(result),
        ncbi_build: resolve_assembly_name(result),
        hugo_symbol: resolve_hugo_symbol(canonical),
        entrez_gene_id: resolve_entrez_gene_id(canonical),
        variant_classification: resolve_variant_classification(canonical, record),
        variant_type: resolve_variant_type(result),
        dbsnp_rs: resolve_dbsnp_rs(result, patterns),
        hgvsc: resolve_hgvsc(canonical),
        hgvsp: resolve_hgvsp(canonical),
        hgvsp_short: resolve_hgvsp_short(canonical),
        transcript_id: resolve_transcript_id(canonical),
        refseq: resolve_refseq(canonical),
        codons: resolve_codon_change(canonical),
        consequence: resolve_consequence(canonical),
        protein_position: resolve_protein_position(canonical, patterns),
        exon_number: resolve_exon(canonical),
        polyphen_prediction: resolve_polyphen_prediction(canonical),
        polyphen_score: resolve_polyphen_score(canonical),
        sift_prediction: resolve_sift_prediction(canonical),
        sift_score: resolve_sift_score(canonical),
        alleles: resolve_reference_and_alt(result, record, strip_mode, patterns),
    }
}

// === Location ===

#[must_use]
pub fn resolve_chromosome(result: &AnnotationResult, query: &GenomicLocationQuery) -> String {
    result
        .genomic_location()
        .and_then(|l| l.chromosome.clone())
        .unwrap_or_else(|| query.chromosome.clone())
}

#[must_use]
pub fn resolve_start(result: &AnnotationResult, query: &GenomicLocationQuery) -> String {
    let start = result.genomic_location().and_then(|l| l.start);
    format_position(start.or(query.start))
}

#[must_use]
pub fn resolve_end(result: &AnnotationResult, query: &GenomicLocationQuery) -> String {
    let end = result.genomic_location().and_then(|l| l.end);
    format_position(end.or(query.end))
}

#[must_use]
pub fn resolve_strand_sign(result: &AnnotationResult) -> String {
    result
        .annotation_summary
        .as_ref()
        .and_then(|s| s.strand_sign.clone())
        .unwrap_or_else(|| DEFAULT_STRAND.to_string())
}

#[must_use]
pub fn resolve_assembly_name(result: &AnnotationResult) -> String {
    result
        .assembly_name
        .clone()
        .unwrap_or_else(|| DEFAULT_NCBI_BUILD.to_string())
}

#[must_use]
pub fn resolve_variant_type(result: &AnnotationResult) -> String {
    result
        .annotation_summary
        .as_ref()
        .and_then(|s| s.variant_type.clone())
        .unwrap_or_default()
}

/// First colocated variant id that looks like a dbSNP rs id, in response order
#[must_use]
pub fn resolve_dbsnp_rs(result: &AnnotationResult, patterns: &ResolverPatterns) -> String {
    result
        .colocated_variants
        .iter()
        .filter_map(|cv| cv.dbsnp_id.as_deref())
        .find(|id| patterns.is_rsid(id))
        .map(str::to_string)
        .unwrap_or_default()
}

// === Canonical transcript ===

/// Read an optional text field of the canonical transcript, empty when absent
fn transcript_text<F>(canonical: Option<&TranscriptConsequence>, field: F) -> String
where
    F: Fn(&TranscriptConsequence) -> Option<&String>,
{
    canonical.and_then(field).cloned().unwrap_or_default()
}

#[must_use]
pub fn resolve_hugo_symbol(canonical: Option<&TranscriptConsequence>) -> String {
    canonical
        .and_then(|t| t.hugo_gene_symbol.clone())
        .unwrap_or_else(|| FAILED_HUGO_SYMBOL.to_string())
}

#[must_use]
pub fn resolve_entrez_gene_id(canonical: Option<&TranscriptConsequence>) -> String {
    transcript_text(canonical, |t| t.entrez_gene_id.as_ref())
}

/// Canonical classification, else whatever the record already carries
#[must_use]
pub fn resolve_variant_classification(
    canonical: Option<&TranscriptConsequence>,
    record: &MutationRecord,
) -> String {
    canonical
        .and_then(|t| t.variant_classification.clone())
        .unwrap_or_else(|| record.variant_classification.clone())
}

#[must_use]
pub fn resolve_hgvsc(canonical: Option<&TranscriptConsequence>) -> String {
    transcript_text(canonical, |t| t.hgvsc.as_ref())
}

#[must_use]
pub fn resolve_hgvsp(canonical: Option<&TranscriptConsequence>) -> String {
    transcript_text(canonical, |t| t.hgvsp.as_ref())
}

#[must_use]
pub fn resolve_hgvsp_short(canonical: Option<&TranscriptConsequence>) -> String {
    transcript_text(canonical, |t| t.hgvsp_short.as_ref())
}

#[must_use]
pub fn resolve_transcript_id(canonical: Option<&TranscriptConsequence>) -> String {
    transcript_text(canonical, |t| t.transcript_id.as_ref())
}

#[must_use]
pub fn resolve_refseq(canonical: Option<&TranscriptConsequence>) -> String {
    transcript_text(canonical, |t| t.ref_seq.as_ref())
}

#[must_use]
pub fn resolve_codon_change(canonical: Option<&TranscriptConsequence>) -> String {
    transcript_text(canonical, |t| t.codon_change.as_ref())
}

#[must_use]
pub fn resolve_consequence(canonical: Option<&TranscriptConsequence>) -> String {
    transcript_text(canonical, |t| t.consequence_terms.as_ref())
}

#[must_use]
pub fn resolve_exon(canonical: Option<&TranscriptConsequence>) -> String {
    transcript_text(canonical, |t| t.exon.as_ref())
}

#[must_use]
pub fn resolve_protein_start(canonical: Option<&TranscriptConsequence>) -> String {
    let position = canonical.and_then(|t| t.protein_position);
    format_position(position.and_then(|p| p.start))
}

#[must_use]
pub fn resolve_protein_end(canonical: Option<&TranscriptConsequence>) -> String {
    let position = canonical.and_then(|t| t.protein_position);
    format_position(position.and_then(|p| p.end))
}

/// Explicit protein start, else the position parsed out of HGVSp short
#[must_use]
pub fn resolve_protein_position(
    canonical: Option<&TranscriptConsequence>,
    patterns: &ResolverPatterns,
) -> String {
    let start = resolve_protein_start(canonical);
    if !start.is_empty() {
        return start;
    }

    let hgvsp_short = resolve_hgvsp_short(canonical);
    patterns
        .protein_position(&hgvsp_short)
        .map(str::to_string)
        .unwrap_or_default()
}

#[must_use]
pub fn resolve_sift_prediction(canonical: Option<&TranscriptConsequence>) -> String {
    transcript_text(canonical, |t| t.sift_prediction.as_ref())
}

#[must_use]
pub fn resolve_sift_score(canonical: Option<&TranscriptConsequence>) -> String {
    canonical
        .and_then(|t| t.sift_score)
        .map(format_score)
        .unwrap_or_default()
}

#[must_use]
pub fn resolve_polyphen_prediction(canonical: Option<&TranscriptConsequence>) -> String {
    transcript_text(canonical, |t| t.polyphen_prediction.as_ref())
}

#[must_use]
pub fn resolve_polyphen_score(canonical: Option<&TranscriptConsequence>) -> String {
    canonical
        .and_then(|t| t.polyphen_score)
        .map(format_score)
        .unwrap_or_default()
}

// === Score formatting ===

/// Significant digits kept for non-integral scores
const SCORE_SIGNIFICANT_DIGITS: usize = 3;

/// Format a prediction score for output.
///
/// Integral values get one decimal place (`2.0`). Anything else is written in
/// shortest form with three significant digits (`0.333`, `0.05`, `1.2e-05`).
#[must_use]
pub fn format_score(score: f64) -> String {
    if score.is_finite() && score.fract() == 0.0 {
        format!("{score:.1}")
    } else {
        format_significant(score, SCORE_SIGNIFICANT_DIGITS)
    }
}

/// `%g`-style formatting: round to `precision` significant digits, drop
/// trailing zeros, and switch to exponent form when the decimal exponent is
/// below -4 or at least the number of digits shown.
fn format_significant(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let digits = match digits.trim_end_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };
    let shown = i64::try_from(digits.len()).unwrap_or(i64::MAX);
    let point = i64::from(exponent) + 1;

    let mut limit = i64::try_from(precision).unwrap_or(i64::MAX);
    if limit > shown && shown >= point {
        limit = shown;
    }

    let sign = if value.is_sign_negative() { "-" } else { "" };

    if exponent < -4 || i64::from(exponent) >= limit {
        let (first, rest) = digits.split_at(1);
        let fraction = if rest.is_empty() {
            String::new()
        } else {
            format!(".{rest}")
        };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        let magnitude = exponent.abs();
        return format!("{sign}{first}{fraction}e{exp_sign}{magnitude:02}");
    }

    let zeros = |n: i64| "0".repeat(usize::try_from(n).unwrap_or(0));
    let body = if point <= 0 {
        format!("0.{}{digits}", zeros(-point))
    } else if point >= shown {
        format!("{digits}{}", zeros(point - shown))
    } else {
        let (whole, fraction) = digits.split_at(usize::try_from(point).unwrap_or(0));
        format!("{whole}.{fraction}")
    };
    format!("{sign}{body}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::annotation::{
        AnnotationSummary, ColocatedVariant, GenomicLocationEcho, ProteinPosition,
    };
    use serde_json::json;

    fn patterns() -> ResolverPatterns {
        ResolverPatterns::new().unwrap()
    }

    fn query() -> GenomicLocationQuery {
        GenomicLocationQuery::new("17", Some(7_577_120), Some(7_577_121), "C", "T")
    }

    fn tp53_record() -> MutationRecord {
        let record = MutationRecord::new("17", "7577120", "7577121", "C");
        record.with_tumor_alleles("C", "T")
    }

    fn tp53() -> TranscriptConsequence {
        TranscriptConsequence {
            transcript_id: Some("ENST00000269305".to_string()),
            hugo_gene_symbol: Some("TP53".to_string()),
            entrez_gene_id: Some("7157".to_string()),
            variant_classification: Some("Missense_Mutation".to_string()),
            hgvsc: Some("ENST00000269305.4:c.524G>A".to_string()),
            hgvsp: Some("ENSP00000269305.4:p.Arg175His".to_string()),
            hgvsp_short: Some("p.R175H".to_string()),
            ref_seq: Some("NM_000546.5".to_string()),
            codon_change: Some("cGc/cAc".to_string()),
            consequence_terms: Some("missense_variant".to_string()),
            protein_position: Some(ProteinPosition {
                start: Some(175),
                end: Some(175),
            }),
            exon: Some("5/11".to_string()),
            sift_prediction: Some("deleterious".to_string()),
            sift_score: Some(0.0),
            polyphen_prediction: Some("probably_damaging".to_string()),
            polyphen_score: Some(0.3333),
        }
    }

    fn annotated(transcripts: Vec<TranscriptConsequence>) -> AnnotationResult {
        AnnotationResult {
            original_variant_query: Some("17,7577120,7577121,C,T".to_string()),
            assembly_name: Some("GRCh37".to_string()),
            successfully_annotated: Some(true),
            colocated_variants: vec![
                ColocatedVariant {
                    dbsnp_id: Some("COSM10648".to_string()),
                },
                ColocatedVariant {
                    dbsnp_id: Some("rs28934578".to_string()),
                },
            ],
            annotation_summary: Some(AnnotationSummary {
                genomic_location: Some(GenomicLocationEcho {
                    chromosome: Some("17".to_string()),
                    start: Some(7_578_406),
                    end: Some(7_578_406),
                    reference_allele: Some("C".to_string()),
                    variant_allele: Some("T".to_string()),
                }),
                strand_sign: Some("-".to_string()),
                variant_type: Some("SNP".to_string()),
                transcript_consequences: Some(transcripts),
                ..AnnotationSummary::default()
            }),
            ..AnnotationResult::default()
        }
    }

    #[test]
    fn test_format_score_integral() {
        assert_eq!(format_score(2.0), "2.0");
        assert_eq!(format_score(0.0), "0.0");
        assert_eq!(format_score(1.0), "1.0");
    }

    #[test]
    fn test_format_score_significant_digits() {
        assert_eq!(format_score(0.3333), "0.333");
        assert_eq!(format_score(0.05), "0.05");
        assert_eq!(format_score(0.971), "0.971");
        assert_eq!(format_score(0.12345), "0.123");
        assert_eq!(format_score(0.5), "0.5");
        // Rounds up to an integer after the integral check
        assert_eq!(format_score(0.9999), "1");
    }

    #[test]
    fn test_format_score_exponent_form() {
        assert_eq!(format_score(0.000_012), "1.2e-05");
        assert_eq!(format_score(0.000_12), "0.00012");
        assert_eq!(format_score(1234.5), "1.23e+03");
        assert_eq!(format_score(12.5), "12.5");
        assert_eq!(format_score(-0.25), "-0.25");
    }

    #[test]
    fn test_dbsnp_first_rsid_wins() {
        let p = patterns();
        let mut result = AnnotationResult::default();
        result.colocated_variants = vec![
            ColocatedVariant {
                dbsnp_id: Some("notrs".to_string()),
            },
            ColocatedVariant { dbsnp_id: None },
            ColocatedVariant {
                dbsnp_id: Some("rs12345".to_string()),
            },
            ColocatedVariant {
                dbsnp_id: Some("rs999".to_string()),
            },
        ];
        assert_eq!(resolve_dbsnp_rs(&result, &p), "rs12345");
        assert_eq!(resolve_dbsnp_rs(&AnnotationResult::default(), &p), "");
    }

    #[test]
    fn test_protein_position_prefers_explicit_start() {
        let p = patterns();
        let mut transcript = tp53();
        transcript.hgvsp_short = Some("p.R999H".to_string());
        assert_eq!(resolve_protein_position(Some(&transcript), &p), "175");
    }

    #[test]
    fn test_protein_position_from_hgvsp_short() {
        let p = patterns();
        let transcript = TranscriptConsequence {
            hgvsp_short: Some("p.Arg175His".to_string()),
            ..TranscriptConsequence::default()
        };
        assert_eq!(resolve_protein_position(Some(&transcript), &p), "175");

        let unparseable = TranscriptConsequence {
            hgvsp_short: Some("p.?".to_string()),
            ..TranscriptConsequence::default()
        };
        assert_eq!(resolve_protein_position(Some(&unparseable), &p), "");
        assert_eq!(resolve_protein_position(None, &p), "");
    }

    #[test]
    fn test_absent_transcript_defaults() {
        assert_eq!(resolve_hugo_symbol(None), FAILED_HUGO_SYMBOL);
        assert_eq!(resolve_entrez_gene_id(None), "");
        assert_eq!(resolve_hgvsc(None), "");
        assert_eq!(resolve_hgvsp(None), "");
        assert_eq!(resolve_hgvsp_short(None), "");
        assert_eq!(resolve_transcript_id(None), "");
        assert_eq!(resolve_refseq(None), "");
        assert_eq!(resolve_codon_change(None), "");
        assert_eq!(resolve_consequence(None), "");
        assert_eq!(resolve_exon(None), "");
        assert_eq!(resolve_sift_prediction(None), "");
        assert_eq!(resolve_sift_score(None), "");
        assert_eq!(resolve_polyphen_prediction(None), "");
        assert_eq!(resolve_polyphen_score(None), "");
        assert_eq!(resolve_protein_start(None), "");
        assert_eq!(resolve_protein_end(None), "");
    }

    #[test]
    fn test_unset_hugo_symbol_on_present_transcript_is_failed() {
        let transcript = TranscriptConsequence::default();
        assert_eq!(resolve_hugo_symbol(Some(&transcript)), FAILED_HUGO_SYMBOL);
    }

    #[test]
    fn test_variant_classification_falls_back_to_record() {
        let mut record = MutationRecord::new("1", "1", "1", "A");
        record.variant_classification = "Silent".to_string();

        assert_eq!(resolve_variant_classification(None, &record), "Silent");
        assert_eq!(
            resolve_variant_classification(Some(&tp53()), &record),
            "Missense_Mutation"
        );
    }

    #[test]
    fn test_location_prefers_annotation_echo() {
        let result = annotated(vec![tp53()]);
        assert_eq!(resolve_chromosome(&result, &query()), "17");
        assert_eq!(resolve_start(&result, &query()), "7578406");
        assert_eq!(resolve_end(&result, &query()), "7578406");
    }

    #[test]
    fn test_location_falls_back_to_query() {
        let result = AnnotationResult::default();
        assert_eq!(resolve_chromosome(&result, &query()), "17");
        assert_eq!(resolve_start(&result, &query()), "7577120");
        assert_eq!(resolve_end(&result, &query()), "7577121");

        let no_positions = GenomicLocationQuery::new("X", None, None, "A", "G");
        assert_eq!(resolve_start(&result, &no_positions), "");
        assert_eq!(resolve_end(&result, &no_positions), "");
    }

    #[test]
    fn test_summary_defaults() {
        let result = AnnotationResult::default();
        assert_eq!(resolve_strand_sign(&result), DEFAULT_STRAND);
        assert_eq!(resolve_assembly_name(&result), DEFAULT_NCBI_BUILD);
        assert_eq!(resolve_variant_type(&result), "");
    }

    #[test]
    fn test_assembly_name_ignores_summary_copy() {
        let summary_only = json!({"annotation_summary": {"assemblyName": "GRCh38"}});
        let summary_only: AnnotationResult = serde_json::from_value(summary_only).unwrap();
        assert_eq!(resolve_assembly_name(&summary_only), DEFAULT_NCBI_BUILD);

        let both = json!({
            "assembly_name": "GRCh38",
            "annotation_summary": {"assemblyName": "GRCh37"}
        });
        let both: AnnotationResult = serde_json::from_value(both).unwrap();
        assert_eq!(resolve_assembly_name(&both), "GRCh38");
    }

    #[test]
    fn test_resolve_fields_full_annotation() {
        let p = patterns();
        let result = annotated(vec![tp53()]);
        let fields = resolve_fields(&result, &query(), &tp53_record(), StripMode::All, &p);

        assert_eq!(fields.hugo_symbol, "TP53");
        assert_eq!(fields.entrez_gene_id, "7157");
        assert_eq!(fields.strand, "-");
        assert_eq!(fields.ncbi_build, "GRCh37");
        assert_eq!(fields.variant_type, "SNP");
        assert_eq!(fields.dbsnp_rs, "rs28934578");
        assert_eq!(fields.protein_position, "175");
        assert_eq!(fields.sift_score, "0.0");
        assert_eq!(fields.polyphen_score, "0.333");
        assert_eq!(fields.alleles.reference, "C");
        assert_eq!(fields.alleles.tumor_seq_allele2, "T");
    }

    #[test]
    fn test_resolve_fields_is_deterministic() {
        let p = patterns();
        let record = tp53_record();
        let result = annotated(vec![tp53()]);

        let first = resolve_fields(&result, &query(), &record, StripMode::First, &p);
        let second = resolve_fields(&result, &query(), &record, StripMode::First, &p);
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_fields_empty_transcript_list() {
        let p = patterns();
        let result = annotated(Vec::new());
        let fields = resolve_fields(&result, &query(), &tp53_record(), StripMode::All, &p);

        assert_eq!(fields.hugo_symbol, FAILED_HUGO_SYMBOL);
        assert_eq!(fields.transcript_id, "");
        assert_eq!(fields.protein_position, "");
        assert_eq!(fields.chromosome, "17");
    }
}

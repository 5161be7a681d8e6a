//! Tumor allele resolution.
//!
//! A MAF-style record reports two tumor alleles, either of which may repeat
//! the reference or be missing. These functions pick the single variant
//! allele sent for annotation and reconcile the reference/tumor alleles with
//! what the annotation service reports back.

use serde::Serialize;

use crate::core::annotation::AnnotationResult;
use crate::core::record::MutationRecord;
use crate::core::types::StripMode;
use crate::resolve::patterns::ResolverPatterns;

/// Deletion placeholder used in MAF allele columns
pub const DELETION_PLACEHOLDER: &str = "-";

/// An allele value that carries no information: empty or `NA` in any case
#[must_use]
pub fn is_missing_allele(allele: &str) -> bool {
    allele.is_empty() || allele.eq_ignore_ascii_case("NA")
}

/// Resolve the variant allele from the two reported tumor alleles.
///
/// An allele that is missing or equal to the reference is discarded in favour
/// of the other one. When both differ from the reference, an ambiguous indel
/// prefers the non-placeholder side; otherwise `allele1` wins. Returns an empty
/// string when both alleles are missing.
#[must_use]
pub fn resolve_alt_allele(
    reference: &str,
    allele1: &str,
    allele2: &str,
    patterns: &ResolverPatterns,
) -> String {
    if is_missing_allele(allele1) && is_missing_allele(allele2) {
        return String::new();
    }

    if is_missing_allele(allele1) || allele1 == reference {
        allele2.to_string()
    } else if is_missing_allele(allele2) || allele2 == reference {
        allele1.to_string()
    } else if is_ambiguous_indel(reference, allele1, allele2, patterns) {
        if allele2 == DELETION_PLACEHOLDER {
            allele1.to_string()
        } else {
            allele2.to_string()
        }
    } else {
        allele1.to_string()
    }
}

/// True when both alleles are informative, exactly one is the deletion
/// placeholder and the other is a nucleotide string.
#[must_use]
pub fn is_ambiguous_indel(
    reference: &str,
    allele1: &str,
    allele2: &str,
    patterns: &ResolverPatterns,
) -> bool {
    let uninformative = |allele: &str| is_missing_allele(allele) || allele == reference;
    if uninformative(allele1) || uninformative(allele2) {
        return false;
    }

    (allele1 == DELETION_PLACEHOLDER && patterns.is_nucleotide_string(allele2))
        || (allele2 == DELETION_PLACEHOLDER && patterns.is_nucleotide_string(allele1))
}

/// Reference and tumor alleles written back onto an annotated record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedAlleles {
    pub reference: String,
    pub tumor_seq_allele1: String,
    pub tumor_seq_allele2: String,
}

/// Reconcile the record's alleles with the annotation's normalized location.
///
/// `tumor_seq_allele1` always equals the final reference allele.
#[must_use]
pub fn resolve_reference_and_alt(
    result: &AnnotationResult,
    record: &MutationRecord,
    strip_mode: StripMode,
    patterns: &ResolverPatterns,
) -> ResolvedAlleles {
    let input_reference = record.reference_allele.as_str();
    let input_variant = resolve_alt_allele(
        input_reference,
        &record.tumor_seq_allele1,
        &record.tumor_seq_allele2,
        patterns,
    );
    let location = result.genomic_location();

    let annotated_reference = location
        .and_then(|l| l.reference_allele.clone())
        .unwrap_or_else(|| input_reference.to_string());
    let annotated_variant = location
        .and_then(|l| l.variant_allele.clone())
        .unwrap_or_else(|| input_variant.clone());

    let (reference, tumor_seq_allele2) = match strip_mode {
        StripMode::All => (annotated_reference, annotated_variant),
        StripMode::None => (input_reference.to_string(), input_variant),
        StripMode::First => {
            let strip = input_reference.len() > 1 && input_reference != annotated_reference;
            let reference = if strip {
                let stripped = input_reference.get(1..).unwrap_or(input_reference);
                stripped.to_string()
            } else {
                input_reference.to_string()
            };

            // The slice end is the reference length, not the variant length.
            // Out-of-range slices leave the annotated variant in place.
            let variant = if input_variant != annotated_variant && input_variant.len() > 1 {
                input_variant
                    .get(1..input_reference.len())
                    .map_or(annotated_variant, str::to_string)
            } else {
                annotated_variant
            };
            (reference, variant)
        }
    };

    ResolvedAlleles {
        tumor_seq_allele1: reference.clone(),
        reference,
        tumor_seq_allele2,
    }
}

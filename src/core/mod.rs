//! Core data types for variant annotation.
//!
//! - [`MutationRecord`]: one genomic variant with its annotation output fields
//! - [`GenomicLocationQuery`]: the location submitted for annotation
//! - [`AnnotationResult`]: one element of the annotation service's response
//! - [`AnnotationStatus`], [`FailureReason`], [`CorrelationKey`], [`StripMode`]
//!
//! ## Alleles
//!
//! MAF-style records carry two tumor alleles. Either may repeat the reference,
//! be missing (`""` or `NA`), or use `-` as a deletion placeholder:
//!
//! | Reference | Tumor 1 | Tumor 2 | Variant sent |
//! |-----------|---------|---------|--------------|
//! | C         | C       | T       | T            |
//! | A         | -       | AT      | AT           |
//! | A         | NA      | NA      | (none)       |
//!
//! [`MutationRecord`]: record::MutationRecord
//! [`GenomicLocationQuery`]: query::GenomicLocationQuery
//! [`AnnotationResult`]: annotation::AnnotationResult
//! [`AnnotationStatus`]: types::AnnotationStatus
//! [`FailureReason`]: types::FailureReason
//! [`CorrelationKey`]: types::CorrelationKey
//! [`StripMode`]: types::StripMode

pub mod annotation;
pub mod query;
pub mod record;
pub mod types;

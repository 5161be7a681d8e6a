use crate::core::annotation::{AnnotationResult, TranscriptConsequence};

/// Select the canonical transcript consequence of an annotation.
///
/// The service lists the canonical transcript first, so this is the first
/// entry of the summary's consequence list. `None` when the summary or the
/// list is absent or empty; resolvers treat that as "all transcript fields absent".
#[must_use]
pub fn select_canonical(result: &AnnotationResult) -> Option<&TranscriptConsequence> {
    result
        .annotation_summary
        .as_ref()
        .and_then(|summary| summary.transcript_consequences.as_deref())
        .and_then(<[TranscriptConsequence]>::first)
}

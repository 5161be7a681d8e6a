//! Input limits and small path helpers.

use std::path::Path;

/// Maximum number of records accepted from a single input file (DOS protection)
pub const MAX_RECORDS: usize = 1_000_000;

/// Check if adding another record would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new record.
/// Returns an error message if adding would exceed the limit, None if safe to add.
///
/// # Example
/// ```
/// use gn_annotator::utils::validation::{check_record_limit, MAX_RECORDS};
///
/// assert!(check_record_limit(0).is_none());
/// assert!(check_record_limit(MAX_RECORDS).is_some());
/// ```
#[must_use]
pub fn check_record_limit(count: usize) -> Option<String> {
    if count >= MAX_RECORDS {
        Some(format!(
            "Too many records: adding another would exceed maximum of {MAX_RECORDS}"
        ))
    } else {
        None
    }
}

/// True if the path names a gzip-compressed file (`.gz` or `.bgz`)
#[must_use]
pub fn is_gzip_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz") || ext.eq_ignore_ascii_case("bgz"))
}

/// Lowercased extension of the path, looking through a trailing `.gz`/`.bgz`
#[must_use]
pub fn inner_extension(path: &Path) -> Option<String> {
    let path = if is_gzip_path(path) {
        Path::new(path.file_stem()?)
    } else {
        path
    };
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
}

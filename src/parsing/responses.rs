use std::path::Path;

use crate::core::annotation::AnnotationResult;
use crate::parsing::records::{read_input_text, ParseError};
use crate::utils::validation::MAX_RECORDS;

/// Read a saved annotation response (JSON array of variant annotations)
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Json` if
/// it is not a JSON array of annotations, or `ParseError::TooManyRecords`.
pub fn read_responses(path: &Path) -> Result<Vec<AnnotationResult>, ParseError> {
    let text = read_input_text(path)?;
    parse_responses_json(&text)
}

/// Parse saved annotation responses from JSON text
///
/// # Errors
///
/// Returns `ParseError::Json` if the text is not a JSON array of annotations,
/// or `ParseError::TooManyRecords`.
pub fn parse_responses_json(text: &str) -> Result<Vec<AnnotationResult>, ParseError> {
    let results: Vec<AnnotationResult> = serde_json::from_str(text)?;
    if results.len() > MAX_RECORDS {
        return Err(ParseError::TooManyRecords(results.len()));
    }
    Ok(results)
}

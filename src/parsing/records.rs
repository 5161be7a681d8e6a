use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::record::MutationRecord;
use crate::parsing::maf;
use crate::utils::validation::{inner_extension, is_gzip_path, MAX_RECORDS};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid record file format: {0}")]
    InvalidFormat(String),

    #[error("Too many records: {0} exceeds maximum allowed ({MAX_RECORDS})")]
    TooManyRecords(usize),
}

/// On-disk layout of a record file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum RecordFormat {
    /// JSON array of records, or `{"records": [...]}`
    #[default]
    Json,
    /// Tab-separated Mutation Annotation Format
    Maf,
}

impl RecordFormat {
    /// Guess the format from the file name; `.gz` is looked through
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match inner_extension(path)?.as_str() {
            "json" => Some(Self::Json),
            "maf" | "tsv" | "txt" => Some(Self::Maf),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordsDocument {
    List(Vec<MutationRecord>),
    Wrapped { records: Vec<MutationRecord> },
}

impl RecordsDocument {
    fn into_records(self) -> Vec<MutationRecord> {
        match self {
            Self::List(records) | Self::Wrapped { records } => records,
        }
    }
}

#[derive(Serialize)]
struct RecordsDocumentRef<'a> {
    records: &'a [MutationRecord],
}

/// Open a file for buffered reading, decompressing `.gz`/`.bgz` inputs
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>, ParseError> {
    let file = File::open(path)?;
    if is_gzip_path(path) {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Read the full (decompressed) text of a file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read or is not UTF-8.
pub fn read_input_text(path: &Path) -> Result<String, ParseError> {
    let mut text = String::new();
    open_input(path)?.read_to_string(&mut text)?;
    Ok(text)
}

/// Read mutation records from a file.
///
/// When `format` is `None` it is inferred from the extension, falling back
/// to JSON.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Json` or
/// `ParseError::InvalidFormat` if the content is malformed, or
/// `ParseError::TooManyRecords` if the limit is exceeded.
pub fn read_records(
    path: &Path,
    format: Option<RecordFormat>,
) -> Result<Vec<MutationRecord>, ParseError> {
    let format = format
        .or_else(|| RecordFormat::from_path(path))
        .unwrap_or_default();
    let text = read_input_text(path)?;

    match format {
        RecordFormat::Json => parse_records_json(&text),
        RecordFormat::Maf => maf::parse_maf_text(&text),
    }
}

/// Parse records from JSON text
///
/// # Errors
///
/// Returns `ParseError::Json` if the text is not a record array or a
/// `{"records": [...]}` object, or `ParseError::TooManyRecords`.
pub fn parse_records_json(text: &str) -> Result<Vec<MutationRecord>, ParseError> {
    let records = match serde_json::from_str::<RecordsDocument>(text) {
        Ok(document) => document.into_records(),
        // Re-parse as a plain list for a precise error location
        Err(_) => serde_json::from_str::<Vec<MutationRecord>>(text)?,
    };

    if records.len() > MAX_RECORDS {
        return Err(ParseError::TooManyRecords(records.len()));
    }

    Ok(records)
}

/// Write records as `{"records": [...]}`
///
/// # Errors
///
/// Returns `ParseError::Json` or `ParseError::Io` if writing fails.
pub fn write_records_json<W: Write>(
    records: &[MutationRecord],
    mut writer: W,
) -> Result<(), ParseError> {
    serde_json::to_writer_pretty(&mut writer, &RecordsDocumentRef { records })?;
    writeln!(writer)?;
    Ok(())
}

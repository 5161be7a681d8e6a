//! Readers and writers for record files and saved annotation responses.
//!
//! - **JSON records**: an array of records or `{"records": [...]}`
//! - **MAF**: tab-separated Mutation Annotation Format with a header row
//! - **Saved responses**: a JSON array of Genome Nexus variant annotations
//!
//! Inputs ending in `.gz` or `.bgz` are decompressed transparently.
//!
//! ## Example
//!
//! ```rust,no_run
//! use gn_annotator::parsing::records::{read_records, RecordFormat};
//! use std::path::Path;
//!
//! let records = read_records(Path::new("calls.maf.gz"), Some(RecordFormat::Maf)).unwrap();
//! ```

pub mod maf;
pub mod records;
pub mod responses;

pub use records::{ParseError, RecordFormat};

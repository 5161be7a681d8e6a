//! Batch annotation.
//!
//! One cycle: derive a query per record, submit the batch through an
//! [`AnnotationExchange`](crate::client::AnnotationExchange), correlate the
//! results, then resolve each record independently.

pub mod annotator;
pub mod config;

pub use annotator::{AnnotateError, AnnotationReport, Annotator};
pub use config::AnnotatorConfig;

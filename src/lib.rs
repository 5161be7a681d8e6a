//! # gn-annotator
//!
//! Annotate genomic variant records with the Genome Nexus annotation service.
//!
//! Each annotation cycle takes a batch of mutation records, derives the genomic
//! location to submit for every record, exchanges the batch with the service,
//! matches the returned annotations back to their records and writes the
//! resolved annotation fields onto each one.
//!
//! ## Features
//!
//! - **Allele resolution**: Picks the variant allele from two reported tumor alleles
//! - **Keyed correlation**: Matches results by the location the service echoes back,
//!   so reordered, dropped and deduplicated responses are handled
//! - **Canonical transcript fields**: Gene, HGVS, consequence, protein position and scores
//! - **Explicit failures**: Every record ends with a SUCCESS or FAILED status and reason
//! - **Offline reconciliation**: Replay a saved response instead of calling the service
//!
//! ## Example
//!
//! ```rust,no_run
//! use gn_annotator::{Annotator, AnnotatorConfig, GenomeNexusClient, ClientConfig, MutationRecord};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = GenomeNexusClient::new(ClientConfig::default())?;
//! let annotator = Annotator::new(client, AnnotatorConfig::default())?;
//!
//! let mut records = vec![
//!     MutationRecord::new("7", "140453136", "140453136", "A").with_tumor_alleles("A", "T"),
//! ];
//! let report = annotator.annotate(&mut records).await?;
//!
//! println!("{} of {} annotated", report.succeeded, report.submitted);
//! println!("{}", records[0].hugo_symbol);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`annotate`]: The annotation cycle and its configuration
//! - [`client`]: Exchange trait, HTTP client and replay exchange
//! - [`core`]: Records, queries and annotation response types
//! - [`correlation`]: Matching results to records and applying them
//! - [`resolve`]: Allele, transcript and field resolution
//! - [`parsing`]: JSON and MAF record files, saved responses
//! - [`cli`]: Command-line interface implementation

pub mod annotate;
pub mod cli;
pub mod client;
pub mod core;
pub mod correlation;
pub mod parsing;
pub mod resolve;
pub mod utils;

// Re-export commonly used types for convenience
pub use annotate::{AnnotateError, AnnotationReport, Annotator, AnnotatorConfig};
pub use client::{
    AnnotationExchange, ClientConfig, ExchangeError, GenomeNexusClient, ReplayExchange,
};
pub use core::annotation::{AnnotationResult, TranscriptConsequence};
pub use core::query::GenomicLocationQuery;
pub use core::record::MutationRecord;
pub use core::types::*;
pub use correlation::CorrelationPolicy;

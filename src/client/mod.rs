//! Transport to the annotation service.
//!
//! The annotator only sees [`AnnotationExchange`]. Two implementations are
//! provided:
//!
//! - [`GenomeNexusClient`]: posts batches to a Genome Nexus server
//! - [`ReplayExchange`]: answers with a saved response (offline reconciliation)

pub mod exchange;
pub mod genome_nexus;

pub use exchange::{AnnotationExchange, ExchangeError, ReplayExchange};
pub use genome_nexus::{ClientConfig, GenomeNexusClient};

//! Command-line interface for gn-annotator.
//!
//! Available commands:
//!
//! - **annotate**: Annotate a record file through Genome Nexus (or a saved response)
//! - **alleles**: Show how a reference/tumor allele triple is resolved
//!
//! ## Usage
//!
//! ```text
//! # Annotate a MAF against the public server, writing an annotated MAF
//! gn-annotator annotate calls.maf --output annotated.maf
//!
//! # Reconcile records with a previously saved response, JSON summary
//! gn-annotator annotate records.json --responses saved.json --format json
//!
//! # Inspect allele resolution
//! gn-annotator alleles A - AT
//! ```

use clap::{Parser, Subcommand};

pub mod alleles;
pub mod annotate;

#[derive(Parser)]
#[command(name = "gn-annotator")]
#[command(version)]
#[command(about = "Annotate genomic variants with Genome Nexus")]
#[command(
    long_about = "gn-annotator submits mutation records to the Genome Nexus annotation service and writes the results back onto each record.\n\nEvery record ends with a SUCCESS or FAILED status:\n- Results are matched to records by the genomic location the service echoes\n- Records the service could not annotate, or did not answer, are marked FAILED\n- Canonical-transcript fields, dbSNP ids and scores are resolved deterministically"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Annotate a file of mutation records
    Annotate(annotate::AnnotateArgs),

    /// Resolve the variant allele for a reference and two tumor alleles
    Alleles(alleles::AllelesArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

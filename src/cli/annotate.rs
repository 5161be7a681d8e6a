use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;

use crate::annotate::{AnnotationReport, Annotator, AnnotatorConfig};
use crate::cli::OutputFormat;
use crate::client::exchange::{AnnotationExchange, ReplayExchange};
use crate::client::genome_nexus::{
    ClientConfig, GenomeNexusClient, DEFAULT_BASE_URL, DEFAULT_ISOFORM_OVERRIDE_SOURCE,
    DEFAULT_TIMEOUT_SECS,
};
use crate::core::record::MutationRecord;
use crate::core::types::{AnnotationStatus, StripMode};
use crate::correlation::CorrelationPolicy;
use crate::parsing::maf::write_maf;
use crate::parsing::records::{read_records, write_records_json, RecordFormat};
use crate::parsing::responses::read_responses;

#[derive(Args)]
pub struct AnnotateArgs {
    /// Input records (JSON or MAF, optionally gzipped)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Write annotated records to this file (JSON or MAF by extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Input format (detected from the extension by default)
    #[arg(long, value_enum)]
    pub input_format: Option<RecordFormat>,

    /// Replay a saved annotation response instead of calling the service
    #[arg(long)]
    pub responses: Option<PathBuf>,

    /// Genome Nexus base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub url: String,

    /// Isoform override source for canonical transcript selection
    #[arg(long, default_value = DEFAULT_ISOFORM_OVERRIDE_SOURCE)]
    pub isoform_override_source: String,

    /// Access token for the annotation service
    #[arg(long)]
    pub token: Option<String>,

    /// How matching leading bases are stripped from the alleles
    #[arg(long, value_enum, default_value = "all")]
    pub strip_matching_bases: StripMode,

    /// How returned annotations are matched back to records
    #[arg(long, value_enum, default_value = "keyed")]
    pub correlation: CorrelationPolicy,

    /// Resolve records on a single thread
    #[arg(long)]
    pub sequential: bool,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
}

impl AnnotateArgs {
    fn annotator_config(&self) -> AnnotatorConfig {
        AnnotatorConfig {
            strip_mode: self.strip_matching_bases,
            correlation: self.correlation,
            parallel: !self.sequential,
        }
    }

    fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.url.clone(),
            isoform_override_source: self.isoform_override_source.clone(),
            token: self.token.clone(),
            timeout: Duration::from_secs(self.timeout),
        }
    }
}

/// Execute annotate subcommand
///
/// # Errors
///
/// Returns an error if the input cannot be parsed, the annotation exchange
/// fails, or the output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: AnnotateArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let mut records = read_records(&args.input, args.input_format)?;

    if verbose {
        eprintln!(
            "Read {} records from {}",
            records.len(),
            args.input.display()
        );
    }

    let config = args.annotator_config();
    let rt = tokio::runtime::Runtime::new()?;

    let report = if let Some(path) = &args.responses {
        let saved = read_responses(path)?;
        if verbose {
            eprintln!(
                "Replaying {} saved annotations from {}",
                saved.len(),
                path.display()
            );
        }
        let exchange = ReplayExchange::new(saved);
        rt.block_on(annotate_with(exchange, config, &mut records))?
    } else {
        let client = GenomeNexusClient::new(args.client_config())?;
        if verbose {
            eprintln!("Annotating against {}", client.endpoint());
        }
        rt.block_on(annotate_with(client, config, &mut records))?
    };

    if let Some(output) = &args.output {
        let output_format = RecordFormat::from_path(output)
            .or(args.input_format)
            .or_else(|| RecordFormat::from_path(&args.input))
            .unwrap_or_default();
        write_records_file(&records, output, output_format)?;
        if verbose {
            eprintln!("Wrote {} records to {}", records.len(), output.display());
        }
        print_summary(&report, &records, format)?;
        return Ok(());
    }

    match format {
        OutputFormat::Text => print_text_summary(&report, &records),
        OutputFormat::Json => print_json_results(&report, &records)?,
        OutputFormat::Tsv => write_maf(&records, io::stdout().lock())?,
    }

    Ok(())
}

async fn annotate_with<E: AnnotationExchange>(
    exchange: E,
    config: AnnotatorConfig,
    records: &mut [MutationRecord],
) -> anyhow::Result<AnnotationReport> {
    let annotator = Annotator::new(exchange, config)?;
    Ok(annotator.annotate(records).await?)
}

fn write_records_file(
    records: &[MutationRecord],
    path: &Path,
    format: RecordFormat,
) -> anyhow::Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    match format {
        RecordFormat::Json => write_records_json(records, writer)?,
        RecordFormat::Maf => write_maf(records, writer)?,
    }
    Ok(())
}

fn print_summary(
    report: &AnnotationReport,
    records: &[MutationRecord],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print_text_summary(report, records),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Tsv => print_tsv_summary(report),
    }
    Ok(())
}

fn print_text_summary(report: &AnnotationReport, records: &[MutationRecord]) {
    println!("Submitted:    {}", report.submitted);
    println!("Returned:     {}", report.returned);
    println!("Succeeded:    {}", report.succeeded);
    println!("Failed:       {}", report.failed);

    if report.uncorrelated > 0 || report.duplicates > 0 {
        println!(
            "Ignored:      {} uncorrelated, {} duplicate",
            report.uncorrelated, report.duplicates
        );
    }
    if let Some(mismatch) = report.count_mismatch {
        println!("Warning:      {mismatch}");
    }

    let failures: Vec<_> = records
        .iter()
        .filter_map(|r| match &r.annotation_status {
            Some(AnnotationStatus::Failed { reason }) => Some(reason),
            _ => None,
        })
        .collect();

    if !failures.is_empty() {
        println!("\nFailures:");
        for reason in failures {
            println!("  - {reason}");
        }
    }
}

fn print_tsv_summary(report: &AnnotationReport) {
    println!("submitted\treturned\tsucceeded\tfailed\tunmatched\tuncorrelated\tduplicates");
    println!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}",
        report.submitted,
        report.returned,
        report.succeeded,
        report.failed,
        report.unmatched,
        report.uncorrelated,
        report.duplicates
    );
}

fn print_json_results(
    report: &AnnotationReport,
    records: &[MutationRecord],
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "annotated_at": chrono::Utc::now().to_rfc3339(),
        "summary": report,
        "records": records,
    });
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &output)?;
    writeln!(stdout)?;
    Ok(())
}

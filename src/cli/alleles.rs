use clap::Args;

use crate::cli::OutputFormat;
use crate::resolve::allele::{is_ambiguous_indel, resolve_alt_allele};
use crate::resolve::patterns::ResolverPatterns;

#[derive(Args)]
pub struct AllelesArgs {
    /// Reference allele
    #[arg(allow_hyphen_values = true)]
    pub reference: String,

    /// First tumor allele (`-`, `NA` or empty when missing)
    #[arg(allow_hyphen_values = true)]
    pub tumor_seq_allele1: String,

    /// Second tumor allele (`-`, `NA` or empty when missing)
    #[arg(allow_hyphen_values = true)]
    pub tumor_seq_allele2: String,
}

/// Execute alleles subcommand
///
/// # Errors
///
/// Returns an error if the resolver patterns cannot be compiled or JSON
/// output fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: AllelesArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let patterns = ResolverPatterns::new()?;

    let variant_allele = resolve_alt_allele(
        &args.reference,
        &args.tumor_seq_allele1,
        &args.tumor_seq_allele2,
        &patterns,
    );
    let ambiguous = is_ambiguous_indel(
        &args.reference,
        &args.tumor_seq_allele1,
        &args.tumor_seq_allele2,
        &patterns,
    );
    let key_fragment = format!("{},{}", args.reference, variant_allele);

    if verbose {
        eprintln!(
            "Resolving {} / {} / {}",
            args.reference, args.tumor_seq_allele1, args.tumor_seq_allele2
        );
    }

    match format {
        OutputFormat::Text => {
            let shown = if variant_allele.is_empty() {
                "(none)"
            } else {
                variant_allele.as_str()
            };
            println!("Variant allele:  {shown}");
            println!("Ambiguous indel: {}", if ambiguous { "yes" } else { "no" });
            println!("Key fragment:    {key_fragment}");
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "reference_allele": args.reference,
                "tumor_seq_allele1": args.tumor_seq_allele1,
                "tumor_seq_allele2": args.tumor_seq_allele2,
                "variant_allele": variant_allele,
                "ambiguous_indel": ambiguous,
                "key_fragment": key_fragment,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("reference_allele\ttumor_seq_allele1\ttumor_seq_allele2\tvariant_allele\tambiguous_indel\tkey_fragment");
            println!(
                "{}\t{}\t{}\t{}\t{}\t{}",
                args.reference,
                args.tumor_seq_allele1,
                args.tumor_seq_allele2,
                variant_allele,
                ambiguous,
                key_fragment
            );
        }
    }

    Ok(())
}

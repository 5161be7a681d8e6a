use clap::Parser;
use tracing_subscriber::EnvFilter;

use gn_annotator::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("gn_annotator=debug,info")
    } else {
        EnvFilter::new("gn_annotator=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Annotate(args) => {
            cli::annotate::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Alleles(args) => {
            cli::alleles::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}

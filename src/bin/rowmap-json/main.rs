//! `rowmap-json`: spreadsheet rows to registry JSON.

mod cli;

use crate::cli::Cli;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use rowmap::{build_records, load_rows, write_document, write_json_file, LoadOptions, MappingConfig, OutputDocument};
use tracing::Level;
use tracing_subscriber::EnvFilter;

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("rowmap={level},rowmap_json={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_logging(args.verbose);

    let mut config = MappingConfig::from_file(&args.config)
        .with_context(|| format!("loading config {}", args.config.display()))?;
    config.drop_empty |= args.drop_empty;

    let mut options = LoadOptions::for_path(&args.input);
    if let Some(delimiter) = args.delimiter {
        options.delimiter = u8::try_from(delimiter)
            .map_err(|_| anyhow!("delimiter '{}' is not a single-byte character", delimiter))?;
    }
    options.infer_types = !args.no_infer;

    let rows = load_rows(&args.input, options)
        .with_context(|| format!("loading input {}", args.input.display()))?;

    let outcome = build_records(&rows, &config);
    let built = outcome.records.len();
    let skipped = outcome.skipped.len();
    let document = OutputDocument::new(outcome.records, config.array_name.as_deref());

    if args.dry_run {
        tracing::info!(built, skipped, "dry run, nothing written");
        return Ok(());
    }

    let pretty = !args.compact;
    match &args.output {
        Some(path) => {
            write_json_file(path, &document, pretty)
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!("wrote {} records to {} ({} rows skipped)", built, path.display(), skipped);
        }
        None => {
            write_document(std::io::stdout().lock(), &document, pretty)?;
            tracing::info!("wrote {} records ({} rows skipped)", built, skipped);
        }
    }

    Ok(())
}

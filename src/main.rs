// src/main.rs
mod anthology;
mod extractors;
mod storage;
mod utils;

use clap::Parser;

use anthology::models::CatalogMetadata;
use anthology::reader::{self, UntilError};
use extractors::{AnthologyExtractor, ExtractionConfig};
use storage::StorageManager;
use utils::AppError;

const TRACE_FILENAME: &str = "segmentation_trace.txt";

/// Command Line Interface for the anthology catalog extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Plain-text anthology to split into works
    #[arg(short, long, default_value = "./completeworks.txt")]
    input: String,

    /// Output directory for the works catalog
    #[arg(short, long, default_value = ".")]
    output_dir: String,

    /// File name of the works catalog inside the output directory
    #[arg(long, default_value = "data.json")]
    output_name: String,

    /// Fail when a listed title never receives any content
    #[arg(long)]
    strict: bool,

    /// Debug mode - save the segmentation trace next to the catalog
    #[arg(short, long)]
    debug: bool,

    /// Skip writing the metadata file
    #[arg(long)]
    no_metadata: bool,
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting extraction for args: {:?}", args);

    if args.output_name.trim().is_empty() {
        return Err(AppError::Config("Output file name must not be empty".to_string()));
    }

    // 3. Run the single pass over the anthology
    let config = ExtractionConfig {
        strict: args.strict,
        ..ExtractionConfig::default()
    };
    let extractor = AnthologyExtractor::new(config);

    let mut lines = UntilError::new(reader::open_anthology(&args.input)?);
    let result = extractor.extract(&mut lines);
    // A read failure explains any structural error that followed it
    lines.into_result()?;
    let catalog = result?;

    tracing::info!(
        "Extracted {} works from {} titles ({} lines read)",
        catalog.records.len(),
        catalog.titles.len(),
        catalog.lines_read
    );
    if !catalog.stopped_at_boundary {
        tracing::warn!("Editorial boundary not found; content ran to end of input");
    }

    // 4. Persist
    let storage = StorageManager::new(&args.output_dir)?;
    tracing::info!("Writing catalog to {}", storage.base_dir().display());

    let metadata = (!args.no_metadata).then(|| CatalogMetadata {
        source: args.input.clone(),
        title_count: catalog.titles.len(),
        work_count: catalog.records.len(),
        titles: catalog.titles.clone(),
        missing_titles: catalog.missing_titles.clone(),
        content_lines: catalog.content_lines.clone(),
        stopped_at_boundary: catalog.stopped_at_boundary,
        lines_read: catalog.lines_read,
        extraction_timestamp: chrono::Utc::now().to_rfc3339(),
    });
    let paths = storage.save_catalog(&args.output_name, &catalog.records, metadata.as_ref())?;
    tracing::info!("Saved {} works to {}", catalog.records.len(), paths.works.display());
    if let Some(path) = &paths.metadata {
        tracing::info!("Saved metadata to {}", path.display());
    }

    if args.debug {
        let trace = utils::trace_dump::render_trace(&args.input, &catalog.trace);
        if let Err(e) = storage.save_text(TRACE_FILENAME, &trace) {
            tracing::warn!("Failed to save segmentation trace: {}", e);
        }
    }

    tracing::info!("Processing finished.");
    Ok(())
}

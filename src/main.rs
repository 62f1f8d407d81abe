use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use atlas_enrich::{EnrichConfig, load_collections, run, write_outputs};
use log::info;

#[global_allocator]
static ALLOC: snmalloc_rs::SnMalloc = snmalloc_rs::SnMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Positional arguments override the environment: [data_dir] [output_dir]
    let mut config = EnrichConfig::from_env().context("Invalid configuration")?;
    let mut args = std::env::args().skip(1);
    if let Some(data_dir) = args.next() {
        config = config.with_data_dir(PathBuf::from(data_dir));
    }
    if let Some(output_dir) = args.next() {
        config = config.with_output_dir(PathBuf::from(output_dir));
    }
    info!("{config}");

    let start = Instant::now();
    let collections = load_collections(&config.inputs)
        .await
        .with_context(|| format!("Failed to load inputs from {}", config.data_dir.display()))?;

    let output = run(&collections, &config).context("Enrichment run failed")?;

    let written = write_outputs(&output, &config.output_dir, config.write_parquet)
        .with_context(|| format!("Failed to write outputs to {}", config.output_dir.display()))?;
    for path in &written {
        info!("Wrote {}", path.display());
    }

    info!("{}", output.metadata.summary());
    info!("Enrichment complete in {:?}", start.elapsed());

    Ok(())
}

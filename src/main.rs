use clap::Parser;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use release_indexer::args::Args;
use release_indexer::run;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn main() -> Result<()> {
    let args: Args = Args::parse();

    // load environment variables from .env file
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = args.into_config();
    let summary = run(&config)?;

    info!(
        "done: {} categories, {} apps, {} files written, {} obsolete removed ({} skipped)",
        summary.categories,
        summary.apps,
        summary.files_written,
        summary.files_removed,
        summary.skipped
    );

    Ok(())
}

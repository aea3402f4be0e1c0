use std::collections::BTreeSet;
use tracing::{info, warn};

use crate::categories::{group_by_category, load_allow_list_or_empty};
use crate::config::Config;
use crate::error::OutputError;
use crate::file_ops::locate_descriptors;
use crate::loader::load_descriptor;
use crate::manifest::{reconcile, synthesize};

/// Counters for one run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub skipped: usize,
    pub categories: usize,
    pub apps: usize,
    pub files_written: usize,
    pub files_removed: usize,
}

/// Locate, validate, group and write. Rejected descriptors and failed
/// writes are logged and counted; only an unusable output directory
/// aborts the run.
pub fn run(config: &Config) -> Result<RunSummary, OutputError> {
    let mut summary = RunSummary::default();

    let paths = locate_descriptors(&config.root);
    if paths.is_empty() {
        info!("no metadata files found under {}", config.root.display());
        if config.output_dir.is_dir() {
            summary.files_removed = reconcile(&config.output_dir, &BTreeSet::new());
        }
        return Ok(summary);
    }
    info!("found {} metadata files", paths.len());

    let mut descriptors = Vec::with_capacity(paths.len());
    for path in &paths {
        match load_descriptor(path) {
            Ok(descriptor) => {
                summary.processed += 1;
                descriptors.push(descriptor);
            }
            Err(err) => {
                summary.skipped += 1;
                warn!("skipping: {}", err);
            }
        }
    }
    info!("{} valid, {} skipped", summary.processed, summary.skipped);

    let known = load_allow_list_or_empty(&config.categories_file);
    let groups = group_by_category(descriptors, &known);

    let report = synthesize(&groups, &config.output_dir)?;
    summary.categories = report.manifests.len();
    summary.apps = groups.total_apps();
    summary.files_written = report.files_written;
    summary.files_removed = report.files_removed;
    Ok(summary)
}

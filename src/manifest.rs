use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::categories::CategoryGroups;
use crate::data::{
    category_slug, manifest_file_name, CategoriesIndex, CategoryManifest, CategorySummary,
    Descriptor, ReleasesIndex,
};
use crate::error::OutputError;
use crate::file_ops::{ensure_dir, list_manifest_files, remove_output_file, write_json};

pub const CATEGORIES_INDEX_FILE: &str = "categories.json";
pub const RELEASES_INDEX_FILE: &str = "releases.json";

/// What one synthesis pass left in the output directory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SynthesisReport {
    /// Category manifests written this run.
    pub manifests: BTreeSet<String>,
    /// Every file written, manifests and indexes together.
    pub files_written: usize,
    pub files_removed: usize,
}

fn sorted_by_name<'a>(
    descriptors: impl IntoIterator<Item = &'a Descriptor>,
) -> Vec<&'a Descriptor> {
    let mut sorted: Vec<&Descriptor> = descriptors.into_iter().collect();
    sorted.sort_by_cached_key(|d| d.name());
    sorted
}

pub fn build_category_manifest(category: &str, descriptors: &[Descriptor]) -> CategoryManifest {
    let apps: Vec<_> = sorted_by_name(descriptors)
        .into_iter()
        .map(Descriptor::clean_app)
        .collect();
    CategoryManifest {
        category: category.to_string(),
        count: apps.len(),
        apps,
    }
}

pub fn build_categories_index(mut categories: Vec<CategorySummary>) -> CategoriesIndex {
    categories.sort_by(|a, b| a.name.cmp(&b.name));
    CategoriesIndex {
        total_categories: categories.len(),
        total_apps: categories.iter().map(|c| c.count).sum(),
        categories,
    }
}

pub fn build_releases_index(groups: &CategoryGroups) -> ReleasesIndex {
    let apps: Vec<_> = sorted_by_name(groups.iter().flat_map(|(_, list)| list.iter()))
        .into_iter()
        .map(Descriptor::release_entry)
        .collect();
    ReleasesIndex {
        count: apps.len(),
        apps,
    }
}

/// Write one manifest per category, then the two indexes, then delete stale
/// category manifests. Only failing to create `out_dir` is an error; every
/// other failure is logged and the pass moves on.
///
/// Categories are visited in name order. When two names sanitize to the same
/// file name, the first one keeps the file and the later one gets no manifest
/// and no `categories.json` entry.
pub fn synthesize(
    groups: &CategoryGroups,
    out_dir: &Path,
) -> Result<SynthesisReport, OutputError> {
    ensure_dir(out_dir)?;

    let mut report = SynthesisReport::default();
    let mut summaries = Vec::new();
    let mut claimed = BTreeSet::new();

    let mut categories: Vec<_> = groups.iter().collect();
    categories.sort_by(|a, b| a.0.cmp(b.0));

    for (category, descriptors) in categories {
        if descriptors.is_empty() {
            continue;
        }
        let file_name = manifest_file_name(category);
        if !claimed.insert(file_name.clone()) {
            warn!(
                "category {:?} maps to {} which is already taken; skipping it",
                category, file_name
            );
            continue;
        }

        let manifest = build_category_manifest(category, descriptors);
        let count = manifest.count;
        match write_json(&out_dir.join(&file_name), &manifest) {
            Ok(()) => {
                debug!("wrote {} ({} apps)", file_name, count);
                report.manifests.insert(file_name);
                report.files_written += 1;
                summaries.push(CategorySummary {
                    name: category.to_string(),
                    slug: category_slug(category),
                    count,
                });
            }
            Err(err) => warn!("{}", err),
        }
    }

    if !summaries.is_empty() {
        let index = build_categories_index(summaries);
        match write_json(&out_dir.join(CATEGORIES_INDEX_FILE), &index) {
            Ok(()) => {
                info!(
                    "wrote {} ({} categories)",
                    CATEGORIES_INDEX_FILE, index.total_categories
                );
                report.files_written += 1;
            }
            Err(err) => warn!("{}", err),
        }
    }

    if groups.total_apps() > 0 {
        let releases = build_releases_index(groups);
        match write_json(&out_dir.join(RELEASES_INDEX_FILE), &releases) {
            Ok(()) => {
                info!("wrote {} ({} apps)", RELEASES_INDEX_FILE, releases.count);
                report.files_written += 1;
            }
            Err(err) => warn!("{}", err),
        }
    }

    report.files_removed = reconcile(out_dir, &report.manifests);
    Ok(report)
}

/// Remove every category manifest in `out_dir` not listed in `keep`.
/// Returns how many were removed.
pub fn reconcile(out_dir: &Path, keep: &BTreeSet<String>) -> usize {
    let existing = match list_manifest_files(out_dir) {
        Ok(names) => names,
        Err(err) => {
            warn!("{}; skipping cleanup of old manifests", err);
            return 0;
        }
    };

    let mut removed = 0;
    for name in existing.into_iter().filter(|name| !keep.contains(name)) {
        match remove_output_file(&out_dir.join(&name)) {
            Ok(()) => {
                info!("removed obsolete manifest {}", name);
                removed += 1;
            }
            Err(err) => warn!("{}", err),
        }
    }
    removed
}

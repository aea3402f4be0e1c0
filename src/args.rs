use clap::Parser;
use std::path::PathBuf;

use crate::config::{
    Config, CATEGORIES_FILE_VAR, DEFAULT_CATEGORIES_FILE, DEFAULT_OUTPUT_DIR, DEFAULT_ROOT,
    OUTPUT_DIR_VAR, ROOT_VAR,
};

#[derive(Parser, Debug)]
#[command(version, about = "Aggregate app metadata.json files into release indexes", long_about = None)]
pub struct Args {
    /// Directory searched recursively for metadata.json files
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Directory the category manifests and indexes are written to
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// JSON array of known category names (advisory only)
    #[arg(long)]
    pub categories: Option<PathBuf>,
}

impl Args {
    /// Flags win over environment variables, which win over the defaults.
    pub fn into_config(self) -> Config {
        Config {
            root: self.root.unwrap_or_else(|| env_path(ROOT_VAR, DEFAULT_ROOT)),
            output_dir: self
                .output
                .unwrap_or_else(|| env_path(OUTPUT_DIR_VAR, DEFAULT_OUTPUT_DIR)),
            categories_file: self
                .categories
                .unwrap_or_else(|| env_path(CATEGORIES_FILE_VAR, DEFAULT_CATEGORIES_FILE)),
        }
    }
}

fn env_path(var: &str, default: &str) -> PathBuf {
    PathBuf::from(std::env::var(var).unwrap_or(default.to_string()))
}

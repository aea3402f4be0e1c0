//! Collects the `metadata.json` descriptor of every app under a directory
//! tree and writes per-category manifests plus `categories.json` and
//! `releases.json` into an output directory, removing manifests for
//! categories that no longer have any apps.

pub mod args;
pub mod categories;
pub mod config;
pub mod data;
pub mod error;
pub mod file_ops;
pub mod loader;
pub mod manifest;
pub mod matcher;
pub mod pipeline;

pub use config::Config;
pub use pipeline::{run, RunSummary};

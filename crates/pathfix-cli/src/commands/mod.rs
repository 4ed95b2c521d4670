//! CLI command implementations

pub mod correct;
pub mod inspect;
pub mod scene;
pub mod segments;

use anyhow::{Context, Result};
use pathfix_core::PathfixConfig;
use std::path::Path;

/// Resolve configuration, from an explicit file when one is given
pub fn load_config(path: Option<&str>) -> Result<PathfixConfig> {
    match path {
        Some(path) => PathfixConfig::load_from_file(Path::new(path))
            .with_context(|| format!("Failed to load config {}", path)),
        None => PathfixConfig::load().context("Failed to load configuration"),
    }
}

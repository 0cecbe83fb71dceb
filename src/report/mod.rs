//! Report rendering and output handling.
//!
//! Renderers take the finished [`crate::models::ClusterAnalysis`] by
//! shared reference and produce strings; nothing here mutates analysis
//! results. Writing goes to a timestamped file in the chosen output
//! directory.

pub mod inventory;
pub mod json;
pub mod markdown;

use crate::error::Result;
use chrono::Utc;
use std::path::{Path, PathBuf};

/// Output format for rendered reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Markdown,
    Json,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Json => "json",
        }
    }
}

/// Write a rendered report into `dir` under a timestamped name.
///
/// Creates the directory if needed and returns the written path.
pub fn write_report(
    dir: &Path,
    prefix: &str,
    format: ReportFormat,
    content: &str,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let filename = format!(
        "{}-{}.{}",
        prefix,
        Utc::now().format("%Y%m%d-%H%M%S"),
        format.extension()
    );
    let path = dir.join(filename);
    std::fs::write(&path, content)?;
    log::info!("report written to {}", path.display());
    Ok(path)
}

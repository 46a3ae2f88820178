//! JSON export of the mapping report.

use std::fs;
use std::path::Path;

use tracing::info;

use colmap_model::MappingReport;

use crate::common::ensure_parent_dir;
use crate::error::{OutputError, Result};

/// Renders the report as pretty-printed JSON.
pub fn report_to_json(report: &MappingReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Writes the report as pretty-printed JSON.
pub fn write_report(report: &MappingReport, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut json = report_to_json(report)?;
    json.push('\n');
    fs::write(path, json).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "wrote mapping report");
    Ok(())
}

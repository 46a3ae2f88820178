//! Column mapping pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Load**: read the reference and to-map tables
//! 2. **Prompt**: describe both column lists to the oracle
//! 3. **Ask**: one oracle call, returning raw text
//! 4. **Resolve**: parse the text, fill omitted columns, validate targets
//! 5. **Project**: reshape the to-map table into the reference layout
//! 6. **Export**: write the table (CSV or XLSX) and, optionally, the JSON report
//!
//! Once the oracle has answered, every later failure carries its raw text so
//! the operator can see what was returned. The validated mapping is handed to
//! the caller before projection starts, so it is visible even when export
//! fails.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use polars::prelude::DataFrame;
use thiserror::Error;
use tracing::{debug, info, info_span, warn};

use colmap_ingest::{IngestError, LoadedTable, load_table};
use colmap_map::{ParseError, build_mapping_prompt, parse_mapping_response, validate_mapping};
use colmap_model::{ColumnList, MappingReport};
use colmap_oracle::{MappingOracle, OracleError};
use colmap_output::{OutputError, write_report, write_table};
use colmap_transform::{TransformError, project_table};

use crate::logging::redact_value;

/// Failure of one pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("oracle request failed: {0}")]
    Oracle(#[from] OracleError),

    #[error("could not parse oracle response: {source}")]
    Parse {
        #[source]
        source: ParseError,
        raw: String,
    },

    #[error("could not build output table: {source}")]
    Projection {
        #[source]
        source: TransformError,
        raw: String,
    },

    #[error("could not write output: {source}")]
    Export {
        #[source]
        source: OutputError,
        raw: String,
    },
}

impl PipelineError {
    /// Raw oracle text, when the failure happened after the oracle answered.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Self::Parse { raw, .. } | Self::Projection { raw, .. } | Self::Export { raw, .. } => {
                Some(raw)
            }
            Self::Ingest(_) | Self::Oracle(_) => None,
        }
    }
}

// ============================================================================
// Stage 1: Load
// ============================================================================

/// The two input tables.
#[derive(Debug, Clone)]
pub struct MappingInputs {
    pub reference: LoadedTable,
    pub to_map: LoadedTable,
}

/// Loads both input tables.
pub fn load_inputs(reference: &Path, to_map: &Path) -> Result<MappingInputs, PipelineError> {
    let reference = load_table(reference)?;
    let to_map = load_table(to_map)?;
    Ok(MappingInputs { reference, to_map })
}

// ============================================================================
// Stage 2-3: Prompt and ask
// ============================================================================

/// Builds the prompt for the loaded inputs.
pub fn build_prompt(inputs: &MappingInputs) -> String {
    build_mapping_prompt(&inputs.reference.columns, &inputs.to_map.columns)
}

/// Sends the prompt and returns the raw answer.
pub fn ask_oracle(oracle: &dyn MappingOracle, prompt: &str) -> Result<String, PipelineError> {
    debug!(oracle = oracle.name(), prompt = redact_value(prompt), "sending prompt");
    let start = Instant::now();
    let raw = oracle.complete(prompt)?;
    info!(
        oracle = oracle.name(),
        bytes = raw.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "oracle answered"
    );
    debug!(response = redact_value(&raw), "raw oracle response");
    Ok(raw)
}

// ============================================================================
// Stage 4: Resolve
// ============================================================================

/// Turns raw oracle text into a validated mapping report.
///
/// Reference columns the oracle left out are mapped to null and listed as
/// omitted. Keys that are not reference columns are validated like any other
/// key and listed as unknown.
pub fn resolve_mapping(
    raw: &str,
    reference: &ColumnList,
    to_map: &ColumnList,
) -> Result<MappingReport, PipelineError> {
    let mut parsed = parse_mapping_response(raw).map_err(|source| PipelineError::Parse {
        source,
        raw: raw.to_string(),
    })?;

    let unknown_keys = parsed.unknown_keys(reference);
    if !unknown_keys.is_empty() {
        warn!(keys = ?unknown_keys, "oracle returned keys that are not reference columns");
    }
    let omitted = parsed.fill_missing(reference);
    if !omitted.is_empty() {
        warn!(columns = ?omitted, "oracle omitted reference columns; mapping them to null");
    }

    let outcome = validate_mapping(&parsed, to_map);
    let report = MappingReport {
        generated_at: Utc::now(),
        reference_columns: reference.clone(),
        to_map_columns: to_map.clone(),
        accepted: outcome.accepted,
        rejected: outcome.rejected,
        neutralized: parsed.neutralized().to_vec(),
        omitted,
        unknown_keys,
    };
    info!(
        mapped = report.mapped_count(),
        reference_columns = reference.len(),
        rejected = report.rejected.len(),
        "mapping validated"
    );
    Ok(report)
}

// ============================================================================
// Stage 5-6: Project and export
// ============================================================================

/// Options for a full run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub output: PathBuf,
    pub report: Option<PathBuf>,
    /// Skip writing files.
    pub dry_run: bool,
}

/// Everything a successful run produced.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub report: MappingReport,
    pub table: DataFrame,
    pub raw_response: String,
    /// Paths written, empty on a dry run.
    pub written: Vec<PathBuf>,
}

/// Projects the to-map table and writes the requested outputs.
pub fn project_and_export(
    inputs: &MappingInputs,
    report: &MappingReport,
    raw: &str,
    options: &RunOptions,
) -> Result<(DataFrame, Vec<PathBuf>), PipelineError> {
    let table = project_table(&report.reference_columns, &inputs.to_map.frame, &report.accepted)
        .map_err(|source| PipelineError::Projection {
            source,
            raw: raw.to_string(),
        })?;

    let mut written = Vec::new();
    if options.dry_run {
        info!("dry run; no files written");
        return Ok((table, written));
    }

    let export_error = |source: OutputError| PipelineError::Export {
        source,
        raw: raw.to_string(),
    };
    write_table(&table, &options.output).map_err(export_error)?;
    written.push(options.output.clone());
    if let Some(path) = &options.report {
        write_report(report, path).map_err(export_error)?;
        written.push(path.clone());
    }
    Ok((table, written))
}

/// Runs prompt, oracle, resolve, project, and export for loaded inputs.
pub fn run_mapping(
    inputs: &MappingInputs,
    oracle: &dyn MappingOracle,
    options: &RunOptions,
) -> Result<RunResult, PipelineError> {
    run_mapping_with(inputs, oracle, options, &mut |_: &MappingReport| {})
}

/// Like [`run_mapping`], calling `on_resolved` with the validated mapping
/// before any data is transformed or written.
pub fn run_mapping_with(
    inputs: &MappingInputs,
    oracle: &dyn MappingOracle,
    options: &RunOptions,
    on_resolved: &mut dyn FnMut(&MappingReport),
) -> Result<RunResult, PipelineError> {
    let span = info_span!(
        "map",
        reference = %inputs.reference.display_name(),
        to_map = %inputs.to_map.display_name()
    );
    let _guard = span.enter();

    let prompt = build_prompt(inputs);
    let raw = ask_oracle(oracle, &prompt)?;
    let report = resolve_mapping(&raw, &inputs.reference.columns, &inputs.to_map.columns)?;
    on_resolved(&report);
    let (table, written) = project_and_export(inputs, &report, &raw, options)?;

    Ok(RunResult {
        report,
        table,
        raw_response: raw,
        written,
    })
}

use std::io::{self, IsTerminal};
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, info_span};

use colmap_cli::config::{OracleOverrides, apply_overrides, load_oracle_config};
use colmap_cli::pipeline::{RunOptions, RunResult, build_prompt, load_inputs, run_mapping_with};
use colmap_ingest::load_table;
use colmap_oracle::{GeminiClient, MappingOracle, ReplayOracle};

use crate::cli::{ColumnsArgs, MapArgs, PairArgs};
use crate::summary::{print_columns, print_mapping_summary, print_prompt};

pub fn run_map(args: &MapArgs) -> Result<RunResult> {
    let inputs = load_inputs(&args.files.reference, &args.files.to_map)?;
    let oracle = build_oracle(args)?;
    let options = RunOptions {
        output: args.output.clone(),
        report: args.report.clone(),
        dry_run: args.dry_run,
    };

    let mut show_mapping = print_mapping_summary;
    let result = if args.response_file.is_some() {
        run_mapping_with(&inputs, oracle.as_ref(), &options, &mut show_mapping)?
    } else {
        let spinner = SpinnerOracle {
            inner: oracle.as_ref(),
        };
        run_mapping_with(&inputs, &spinner, &options, &mut show_mapping)?
    };
    Ok(result)
}

pub fn run_prompt(args: &PairArgs) -> Result<()> {
    let inputs = load_inputs(&args.reference, &args.to_map)?;
    let prompt = build_prompt(&inputs);
    print_prompt(&args.reference, &args.to_map, &prompt);
    Ok(())
}

pub fn run_columns(args: &ColumnsArgs) -> Result<()> {
    for (idx, path) in args.files.iter().enumerate() {
        let span = info_span!("columns", file = %path.display());
        let _guard = span.enter();
        let table = load_table(path)
            .with_context(|| format!("failed to load {}", path.display()))?;
        if idx > 0 {
            println!();
        }
        print_columns(&table, args.preview_rows);
    }
    Ok(())
}

fn build_oracle(args: &MapArgs) -> Result<Box<dyn MappingOracle>> {
    if let Some(path) = &args.response_file {
        info!(path = %path.display(), "using recorded oracle response");
        let oracle = ReplayOracle::from_file(path)
            .with_context(|| format!("failed to read response file {}", path.display()))?;
        return Ok(Box::new(oracle));
    }

    let config = load_oracle_config(args.config.as_deref()).context("load oracle config")?;
    let config = apply_overrides(
        config,
        OracleOverrides {
            api_key: args.api_key.clone(),
            model: args.model.clone(),
            endpoint: args.endpoint.clone(),
            timeout_secs: args.timeout_secs,
            temperature: args.temperature,
        },
    );
    debug!(?config, "oracle config");
    let client = GeminiClient::new(config).context("set up oracle client")?;
    Ok(Box::new(client))
}

/// Shows a spinner on stderr while the wrapped oracle is working.
struct SpinnerOracle<'a> {
    inner: &'a dyn MappingOracle,
}

impl MappingOracle for SpinnerOracle<'_> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn complete(&self, prompt: &str) -> colmap_oracle::Result<String> {
        let spinner = waiting_spinner(self.inner.name());
        let result = self.inner.complete(prompt);
        spinner.finish_and_clear();
        result
    }
}

fn waiting_spinner(oracle: &str) -> ProgressBar {
    if !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    match ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]") {
        Ok(style) => spinner.set_style(style),
        Err(error) => debug!(%error, "invalid spinner template"),
    }
    spinner.set_message(format!("Waiting for {oracle}"));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

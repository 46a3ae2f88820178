use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::DataFrame;

use colmap_ingest::LoadedTable;
use colmap_model::{MappingReport, MappingRow};
use colmap_transform::cell_to_text;

use colmap_cli::pipeline::RunResult;

/// Accepted and rejected mappings, shown before the table is projected.
pub fn print_mapping_summary(report: &MappingReport) {
    print_mapping_table(report);
    print_report_notes(report);
}

/// Preview of the projected table and the files written.
pub fn print_run_outcome(result: &RunResult, preview_rows: usize, dry_run: bool) {
    if preview_rows > 0 {
        let height = result.table.height();
        println!("Preview ({} of {height} rows):", preview_rows.min(height));
        println!("{}", preview_table(&result.table, preview_rows));
    }

    if dry_run {
        println!("Dry run: no files written.");
    }
    for path in &result.written {
        println!("Wrote: {}", path.display());
    }
}

fn print_mapping_table(report: &MappingReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Reference column"),
        header_cell("Mapped column"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    for row in report.rows() {
        table.add_row(vec![
            Cell::new(row.reference),
            target_cell(&row),
            status_cell(&row),
        ]);
    }
    println!(
        "Mapping: {} of {} reference columns mapped",
        report.mapped_count(),
        report.reference_columns.len()
    );
    println!("{table}");
}

fn print_report_notes(report: &MappingReport) {
    if !report.rejected.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Reference column"),
            header_cell("Rejected suggestion"),
        ]);
        apply_table_style(&mut table);
        for (reference, suggestion) in report.rejected.entries() {
            table.add_row(vec![
                Cell::new(reference),
                Cell::new(suggestion).fg(Color::Yellow),
            ]);
        }
        println!("Rejected suggestions (column not found in the file to map):");
        println!("{table}");
    }
    if !report.neutralized.is_empty() {
        println!("Replaced expressions:");
        for token in &report.neutralized {
            println!("- {} (offset {})", token.expression, token.offset);
        }
    }
    if !report.omitted.is_empty() {
        println!("Not mentioned by the oracle: {}", report.omitted.join(", "));
    }
    if !report.unknown_keys.is_empty() {
        println!("Ignored unknown keys: {}", report.unknown_keys.join(", "));
    }
}

pub fn print_columns(table: &LoadedTable, preview_rows: usize) {
    println!(
        "{} ({} columns, {} rows)",
        table.path.display(),
        table.columns.len(),
        table.height()
    );
    println!("{}", table.columns);
    if preview_rows > 0 && table.height() > 0 {
        println!("{}", preview_table(&table.frame, preview_rows));
    }
}

pub fn print_prompt(reference: &Path, to_map: &Path, prompt: &str) {
    eprintln!("Prompt for {} -> {}:", to_map.display(), reference.display());
    println!("{prompt}");
}

pub fn print_raw_response(raw: &str) {
    eprintln!("Raw oracle response:");
    eprintln!("{}", "-".repeat(40));
    eprintln!("{raw}");
    eprintln!("{}", "-".repeat(40));
}

fn preview_table(frame: &DataFrame, rows: usize) -> Table {
    let mut table = Table::new();
    table.set_header(
        frame
            .get_column_names()
            .into_iter()
            .map(|name| header_cell(name.as_str()))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for idx in 0..rows.min(frame.height()) {
        let cells: Vec<Cell> = frame
            .get_columns()
            .iter()
            .map(|column| match column.get(idx).ok().and_then(cell_to_text) {
                Some(text) => Cell::new(text),
                None => dim_cell("null"),
            })
            .collect();
        table.add_row(cells);
    }
    table
}

fn target_cell(row: &MappingRow<'_>) -> Cell {
    match row.target {
        Some(target) => Cell::new(target).fg(Color::Green),
        None => dim_cell("-"),
    }
}

fn status_cell(row: &MappingRow<'_>) -> Cell {
    match (row.target, row.rejected) {
        (Some(_), _) => Cell::new("mapped").fg(Color::Green),
        (None, Some(suggestion)) => Cell::new(format!("rejected: {suggestion}"))
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold),
        (None, None) => dim_cell("no match"),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Left);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

//! exlang CLI - compile exlang markup from the command line

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use exlang::prelude::*;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "exlang")]
#[command(author, version, about = "Compile exlang markup into spreadsheet content")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a markup file and report every structural error
    Check {
        /// Input markup file
        input: PathBuf,
    },

    /// Compile a markup file and dump the result to stdout or a file
    Build {
        /// Input markup file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Sheet index to dump for CSV output (0-based, default: 0)
        #[arg(short, long, default_value = "0")]
        sheet: usize,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: OutputFormat,
    },

    /// List the resolved sheet names of a markup file
    Sheets {
        /// Input markup file
        input: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// One sheet as comma-separated values
    Csv,
    /// Every sheet as a JSON object keyed by A1 addresses
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { input } => check(&input),
        Commands::Build {
            input,
            output,
            sheet,
            format,
        } => build(&input, output.as_deref(), sheet, format),
        Commands::Sheets { input } => list_sheets(&input),
    }
}

fn read_markup(input: &Path) -> Result<String> {
    std::fs::read_to_string(input).with_context(|| format!("Failed to read '{}'", input.display()))
}

fn check(input: &Path) -> Result<()> {
    let markup = read_markup(input)?;
    let doc = exlang::parse_document(&markup)
        .with_context(|| format!("Failed to parse '{}'", input.display()))?;

    let errors = validate(&doc);
    if errors.is_empty() {
        eprintln!("{}: OK", input.display());
        return Ok(());
    }

    for error in &errors {
        eprintln!("  - {}", error);
    }
    bail!("{}: {} validation error(s)", input.display(), errors.len());
}

fn build(input: &Path, output: Option<&Path>, sheet_idx: usize, format: OutputFormat) -> Result<()> {
    let markup = read_markup(input)?;
    let workbook = exlang::compile_to_workbook(&markup)
        .with_context(|| format!("Failed to compile '{}'", input.display()))?;

    let text = match format {
        OutputFormat::Csv => {
            let sheet = workbook
                .worksheet(sheet_idx)
                .with_context(|| format!("Sheet index {} not found", sheet_idx))?;
            sheet_to_csv(sheet)
        }
        OutputFormat::Json => workbook_to_json(&workbook)?,
    };

    if let Some(output_path) = output {
        std::fs::write(output_path, &text)
            .with_context(|| format!("Failed to write '{}'", output_path.display()))?;
        eprintln!("Wrote '{}'", output_path.display());
    } else {
        io::stdout()
            .write_all(text.as_bytes())
            .context("Failed to write to stdout")?;
    }

    Ok(())
}

fn sheet_to_csv(sheet: &Worksheet) -> String {
    let used = match sheet.used_range() {
        Some(range) => range,
        None => return String::new(),
    };

    let mut csv = String::new();
    for row in 1..=used.end.row {
        let mut first = true;
        for col in 1..=used.end.col {
            if !first {
                csv.push(',');
            }
            first = false;

            if let Some(value) = sheet.value_at(row, col) {
                csv.push_str(&cell_value_to_csv_string(value));
            }
        }
        csv.push('\n');
    }

    csv
}

/// Convert a CellValue to a CSV-safe string
fn cell_value_to_csv_string(value: &CellValue) -> String {
    let text = value.to_string();

    // Quote if necessary
    if text.contains(',') || text.contains('"') || text.contains('\n') || text.contains('\r') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text
    }
}

fn workbook_to_json(workbook: &Workbook) -> Result<String> {
    let sheets: Vec<serde_json::Value> = workbook
        .worksheets()
        .map(|sheet| {
            let cells: serde_json::Map<String, serde_json::Value> = sheet
                .iter_cells()
                .map(|(addr, value)| (addr.to_string(), cell_value_to_json(value)))
                .collect();
            serde_json::json!({
                "name": sheet.name(),
                "cells": cells,
            })
        })
        .collect();

    let doc = serde_json::json!({ "sheets": sheets });
    serde_json::to_string_pretty(&doc).context("Failed to serialize workbook")
}

fn cell_value_to_json(value: &CellValue) -> serde_json::Value {
    match value {
        CellValue::Empty => serde_json::Value::Null,
        CellValue::Bool(b) => serde_json::json!(b),
        CellValue::Int(i) => serde_json::json!(i),
        CellValue::Float(f) => serde_json::json!(f),
        CellValue::DateTime(dt) => serde_json::json!(dt.to_string()),
        CellValue::String(s) => serde_json::json!(s),
    }
}

fn list_sheets(input: &Path) -> Result<()> {
    let markup = read_markup(input)?;
    let doc = exlang::parse_document(&markup)
        .with_context(|| format!("Failed to parse '{}'", input.display()))?;

    for (i, name) in exlang::resolve_sheet_names(&doc).iter().enumerate() {
        println!("{}\t{}", i, name);
    }

    Ok(())
}

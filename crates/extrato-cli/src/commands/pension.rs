//! Compile a folder of pension statement dumps.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use glob::glob;
use tracing::info;

use extrato_core::locale::Locale;
use extrato_core::pension::{compile_table, parse_statement};

use super::{read_latin1, write_table, OutputFormat};

/// Arguments for the pension command.
#[derive(Args)]
pub struct PensionArgs {
    /// Folder containing the statement dumps
    dir: PathBuf,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,
}

pub fn run(args: PensionArgs) -> Result<()> {
    let pattern = args.dir.join("*.txt");
    let mut book = Vec::new();

    for entry in glob(&pattern.to_string_lossy()).context("invalid glob pattern")? {
        let path = entry?;
        let text = read_latin1(&path)?;
        // The reporting period lives in the file name, not the document.
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let statement = parse_statement(&text, &name)
            .with_context(|| format!("processing {}", path.display()))?;
        book.push(statement);
    }
    info!("{} pension statements parsed from {}", book.len(), args.dir.display());

    let table = compile_table(&book, &Locale::pt_br());
    write_table(&table, args.format, args.output.as_deref())
}

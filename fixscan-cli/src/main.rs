/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Command-line interface for the fixscan FIX log reader.
//!
//! Thin wiring only: option parsing with `clap`, `tracing` setup, and
//! pretty-printed Arrow output. All behavior lives in the library crates.

use anyhow::{bail, Context, Result};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::print_batches;
use clap::{Parser, Subcommand};
use fixscan::dictionary::{apply_overlay_file, embedded_fix44, load_file, Dictionary};
use fixscan::scan::{bind, fields_batch, groups_batch, message_fields_batch, ScanOptions, Scanner};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fixscan")]
#[command(about = "Read FIX protocol logs as relational tables")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan FIX log files into a table.
    Scan {
        /// Path or glob pattern for the input logs.
        pattern: String,

        /// Dictionary XML path (defaults to the embedded FIX 4.4).
        #[arg(long)]
        dictionary: Option<PathBuf>,

        /// Overlay XML applied on top of the base dictionary.
        #[arg(long)]
        overlay: Option<PathBuf>,

        /// Field delimiter: one character, or \x01 for SOH.
        #[arg(long, default_value = "|")]
        delimiter: String,

        /// Custom tag columns by field name.
        #[arg(long, value_delimiter = ',')]
        rtags: Vec<String>,

        /// Custom tag columns by tag number.
        #[arg(long, value_delimiter = ',')]
        tag_ids: Vec<u32>,

        /// Columns to project, by name.
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,

        /// Stop after this many rows.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Dump the field catalog of a dictionary.
    Fields {
        /// Dictionary XML path (defaults to the embedded FIX 4.4).
        #[arg(long)]
        dictionary: Option<PathBuf>,
    },

    /// Dump per-message field usage of a dictionary.
    MessageFields {
        /// Dictionary XML path (defaults to the embedded FIX 4.4).
        #[arg(long)]
        dictionary: Option<PathBuf>,
    },

    /// Dump the repeating-group inventory of a dictionary.
    Groups {
        /// Dictionary XML path (defaults to the embedded FIX 4.4).
        #[arg(long)]
        dictionary: Option<PathBuf>,

        /// Overlay XML applied on top of the base dictionary.
        #[arg(long)]
        overlay: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Scan {
            pattern,
            dictionary,
            overlay,
            delimiter,
            rtags,
            tag_ids,
            columns,
            limit,
        } => run_scan(
            pattern, dictionary, overlay, delimiter, rtags, tag_ids, columns, limit,
        ),
        Command::Fields { dictionary } => {
            let dict = resolve_dictionary(dictionary, None)?;
            print_batches(&[fields_batch(&dict)?]).context("printing field catalog")?;
            Ok(())
        }
        Command::MessageFields { dictionary } => {
            let dict = resolve_dictionary(dictionary, None)?;
            print_batches(&[message_fields_batch(&dict)?]).context("printing message fields")?;
            Ok(())
        }
        Command::Groups {
            dictionary,
            overlay,
        } => {
            let dict = resolve_dictionary(dictionary, overlay)?;
            print_batches(&[groups_batch(&dict)?]).context("printing group inventory")?;
            Ok(())
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_scan(
    pattern: String,
    dictionary: Option<PathBuf>,
    overlay: Option<PathBuf>,
    delimiter: String,
    rtags: Vec<String>,
    tag_ids: Vec<u32>,
    columns: Vec<String>,
    limit: Option<usize>,
) -> Result<()> {
    let mut options = ScanOptions::new(pattern)
        .with_delimiter(delimiter)
        .with_rtags(rtags)
        .with_tag_ids(tag_ids);
    if let Some(path) = dictionary {
        options = options.with_dictionary(path);
    }
    if let Some(path) = overlay {
        options = options.with_overlay(path);
    }

    let bound = Arc::new(bind(&options)?);

    let mut scanner = Scanner::new(bound.clone());
    if !columns.is_empty() {
        let mut projection = Vec::with_capacity(columns.len());
        for name in &columns {
            match bound.schema.index_of(name) {
                Ok(idx) => projection.push(idx),
                Err(_) => bail!("unknown column `{name}`"),
            }
        }
        scanner = scanner.with_projection(projection);
    }

    let mut batches: Vec<RecordBatch> = Vec::new();
    let mut rows = 0usize;
    while let Some(batch) = scanner.next_batch()? {
        rows += batch.num_rows();
        batches.push(batch);
        if limit.is_some_and(|cap| rows >= cap) {
            break;
        }
    }

    if let Some(cap) = limit {
        truncate_rows(&mut batches, cap);
    }
    print_batches(&batches).context("printing scan output")?;
    Ok(())
}

fn truncate_rows(batches: &mut Vec<RecordBatch>, cap: usize) {
    let mut remaining = cap;
    batches.retain_mut(|batch| {
        if remaining == 0 {
            return false;
        }
        if batch.num_rows() > remaining {
            *batch = batch.slice(0, remaining);
        }
        remaining -= batch.num_rows();
        true
    });
}

fn resolve_dictionary(
    dictionary: Option<PathBuf>,
    overlay: Option<PathBuf>,
) -> Result<Dictionary> {
    let mut dict = match dictionary {
        Some(path) => load_file(&path)
            .with_context(|| format!("loading dictionary from {}", path.display()))?,
        None => embedded_fix44().context("loading embedded FIX 4.4 dictionary")?,
    };
    if let Some(path) = overlay {
        apply_overlay_file(&mut dict, &path)
            .with_context(|| format!("applying overlay from {}", path.display()))?;
    }
    Ok(dict)
}

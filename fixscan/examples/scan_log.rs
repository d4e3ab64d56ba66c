/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Scan a FIX log and print a few typed fields per row.
//!
//! Usage: `cargo run --example scan_log -- <path-or-glob>`

use arrow::array::{Array, Float64Array, StringArray};
use fixscan::prelude::*;
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Some(pattern) = std::env::args().nth(1) else {
        eprintln!("usage: scan_log <path-or-glob>");
        std::process::exit(2);
    };

    let options = ScanOptions::new(pattern);
    let bound = Arc::new(bind(&options)?);

    // Project MsgType, Symbol, Price, and parse_error only; the tags and
    // groups containers are never materialized.
    let msg_type = bound.schema.index_of("MsgType")?;
    let symbol = bound.schema.index_of("Symbol")?;
    let price = bound.schema.index_of("Price")?;
    let parse_error = bound.schema.index_of("parse_error")?;

    let mut scanner =
        Scanner::new(bound).with_projection(vec![msg_type, symbol, price, parse_error]);

    while let Some(batch) = scanner.next_batch()? {
        let msg_types = batch
            .column(0)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        let symbols = batch
            .column(1)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        let prices = batch
            .column(2)
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        let errors = batch
            .column(3)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();

        for row in 0..batch.num_rows() {
            if !errors.is_null(row) {
                println!("row {row}: parse_error = {}", errors.value(row));
                continue;
            }
            println!(
                "row {row}: MsgType={} Symbol={} Price={}",
                msg_types.value(row),
                if symbols.is_null(row) { "-" } else { symbols.value(row) },
                if prices.is_null(row) {
                    "-".to_string()
                } else {
                    prices.value(row).to_string()
                },
            );
        }
    }

    let metrics = scanner.metrics();
    eprintln!(
        "{} rows, {} empty lines skipped",
        metrics.rows_emitted, metrics.lines_skipped
    );
    Ok(())
}

//! Sales Data Preparation
//!
//! Converts a bill export CSV into the half-hourly weekday JSON that the
//! dashboard loads.

use anyhow::Context;
use clap::Parser;
use log::info;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use salesdash::prep::{process_bills, write_records, Measure, PrepOptions};

/// Process sales data from CSV and save as JSON.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Path to the input CSV file
    input: PathBuf,
    /// Path to save the output JSON file
    output: PathBuf,
    /// Column summed into each bucket
    #[arg(long, value_enum, default_value_t = Measure::Revenue)]
    measure: Measure,
    /// Only keep bills from the last N days of the export
    #[arg(long, value_parser = clap::value_parser!(i64).range(0..))]
    days: Option<i64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let input = File::open(&args.input)
        .with_context(|| format!("could not open {}", args.input.display()))?;
    let options = PrepOptions {
        measure: args.measure,
        window_days: args.days,
    };

    let records = process_bills(BufReader::new(input), &options)
        .with_context(|| format!("could not process {}", args.input.display()))?;
    write_records(&args.output, &records)
        .with_context(|| format!("could not write {}", args.output.display()))?;

    info!(
        "Data processed successfully. Output saved to {}",
        args.output.display()
    );
    Ok(())
}

//! CLI tool to transform a product file.
//!
//! Usage:
//!   product-etl
//!   product-etl -i <input.csv> -o <output.csv>
//!
//! Without arguments, reads `data/products.csv` and writes
//! `data/transformed_products.csv`.

use clap::Parser;
use product_etl::{Config, EtlError, init_logging, run};
use std::path::PathBuf;
use std::process;

/// Transform product records and append a PriceRange column.
#[derive(Parser)]
#[command(name = "product-etl")]
struct Cli {
    /// Input file (header line plus `id,name,price,category` rows)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log paths, rules and per-reason skip counts on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::default();
    if let Some(input) = &cli.input {
        config = config.with_input(input);
    }
    if let Some(output) = &cli.output {
        config = config.with_output(output);
    }

    match run(&config) {
        Ok(summary) => {
            println!("ETL Process Complete!");
            println!("Processed rows: {}", summary.processed);
            println!("Skipped rows: {}", summary.skipped);
        }
        Err(EtlError::OpenInput { path, .. }) => {
            eprintln!("Error: Ensure the input file '{}' exists.", path.display());
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

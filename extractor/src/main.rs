mod date;
mod extract;

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::extract::extract_all;

/// Extract NSE margin trading data zip files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing zip files to extract
    #[arg(short, long, default_value = "data")]
    input_dir: PathBuf,

    /// Directory to extract files to
    #[arg(short, long, default_value = "data/extracted")]
    output_dir: PathBuf,

    /// Extract all files to a flat directory instead of organizing by
    /// year/month
    #[arg(short, long)]
    flat: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let summary = extract_all(&cli.input_dir, &cli.output_dir, !cli.flat)?;

    println!("\nExtraction Summary:");
    println!("  Total zip files: {}", summary.total());
    println!("  Successfully extracted: {}", summary.succeeded);
    println!("  Failed to extract: {}", summary.failed);
    println!("  Total files extracted: {}", summary.entries_extracted);
    println!(
        "All files extracted to: {}",
        fs::canonicalize(&cli.output_dir)?.display()
    );

    Ok(())
}

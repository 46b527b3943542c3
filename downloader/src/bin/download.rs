use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use nse_downloader::batch::{read_url_list, run_batch};
use nse_downloader::fetch::FetchOptions;
use nse_downloader::session::Session;

/// Download NSE margin trading data files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input file containing URLs to download (one per line)
    #[arg(short, long, default_value = "nse_urls.txt")]
    input: PathBuf,

    /// Directory to save downloaded files
    #[arg(short, long, default_value = "data")]
    output_dir: PathBuf,

    /// Delay in seconds between downloads
    #[arg(short, long, default_value_t = 1.0)]
    delay: f64,

    /// Maximum number of files to download (0 for unlimited)
    #[arg(short, long, default_value_t = 0)]
    max_files: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    // No download succeeds without a session, so a failure here aborts
    // the run before any file operation. The output directory is
    // created by run_batch once the session is established.
    let session = Session::connect().context("Failed to get authentication cookies")?;

    let mut urls = read_url_list(&cli.input)?;
    println!("Found {} URLs to process", urls.len());

    if cli.max_files > 0 && cli.max_files < urls.len() {
        println!("Limiting to {} downloads as specified", cli.max_files);
        urls.truncate(cli.max_files);
    }

    let options = FetchOptions {
        delay: Duration::from_secs_f64(cli.delay),
        ..FetchOptions::default()
    };
    let summary = run_batch(&session, &urls, &cli.output_dir, &options)?;

    println!("\nDownload Summary:");
    println!("  Total URLs: {}", summary.total);
    println!("  Successfully downloaded: {}", summary.downloaded);
    println!("  Skipped (already exist): {}", summary.skipped);
    println!("  Failed: {}", summary.failed);
    println!(
        "All files saved to: {}",
        fs::canonicalize(&cli.output_dir)?.display()
    );

    Ok(())
}

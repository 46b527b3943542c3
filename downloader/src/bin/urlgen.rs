use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::Parser;

use nse_downloader::urls::{daily_urls, save_url_list};

/// Generate NSE margin trading archive URLs for every day in a
/// lookback window
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of years to look back from today
    #[arg(short, long, default_value_t = 10)]
    years: u32,

    /// Output file for the URL list (one per line)
    #[arg(short, long, default_value = "nse_urls.txt")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let today = Local::now().date_naive();
    let urls = daily_urls(today, cli.years);

    println!(
        "Generated {} URLs for all days in the last {} years",
        urls.len(),
        cli.years
    );

    println!("\nFirst 3 URLs:");
    for url in urls.iter().take(3) {
        println!("{}", url);
    }

    println!("\nLast 3 URLs:");
    for url in &urls[urls.len().saturating_sub(3)..] {
        println!("{}", url);
    }

    save_url_list(&urls, &cli.output)?;
    println!("\nSaved {} URLs to {}", urls.len(), cli.output.display());

    Ok(())
}

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate};

/// Build the archive URL for a single trading day.
///
/// The archive path embeds the date as DDMMYY, e.g.
/// `mrg_trading_150324.zip` for 15 March 2024.
pub fn archive_url(date: NaiveDate) -> String {
    format!(
        "https://nsearchives.nseindia.com/content/equities/mrg_trading_{}.zip",
        date.format("%d%m%y")
    )
}

/// Calendar-aware subtraction of whole years.
pub fn years_before(date: NaiveDate, years: u32) -> NaiveDate {
    let year = date.year() - years as i32;
    // Feb 29 anchors clamp to Feb 28 when the target year is not a leap year
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, date.month(), date.day() - 1).unwrap())
}

/// Generate one archive URL per calendar day from `anchor - years`
/// through `anchor` inclusive, in date order.
pub fn daily_urls(anchor: NaiveDate, years: u32) -> Vec<String> {
    let start = years_before(anchor, years);
    let mut urls = Vec::new();

    let mut current = start;
    while current <= anchor {
        urls.push(archive_url(current));
        current += Duration::days(1);
    }

    urls
}

/// Save the generated URLs to a text file, one per line.
pub fn save_url_list(urls: &[String], path: &Path) -> Result<()> {
    let mut contents = String::new();
    for url in urls {
        contents.push_str(url);
        contents.push('\n');
    }

    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write URL list to {}", path.display()))
}

use std::path::PathBuf;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

/// Date token embedded in archive filenames, with the two-digit year
/// already mapped to 20YY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveDate {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl ArchiveDate {
    /// Directory partition for this date: `20YY/MM`.
    pub fn partition(&self) -> PathBuf {
        PathBuf::from(self.year.to_string()).join(format!("{:02}", self.month))
    }
}

fn date_token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"mrg_trading_(\d{2})(\d{2})(\d{2})\.zip").unwrap())
}

/// Parse the DDMMYY token out of an archive filename.
///
/// Only filenames carrying the `mrg_trading_` prefix match, and the
/// token must be a real calendar date; anything else yields `None` and
/// the caller extracts into the output root instead of a dated
/// subdirectory.
pub fn parse_archive_date(filename: &str) -> Option<ArchiveDate> {
    let captures = date_token_pattern().captures(filename)?;
    let day: u32 = captures[1].parse().ok()?;
    let month: u32 = captures[2].parse().ok()?;
    let year: i32 = 2000 + captures[3].parse::<i32>().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)?;
    Some(ArchiveDate { day, month, year })
}

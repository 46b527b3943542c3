use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use zip::ZipArchive;

use crate::date::parse_archive_date;

/// Tally of extraction outcomes for one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub entries_extracted: usize,
}

impl ExtractionSummary {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Recursively collect zip files under `dir`, sorted for a stable
/// processing order.
pub fn find_zip_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    collect_zip_files(dir, &mut found)?;
    found.sort();
    Ok(found)
}

fn collect_zip_files(dir: &Path, found: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;

    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            collect_zip_files(&path, found)?;
        } else if path.extension().map_or(false, |ext| ext == "zip") {
            found.push(path);
        }
    }

    Ok(())
}

/// Pick the extraction target for one archive. Partitioned mode routes
/// dated archives into year/month subdirectories; everything else lands
/// in the output root.
fn target_dir(output_dir: &Path, filename: &str, partitioned: bool) -> PathBuf {
    if partitioned {
        if let Some(date) = parse_archive_date(filename) {
            return output_dir.join(date.partition());
        }
    }
    output_dir.to_path_buf()
}

/// Extract one archive, returning the number of entries it contained.
fn extract_archive(zip_path: &Path, extract_dir: &Path) -> Result<usize> {
    let file = File::open(zip_path)
        .with_context(|| format!("Failed to open {}", zip_path.display()))?;
    let mut archive = ZipArchive::new(file)
        .with_context(|| format!("{} is not a valid zip file", zip_path.display()))?;

    fs::create_dir_all(extract_dir)
        .with_context(|| format!("Failed to create {}", extract_dir.display()))?;

    let entry_count = archive.len();
    archive
        .extract(extract_dir)
        .with_context(|| format!("Failed to extract {}", zip_path.display()))?;

    Ok(entry_count)
}

/// Extract every zip file found under `input_dir` into `output_dir`.
///
/// One bad archive never aborts the batch: per-archive failures are
/// logged and counted, and processing continues with the next file.
pub fn extract_all(
    input_dir: &Path,
    output_dir: &Path,
    partitioned: bool,
) -> Result<ExtractionSummary> {
    fs::create_dir_all(output_dir).with_context(|| {
        format!("Failed to create output directory {}", output_dir.display())
    })?;

    let zip_files = find_zip_files(input_dir)?;
    if zip_files.is_empty() {
        println!("No zip files found in {}", input_dir.display());
        return Ok(ExtractionSummary::default());
    }

    println!("Found {} zip files to extract", zip_files.len());

    let mut summary = ExtractionSummary::default();
    for zip_path in &zip_files {
        let filename = zip_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extract_dir = target_dir(output_dir, &filename, partitioned);

        match extract_archive(zip_path, &extract_dir) {
            Ok(count) => {
                summary.succeeded += 1;
                summary.entries_extracted += count;
                println!(
                    "Extracted {} file(s) from {} to {}",
                    count,
                    filename,
                    extract_dir.display()
                );
            }
            Err(err) => {
                summary.failed += 1;
                log::warn!("Error extracting {}: {:#}", filename, err);
            }
        }
    }

    Ok(summary)
}

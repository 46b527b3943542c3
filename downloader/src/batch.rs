use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use crate::fetch::{fetch, FailureKind, FetchOptions, Outcome, Task};
use crate::session::Session;

/// Tally of download outcomes for one batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Read a line-delimited URL list, dropping blank lines.
pub fn read_url_list(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read URL list from {}", path.display()))?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn outcome_message(task: &Task, outcome: Outcome, options: &FetchOptions) -> String {
    match outcome {
        Outcome::Downloaded => format!("Downloaded: {}", task.filename),
        Outcome::Skipped => format!("Skipped (already exists): {}", task.filename),
        Outcome::NotFound => format!("File not found (404): {}", task.filename),
        Outcome::ErrorPage => format!("Error page received for: {}", task.filename),
        Outcome::RetriesExhausted(FailureKind::Http) => {
            format!("Failed after {} retries: {}", options.max_retries, task.filename)
        }
        Outcome::RetriesExhausted(FailureKind::Network) => {
            format!(
                "Network error after {} retries: {}",
                options.max_retries, task.filename
            )
        }
    }
}

/// Download every URL in order through the resilient fetcher.
///
/// Tasks are processed strictly sequentially. Per-item failures are
/// counted and never stop the batch; only filesystem problems with the
/// output directory itself propagate.
pub fn run_batch(
    session: &Session,
    urls: &[String],
    output_dir: &Path,
    options: &FetchOptions,
) -> Result<Summary> {
    fs::create_dir_all(output_dir).with_context(|| {
        format!("Failed to create output directory {}", output_dir.display())
    })?;

    let mut summary = Summary {
        total: urls.len(),
        ..Summary::default()
    };

    let bar = ProgressBar::new(urls.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}").unwrap(),
    );

    for url in urls {
        let result = Task::from_url(url)
            .and_then(|task| fetch(session, &task, output_dir, options).map(|o| (task, o)));

        let message = match result {
            Ok((task, outcome)) => {
                match outcome {
                    Outcome::Downloaded => summary.downloaded += 1,
                    Outcome::Skipped => summary.skipped += 1,
                    _ => summary.failed += 1,
                }
                outcome_message(&task, outcome, options)
            }
            Err(err) => {
                summary.failed += 1;
                format!("Error: {:#}", err)
            }
        };

        bar.set_message(message);
        bar.inc(1);
    }

    bar.finish();
    Ok(summary)
}

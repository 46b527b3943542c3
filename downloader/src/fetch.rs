use std::fs::{self, File};
use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{StatusCode, Url};

use crate::session::Session;

/// Responses declaring fewer bytes than this are inspected for a
/// disguised error page before being trusted.
pub const ERROR_PAGE_SIZE_THRESHOLD: u64 = 100;

/// Case-insensitive markers identifying an error page served with a
/// 200 status.
pub const ERROR_PAGE_MARKERS: &[&str] = &["error", "not found"];

/// A single download: the URL and the filename derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub url: String,
    pub filename: String,
}

impl Task {
    /// Derive the target filename from the last path segment of the URL.
    pub fn from_url(url: &str) -> Result<Task> {
        let parsed = Url::parse(url).with_context(|| format!("Invalid URL: {}", url))?;
        let filename = parsed
            .path_segments()
            .and_then(|segments| segments.last())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("URL has no file name: {}", url))?;

        Ok(Task {
            url: url.to_string(),
            filename,
        })
    }
}

/// Which failure class used up the retry budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Http,
    Network,
}

/// Result of one download attempt sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The file was fetched and written to disk.
    Downloaded,
    /// The target file already exists; no request was made.
    Skipped,
    /// The server answered 404. Permanent, never retried.
    NotFound,
    /// A small 2xx body that looks like an error page. Never retried.
    ErrorPage,
    /// The retry budget ran out on a transient failure.
    RetriesExhausted(FailureKind),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Outcome::NotFound | Outcome::ErrorPage | Outcome::RetriesExhausted(_)
        )
    }
}

/// Tunable download policy. The error-page heuristics are fields rather
/// than hard-coded literals since real server responses vary.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Pause after each successful download.
    pub delay: Duration,
    /// Total attempts per URL, counting the first.
    pub max_retries: u32,
    pub error_page_threshold: u64,
    pub error_page_markers: Vec<String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        FetchOptions {
            delay: Duration::from_secs(1),
            max_retries: 3,
            error_page_threshold: ERROR_PAGE_SIZE_THRESHOLD,
            error_page_markers: ERROR_PAGE_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// Download one file, skipping work that is already done.
///
/// The target path is `output_dir` joined with the task filename. An
/// existing target short-circuits to `Skipped` before any network call,
/// so re-running a batch over the same list is cheap and safe.
///
/// Retry policy: HTTP 404 and disguised error pages are permanent and
/// returned immediately. Other HTTP errors wait `2 * delay` between
/// attempts, network errors `3 * delay`, up to `max_retries` attempts
/// total.
pub fn fetch(
    session: &Session,
    task: &Task,
    output_dir: &Path,
    options: &FetchOptions,
) -> Result<Outcome> {
    let target = output_dir.join(&task.filename);
    if target.exists() {
        return Ok(Outcome::Skipped);
    }

    let mut attempts = 0;
    loop {
        attempts += 1;

        let mut response = match session.client().get(&task.url).send() {
            Ok(response) => response,
            Err(err) => {
                if attempts >= options.max_retries {
                    return Ok(Outcome::RetriesExhausted(FailureKind::Network));
                }
                log::warn!(
                    "Network error, retrying ({}/{}): {}",
                    attempts,
                    options.max_retries,
                    err
                );
                thread::sleep(options.delay * 3);
                continue;
            }
        };

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(Outcome::NotFound);
        }
        if !status.is_success() {
            if attempts >= options.max_retries {
                return Ok(Outcome::RetriesExhausted(FailureKind::Http));
            }
            log::warn!(
                "HTTP error ({}), retrying ({}/{})...",
                status,
                attempts,
                options.max_retries
            );
            thread::sleep(options.delay * 2);
            continue;
        }

        // A suspiciously small body may be an HTML error page served
        // with a 200 status. Buffer it and check before writing.
        let declared_length = response.content_length().unwrap_or(0);
        if declared_length < options.error_page_threshold {
            let body = match response.bytes() {
                Ok(body) => body,
                Err(err) => {
                    if attempts >= options.max_retries {
                        return Ok(Outcome::RetriesExhausted(FailureKind::Network));
                    }
                    log::warn!(
                        "Network error, retrying ({}/{}): {}",
                        attempts,
                        options.max_retries,
                        err
                    );
                    thread::sleep(options.delay * 3);
                    continue;
                }
            };

            let sample_len = body.len().min(options.error_page_threshold as usize);
            let sample = String::from_utf8_lossy(&body[..sample_len]).to_lowercase();
            if options
                .error_page_markers
                .iter()
                .any(|marker| sample.contains(marker))
            {
                return Ok(Outcome::ErrorPage);
            }

            fs::write(&target, &body)
                .with_context(|| format!("Failed to write {}", target.display()))?;
        } else {
            let mut file = File::create(&target)
                .with_context(|| format!("Failed to create {}", target.display()))?;
            if let Err(err) = response.copy_to(&mut file) {
                // Never leave a partial file behind: an existing target
                // must always mean a completed download.
                drop(file);
                let _ = fs::remove_file(&target);

                if attempts >= options.max_retries {
                    return Ok(Outcome::RetriesExhausted(FailureKind::Network));
                }
                log::warn!(
                    "Network error, retrying ({}/{}): {}",
                    attempts,
                    options.max_retries,
                    err
                );
                thread::sleep(options.delay * 3);
                continue;
            }
        }

        // Wait to avoid overwhelming the server
        thread::sleep(options.delay);
        return Ok(Outcome::Downloaded);
    }
}

// Export the downloader modules
pub mod batch;
pub mod fetch;
pub mod session;
pub mod urls;

// Re-export tests for integration testing
#[cfg(test)]
pub mod tests;

// Re-export key types and functions for easier access
pub use crate::batch::{read_url_list, run_batch, Summary};
pub use crate::fetch::{fetch, FailureKind, FetchOptions, Outcome, Task};
pub use crate::session::Session;
pub use crate::urls::{archive_url, daily_urls, save_url_list, years_before};

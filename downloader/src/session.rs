use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};

/// User-Agent mimicking a desktop Chrome browser; NSE rejects requests
/// without a realistic browser header set.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/101.0.4951.54 Safari/537.36";

/// Reference page visited once to collect the session cookies required
/// by the archive endpoints.
pub const COOKIE_URL: &str =
    "https://www.nseindia.com/products-services/equity-derivatives-individual-securities";

/// Timeout applied to every request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The fixed header set sent with every request, built once per client.
fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en"));
    headers.insert("dnt", HeaderValue::from_static("1"));
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert("x-requested-with", HeaderValue::from_static("XMLHttpRequest"));
    headers
}

/// An authenticated HTTP session. The wrapped client carries the fixed
/// header set, the request timeout, and a cookie store shared by every
/// download in the run.
pub struct Session {
    client: Client,
}

impl Session {
    /// Visit the NSE website to collect the cookies necessary for
    /// authenticated requests. Without a session no download succeeds,
    /// so any failure here is fatal to the run.
    pub fn connect() -> Result<Session> {
        let session = Session::detached()?;

        println!("Getting cookies from NSE website...");
        let response = session
            .client
            .get(COOKIE_URL)
            .send()
            .context("Failed to reach the NSE cookie page")?
            .error_for_status()
            .context("NSE cookie page returned an error status")?;

        let cookie_count = response.cookies().count();
        println!("Successfully got cookies. Collected {} cookies.", cookie_count);

        Ok(session)
    }

    /// Build the same cookie-holding client without visiting the cookie
    /// page, for servers that do not require a primed session.
    pub fn detached() -> Result<Session> {
        let client = Client::builder()
            .default_headers(default_headers())
            .cookie_store(true)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Session { client })
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }
}

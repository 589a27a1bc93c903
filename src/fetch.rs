//! HTTP transport with timeouts and exponential backoff.
//!
//! The extraction core never talks to the network; it receives bodies fetched
//! here. The module uses a trait-based design so that adapters can be driven
//! by a stub in tests:
//! - [`Fetch`]: core trait returning a response body for a URL
//! - [`HttpFetcher`]: `reqwest` client with connect/total timeouts and
//!   browser-like headers
//! - [`RetryFetch`]: decorator that retries transient failures
//!
//! # Retry Strategy
//!
//! - Only transient failures are retried (timeouts, connection errors, 429, 5xx)
//! - Exponential backoff starting at `base_delay`, capped at 30 seconds
//! - Random jitter (0-250ms by default) added to each delay

use rand::{Rng, rng};
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use std::fmt;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, error, instrument, warn};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Transport failures.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
    #[error("{0} returned an empty body")]
    EmptyBody(String),
    #[error("no candidate URL configured")]
    NoCandidates,
}

impl FetchError {
    /// Whether retrying the same request could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            FetchError::Status { status, .. } => *status == 429 || *status >= 500,
            FetchError::EmptyBody(_) | FetchError::NoCandidates => false,
        }
    }
}

/// Something that turns a URL into a response body.
///
/// Futures are not required to be `Send`; the binary drives every source on
/// one task.
#[allow(async_fn_in_trait)]
pub trait Fetch {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// `reqwest`-backed fetcher with timeouts and browser-like headers.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "application/json,text/html,application/xhtml+xml,application/xml;q=0.9,text/plain,*/*;q=0.8",
            ),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("zh-CN,zh;q=0.9,en;q=0.7"),
        );

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let t0 = Instant::now();
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched body"
        );
        if body.trim().is_empty() {
            return Err(FetchError::EmptyBody(url.to_string()));
        }
        Ok(body)
    }
}

/// Wrapper that adds exponential backoff retry logic to any [`Fetch`].
///
/// ```text
/// delay = min(base_delay * 2^(attempt-1), max_delay) + random_jitter(0..max_jitter)
/// ```
pub struct RetryFetch<T> {
    inner: T,
    max_retries: usize,
    base_delay: Duration,
    max_delay: Duration,
    max_jitter: Duration,
}

impl<T> RetryFetch<T>
where
    T: Fetch,
{
    /// Wrap `inner`, retrying at most `max_retries` times after the first attempt.
    pub fn new(inner: T, max_retries: usize, base_delay: Duration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: Duration::from_secs(30),
            max_jitter: Duration::from_millis(250),
        }
    }

    pub fn with_max_jitter(mut self, max_jitter: Duration) -> Self {
        self.max_jitter = max_jitter;
        self
    }

    fn backoff(&self, attempt: usize) -> Duration {
        let shift = (attempt.saturating_sub(1)).min(16) as u32;
        let delay = self.base_delay.saturating_mul(1 << shift).min(self.max_delay);
        let jitter_ms: u64 = rng().random_range(0..=self.max_jitter.as_millis() as u64);
        delay + Duration::from_millis(jitter_ms)
    }
}

impl<T> fmt::Debug for RetryFetch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryFetch")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish()
    }
}

impl<T> Fetch for RetryFetch<T>
where
    T: Fetch,
{
    #[instrument(level = "info", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            match self.inner.fetch(url).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    attempt += 1;
                    let total_dt = total_t0.elapsed();

                    if !e.is_transient() || attempt > self.max_retries {
                        error!(
                            attempt,
                            max = self.max_retries,
                            elapsed_ms_total = total_dt.as_millis() as u64,
                            error = %e,
                            "fetch() giving up"
                        );
                        return Err(e);
                    }

                    let delay = self.backoff(attempt);
                    warn!(
                        attempt,
                        max = self.max_retries,
                        elapsed_ms_total = total_dt.as_millis() as u64,
                        ?delay,
                        error = %e,
                        "fetch() attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

/// Try candidate URLs in order and return the first one that answers, with
/// its body.
///
/// Some providers answer on one of several equivalent endpoints depending on
/// query parameters; a failing candidate only moves us to the next one.
pub async fn fetch_first<'a, F: Fetch>(
    fetcher: &F,
    urls: &'a [String],
) -> Result<(&'a str, String), FetchError> {
    let mut last_error = FetchError::NoCandidates;
    for url in urls {
        match fetcher.fetch(url).await {
            Ok(body) => return Ok((url.as_str(), body)),
            Err(e) => {
                warn!(%url, error = %e, "Candidate URL failed; trying next");
                last_error = e;
            }
        }
    }
    Err(last_error)
}

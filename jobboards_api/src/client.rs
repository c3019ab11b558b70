//! HTTP fetching with retries for job-board pages.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, COOKIE, USER_AGENT};
use scraper::Html;

use crate::{types::RequestConfig, user_agent::pick_user_agent, Error};

/// Status reported once retries are exhausted on transport or server errors.
pub const FAILED_STATUS: u16 = 599;

/// Result of fetching one page.
///
/// `document` is only present for a successful (< 400) response with a
/// non-empty body. Failed fetches carry an empty `html` and either the
/// client-error status as returned or [`FAILED_STATUS`] once retries ran out.
#[derive(Debug)]
pub struct FetchedPage {
    pub html: String,
    pub document: Option<Html>,
    pub status: u16,
}

impl FetchedPage {
    fn failed(status: u16) -> Self {
        Self {
            html: String::new(),
            document: None,
            status,
        }
    }

    /// True when the page parsed and the status is below 400.
    pub fn is_usable(&self) -> bool {
        self.document.is_some() && self.status < 400
    }
}

/// How often and how patiently to retry server errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first one.
    pub retries: usize,
    /// Linear backoff step: attempt `n` (1-based) waits `backoff * n`.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 2,
            backoff: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Reads `JOBBOARDS_RETRY_MAX` and `JOBBOARDS_RETRY_BACKOFF_MS`, falling
    /// back to the defaults for missing or unparsable values.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            retries: env_parse("JOBBOARDS_RETRY_MAX").unwrap_or(defaults.retries),
            backoff: env_parse("JOBBOARDS_RETRY_BACKOFF_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.backoff),
        }
    }

    pub fn delay_for_attempt(&self, attempt: usize) -> Duration {
        self.backoff.saturating_mul(attempt as u32)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Page fetcher bound to one request configuration.
///
/// The underlying `reqwest::Client` carries the timeout, cookies and proxies;
/// the user agent is picked per request so a configured pool rotates.
pub struct Fetcher {
    http: reqwest::Client,
    config: RequestConfig,
    retry: RetryPolicy,
}

impl Fetcher {
    pub fn new(config: RequestConfig, retry: RetryPolicy) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "accept",
            HeaderValue::from_static("text/html,application/xhtml+xml"),
        );
        headers.insert("accept-language", HeaderValue::from_static("en-US,en;q=0.9"));
        if let Some(cookie) = config.cookie_header() {
            let value =
                HeaderValue::from_str(&cookie).map_err(|_| Error::InvalidCookie(cookie.clone()))?;
            headers.insert(COOKIE, value);
        }

        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout())
            .default_headers(headers);
        for (scheme, url) in &config.proxies {
            let proxy = match scheme.as_str() {
                "http" => reqwest::Proxy::http(url),
                "https" => reqwest::Proxy::https(url),
                _ => reqwest::Proxy::all(url),
            }
            .map_err(|_| Error::InvalidProxy {
                scheme: scheme.clone(),
                url: url.clone(),
            })?;
            builder = builder.proxy(proxy);
        }

        Ok(Self {
            http: builder.build()?,
            config,
            retry,
        })
    }

    /// GETs `url`, retrying 5xx responses and transport errors.
    ///
    /// Never returns an error: see [`FetchedPage`] for how failures are reported.
    pub async fn fetch_page(&self, url: &str) -> FetchedPage {
        for attempt in 0..=self.retry.retries {
            let last_attempt = attempt == self.retry.retries;
            let sent = self
                .http
                .get(url)
                .header(USER_AGENT, pick_user_agent(&self.config))
                .send()
                .await;

            let resp = match sent {
                Ok(resp) => resp,
                Err(e) => {
                    if last_attempt {
                        tracing::error!("fetch error {} on {}", e, url);
                    } else {
                        self.backoff(attempt, url).await;
                    }
                    continue;
                }
            };

            let status = resp.status();
            if status.is_server_error() {
                if last_attempt {
                    tracing::error!(
                        "{} still returning {} after {} retries",
                        url,
                        status,
                        self.retry.retries
                    );
                    return FetchedPage::failed(FAILED_STATUS);
                }
                self.backoff(attempt, url).await;
                continue;
            }
            if status.as_u16() >= 400 {
                return FetchedPage::failed(status.as_u16());
            }

            match resp.text().await {
                Ok(html) => {
                    let document = if html.is_empty() {
                        None
                    } else {
                        Some(Html::parse_document(&html))
                    };
                    return FetchedPage {
                        html,
                        document,
                        status: status.as_u16(),
                    };
                }
                Err(e) => {
                    if last_attempt {
                        tracing::error!("failed to read body from {}: {}", url, e);
                    } else {
                        self.backoff(attempt, url).await;
                    }
                }
            }
        }

        FetchedPage::failed(FAILED_STATUS)
    }

    async fn backoff(&self, attempt: usize, url: &str) {
        let delay = self.retry.delay_for_attempt(attempt + 1);
        tracing::warn!(
            "retrying {} (attempt {}/{}) in {:.1}s",
            url,
            attempt + 1,
            self.retry.retries,
            delay.as_secs_f64()
        );
        tokio::time::sleep(delay).await;
    }
}

//! Proxy-rotating HTTP fetcher for upstream torrent sites.
//!
//! Every logical fetch goes through one of several CORS-bypass proxies,
//! chosen per attempt together with a browser User-Agent. Failed attempts
//! are retried with linear backoff until the configured attempt budget
//! is spent.

use std::future::Future;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{FetchConfig, ProxySelection};
use crate::error::SearchError;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const ACCEPT_JSON: &str = "application/json";

/// Something that can retrieve page bodies for extractors and the resolver.
///
/// [`ProxyFetcher`] is the production implementation; tests substitute
/// stubs that serve fixture documents and count calls.
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` through the proxy layer, retrying per policy.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, SearchError>> + Send;

    /// Fetch `url` directly, without a proxy, expecting JSON. Single attempt.
    fn fetch_direct(&self, url: &str) -> impl Future<Output = Result<String, SearchError>> + Send;
}

/// Build a [`reqwest::Client`] configured for upstream scraping.
///
/// The client has:
/// - Per-attempt timeout from config
/// - Brotli, gzip and deflate decompression
/// - A bounded redirect policy
///
/// User-Agent is set per request, not on the client.
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &FetchConfig) -> Result<reqwest::Client, SearchError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

/// Append the percent-encoded `target` to a proxy template.
pub fn proxy_url(template: &str, target: &str) -> String {
    format!("{template}{}", urlencoding::encode(target))
}

/// Stateless fetcher that rotates proxies and User-Agents per attempt.
#[derive(Debug, Clone)]
pub struct ProxyFetcher {
    client: reqwest::Client,
    config: FetchConfig,
}

impl ProxyFetcher {
    /// Create a fetcher from a validated [`FetchConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] for empty pools or a zero attempt
    /// budget, or [`SearchError::Http`] if the client cannot be built.
    pub fn new(config: FetchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let client = build_client(&config)?;
        Ok(Self { client, config })
    }

    /// The pool and retry policy this fetcher was built with.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Pick the proxy template and User-Agent for 1-based `attempt`.
    fn pick(&self, attempt: u32) -> (&str, &str) {
        let proxies = &self.config.proxy_templates;
        let agents = &self.config.user_agents;
        let (p, a) = match self.config.selection {
            ProxySelection::Random => {
                let mut rng = rand::thread_rng();
                (rng.gen_range(0..proxies.len()), rng.gen_range(0..agents.len()))
            }
            ProxySelection::Seeded(seed) => {
                let mut rng = StdRng::seed_from_u64(attempt_seed(seed, attempt));
                (rng.gen_range(0..proxies.len()), rng.gen_range(0..agents.len()))
            }
        };
        (proxies[p].as_str(), agents[a].as_str())
    }

    /// One GET with the browser header set.
    async fn get(&self, url: &str, user_agent: &str, accept: &str) -> Result<String, SearchError> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", user_agent)
            .header("Accept", accept)
            .header("Accept-Language", "en-US,en;q=0.5")
            .header("Accept-Encoding", "gzip, deflate")
            .header("Connection", "keep-alive")
            .header("Upgrade-Insecure-Requests", "1")
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("request failed: {e}")))?
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("bad status: {e}")))?;

        response
            .text()
            .await
            .map_err(|e| SearchError::Http(format!("response read failed: {e}")))
    }
}

impl PageFetcher for ProxyFetcher {
    async fn fetch(&self, target: &str) -> Result<String, SearchError> {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            let (proxy, user_agent) = self.pick(attempt);
            let outbound = proxy_url(proxy, target);
            tracing::trace!(attempt, proxy, target, "proxy fetch");

            match self.get(&outbound, user_agent, ACCEPT_HTML).await {
                Ok(body) => {
                    tracing::trace!(attempt, bytes = body.len(), "proxy response received");
                    return Ok(body);
                }
                Err(err) => {
                    tracing::warn!(attempt, proxy, error = %err, "proxy attempt failed");
                    if attempt >= max_attempts {
                        return Err(err);
                    }
                    let backoff = self.config.backoff_base_ms.saturating_mul(u64::from(attempt));
                    tokio::time::sleep(Duration::from_millis(backoff)).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn fetch_direct(&self, url: &str) -> Result<String, SearchError> {
        let (_, user_agent) = self.pick(1);
        tracing::trace!(url, "direct fetch");
        self.get(url, user_agent, ACCEPT_JSON).await
    }
}

/// Mix the configured seed with the attempt ordinal.
fn attempt_seed(seed: u64, attempt: u32) -> u64 {
    seed ^ u64::from(attempt).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

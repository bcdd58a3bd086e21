//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls which sources are queried, per-source caps,
//! deadlines and caching. [`FetchConfig`] holds the proxy and User-Agent
//! pools plus the retry policy used by [`crate::http::ProxyFetcher`].
//! [`SourceEndpoints`] holds the upstream base URLs so tests can point
//! sources at a mock server.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::types::Source;

/// CORS-bypass proxies. The percent-encoded target URL is appended verbatim.
const DEFAULT_PROXY_TEMPLATES: &[&str] = &[
    "https://api.allorigins.win/raw?url=",
    "https://cors-anywhere.herokuapp.com/",
    "https://thingproxy.freeboard.io/fetch/",
    "https://api.codetabs.com/v1/proxy?quest=",
];

/// Realistic browser User-Agent strings, rotated per attempt.
const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:89.0) Gecko/20100101 Firefox/89.0",
];

/// How the fetcher picks a proxy and User-Agent for each attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProxySelection {
    /// Uniformly at random from the thread-local RNG.
    #[default]
    Random,
    /// Deterministic: attempt `n` draws from an RNG seeded with `(seed, n)`.
    Seeded(u64),
}

/// Proxy pool, identity pool and retry policy for outbound fetches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Proxy URL prefixes; the encoded target URL is appended to one of these.
    pub proxy_templates: Vec<String>,
    /// User-Agent strings drawn per attempt.
    pub user_agents: Vec<String>,
    /// Attempts per logical fetch, including the first.
    pub max_attempts: u32,
    /// Linear backoff unit: attempt `n` failing sleeps `n * backoff_base_ms`.
    pub backoff_base_ms: u64,
    /// Per-attempt HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Proxy / identity selection strategy.
    pub selection: ProxySelection,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            proxy_templates: DEFAULT_PROXY_TEMPLATES.iter().map(|s| s.to_string()).collect(),
            user_agents: DEFAULT_USER_AGENTS.iter().map(|s| s.to_string()).collect(),
            max_attempts: 3,
            backoff_base_ms: 1000,
            timeout_seconds: 10,
            selection: ProxySelection::Random,
        }
    }
}

impl FetchConfig {
    /// Validates the pools and retry policy.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.proxy_templates.is_empty() {
            return Err(SearchError::Config(
                "at least one proxy template is required".into(),
            ));
        }
        if self.user_agents.is_empty() {
            return Err(SearchError::Config(
                "at least one user agent is required".into(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(SearchError::Config(
                "max_attempts must be greater than 0".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Base URLs of the upstream sites. No trailing slash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceEndpoints {
    pub x1337: String,
    pub piratebay: String,
    pub apibay: String,
    pub yts: String,
    pub rarbg: String,
}

impl Default for SourceEndpoints {
    fn default() -> Self {
        Self {
            x1337: "https://1337x.to".into(),
            piratebay: "https://thepiratebay.org".into(),
            apibay: "https://apibay.org".into(),
            yts: "https://yts.mx".into(),
            rarbg: "https://rarbg.to".into(),
        }
    }
}

impl SourceEndpoints {
    /// Every endpoint rooted at `base`, for pointing all sources at one mock server.
    pub fn all_at(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        Self {
            x1337: base.clone(),
            piratebay: base.clone(),
            apibay: base.clone(),
            yts: base.clone(),
            rarbg: base,
        }
    }
}

/// Configuration for aggregated searches and magnet lookups.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Sources queried for an `all` search, concurrently, in merge order.
    pub sources: Vec<Source>,
    /// Maximum records taken from any single source.
    pub max_results_per_source: usize,
    /// Per-source deadline in seconds. 0 disables it.
    pub search_timeout_seconds: u64,
    /// How long to cache aggregated responses in seconds. 0 disables caching.
    pub cache_ttl_seconds: u64,
    /// Upstream base URLs.
    pub endpoints: SourceEndpoints,
    /// Proxy pool and retry policy.
    pub fetch: FetchConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            sources: Source::all().to_vec(),
            max_results_per_source: 10,
            search_timeout_seconds: 0,
            cache_ttl_seconds: 0,
            endpoints: SourceEndpoints::default(),
            fetch: FetchConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `sources` must not be empty
    /// - `max_results_per_source` must be greater than 0
    /// - the nested [`FetchConfig`] must be valid
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.sources.is_empty() {
            return Err(SearchError::Config(
                "at least one source must be enabled".into(),
            ));
        }
        if self.max_results_per_source == 0 {
            return Err(SearchError::Config(
                "max_results_per_source must be greater than 0".into(),
            ));
        }
        self.fetch.validate()
    }
}

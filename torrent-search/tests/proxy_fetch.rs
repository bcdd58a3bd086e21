//! Proxy fetcher contract tests.
//!
//! A wiremock server stands in for the CORS proxy. These tests verify:
//! - The target URL reaches the proxy percent-encoded in the query string
//! - Browser headers are sent with the chosen User-Agent
//! - Failed attempts are retried until one succeeds
//! - Exhausting the attempt budget returns the last error
//! - Backoff grows linearly with the attempt number
//! - A slow proxy is cut off by the per-attempt timeout
//! - Direct fetches skip the proxy and ask for JSON

use std::time::{Duration, Instant};

use torrent_search::{FetchConfig, PageFetcher, ProxyFetcher, ProxySelection, SearchError};
use wiremock::matchers::{header, headers, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const UA: &str = "Mozilla/5.0 (X11; Linux x86_64) TestAgent/1.0";

fn fetch_config(server: &MockServer, max_attempts: u32) -> FetchConfig {
    FetchConfig {
        proxy_templates: vec![format!("{}/raw?url=", server.uri())],
        user_agents: vec![UA.to_string()],
        max_attempts,
        backoff_base_ms: 0,
        timeout_seconds: 5,
        selection: ProxySelection::Seeded(7),
    }
}

#[tokio::test]
async fn target_is_percent_encoded_into_proxy_query() {
    let server = MockServer::start().await;
    let target = "https://1337x.to/search/big buck bunny/1/";

    Mock::given(method("GET"))
        .and(path("/raw"))
        .and(query_param("url", target))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = ProxyFetcher::new(fetch_config(&server, 1)).expect("fetcher");
    let body = fetcher.fetch(target).await.expect("fetch");
    assert_eq!(body, "<html>ok</html>");
}

#[tokio::test]
async fn browser_headers_are_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/raw"))
        .and(header("user-agent", UA))
        .and(headers("accept-language", vec!["en-US", "en;q=0.5"]))
        .and(headers(
            "accept",
            vec![
                "text/html",
                "application/xhtml+xml",
                "application/xml;q=0.9",
                "image/webp",
                "*/*;q=0.8",
            ],
        ))
        .and(header("upgrade-insecure-requests", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("page"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = ProxyFetcher::new(fetch_config(&server, 1)).expect("fetcher");
    assert_eq!(fetcher.fetch("https://yts.mx/").await.expect("fetch"), "page");
}

#[tokio::test]
async fn retries_after_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/raw"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/raw"))
        .respond_with(ResponseTemplate::new(200).set_body_string("second time lucky"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = ProxyFetcher::new(fetch_config(&server, 3)).expect("fetcher");
    let body = fetcher.fetch("https://rarbg.to/torrents.php").await.expect("fetch");
    assert_eq!(body, "second time lucky");
}

#[tokio::test]
async fn exhausted_attempts_return_last_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/raw"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let fetcher = ProxyFetcher::new(fetch_config(&server, 3)).expect("fetcher");
    let err = fetcher.fetch("https://thepiratebay.org/search/x/0/99/0").await.unwrap_err();
    match err {
        SearchError::Http(msg) => assert!(msg.contains("503"), "unexpected message: {msg}"),
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn backoff_grows_linearly_between_attempts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/raw"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let config = FetchConfig {
        backoff_base_ms: 150,
        ..fetch_config(&server, 3)
    };
    let fetcher = ProxyFetcher::new(config).expect("fetcher");

    let started = Instant::now();
    let result = fetcher.fetch("https://yts.mx/browse-movies/x").await;
    let elapsed = started.elapsed();

    assert!(result.is_err());
    // 150 ms after attempt 1, 300 ms after attempt 2, none after the last.
    assert!(elapsed >= Duration::from_millis(450), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_millis(2000), "elapsed {elapsed:?}");
}

#[tokio::test]
async fn slow_proxy_hits_attempt_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/raw"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("too late")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = FetchConfig {
        timeout_seconds: 1,
        ..fetch_config(&server, 1)
    };
    let fetcher = ProxyFetcher::new(config).expect("fetcher");

    let started = Instant::now();
    let err = fetcher.fetch("https://1337x.to/search/x/1/").await.unwrap_err();

    assert!(matches!(err, SearchError::Http(_)), "got {err:?}");
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn unreachable_proxy_is_an_http_error() {
    let config = FetchConfig {
        proxy_templates: vec!["http://127.0.0.1:9/raw?url=".to_string()],
        max_attempts: 2,
        backoff_base_ms: 0,
        timeout_seconds: 2,
        ..Default::default()
    };
    let fetcher = ProxyFetcher::new(config).expect("fetcher");
    let err = fetcher.fetch("https://1337x.to/").await.unwrap_err();
    assert!(matches!(err, SearchError::Http(_)));
}

#[tokio::test]
async fn direct_fetch_skips_proxy_and_accepts_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/q.php"))
        .and(query_param("q", "ubuntu"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/raw"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let fetcher = ProxyFetcher::new(fetch_config(&server, 3)).expect("fetcher");
    let body = fetcher
        .fetch_direct(&format!("{}/q.php?q=ubuntu&cat=0", server.uri()))
        .await
        .expect("direct");
    assert_eq!(body, "[]");
}

#[test]
fn empty_proxy_pool_rejected() {
    let config = FetchConfig {
        proxy_templates: vec![],
        ..Default::default()
    };
    let err = ProxyFetcher::new(config).unwrap_err();
    assert!(matches!(err, SearchError::Config(_)));
}

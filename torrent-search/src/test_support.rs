//! Shared fixtures and a scripted [`PageFetcher`] for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::error::SearchError;
use crate::http::PageFetcher;

/// Two 1337x rows: 120 and 15 seeders.
pub(crate) const X1337_HTML: &str = r#"<html><body>
<table class="table-list"><tbody>
<tr>
  <td class="name"><a href="/sub/1/0/"></a><a href="/torrent/1/ubuntu-a/">Ubuntu A</a></td>
  <td class="seeds">120</td><td class="leeches">4</td>
  <td class="size">3.1 GB<span class="seeds">120</span></td>
</tr>
<tr>
  <td class="name"><a href="/sub/1/0/"></a><a href="/torrent/2/ubuntu-b/">Ubuntu B</a></td>
  <td class="seeds">15</td><td class="leeches">2</td>
  <td class="size">700 MB<span class="seeds">15</span></td>
</tr>
</tbody></table>
</body></html>"#;

/// One Apibay entry with 5 seeders.
pub(crate) const APIBAY_JSON: &str =
    r#"[{"name":"X","size":1048576,"seeders":"5","leechers":"2","id":"9","info_hash":"ABCD"}]"#;

/// Two RARBG rows: 300 and 15 seeders.
pub(crate) const RARBG_HTML: &str = r#"<html><body>
<table class="lista2t">
<tr><td>Cat.</td><td>File</td><td>Added</td><td>Size</td><td>S.</td><td>L.</td></tr>
<tr><td></td><td><a href="/torrent/r1">Ubuntu R1</a></td><td></td><td>4 GB</td><td>300</td><td>9</td></tr>
<tr><td></td><td><a href="/torrent/r2">Ubuntu R2</a></td><td></td><td>1 GB</td><td>15</td><td>1</td></tr>
</table>
</body></html>"#;

/// 1337x detail page with a magnet.
pub(crate) const X1337_DETAIL_HTML: &str = r#"<html><body>
<div class="box-info-heading"><h1> Ubuntu 24.04 Desktop </h1></div>
<ul class="list">
  <li><a href="magnet:?xt=urn:btih:UBUNTU2404&amp;dn=ubuntu">Magnet Download</a></li>
  <li><strong>Total size</strong> <span class="size">5.7 GB</span></li>
  <li><strong>Seeders</strong> <span class="seeds">1,204</span></li>
  <li><strong>Leechers</strong> <span class="leeches">87</span></li>
</ul>
</body></html>"#;

/// Detail page with metadata but no magnet anchor.
pub(crate) const NO_MAGNET_HTML: &str = r#"<html><body>
<div class="box-info-heading"><h1>Removed torrent</h1></div>
<a href="/download/torrent-file">Download .torrent</a>
</body></html>"#;

enum Reply {
    Body(String),
    Fail(String),
}

struct Route {
    needle: String,
    reply: Reply,
    delay: Option<Duration>,
}

/// Serves canned bodies for URLs containing a registered substring.
///
/// Unrouted URLs fail like an exhausted proxy. Every call is counted.
pub(crate) struct StubFetcher {
    routes: Vec<Route>,
    calls: AtomicUsize,
}

impl StubFetcher {
    pub(crate) fn new() -> Self {
        Self {
            routes: Vec::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn page(mut self, needle: &str, body: &str) -> Self {
        self.routes.push(Route {
            needle: needle.to_string(),
            reply: Reply::Body(body.to_string()),
            delay: None,
        });
        self
    }

    pub(crate) fn failing(mut self, needle: &str) -> Self {
        self.routes.push(Route {
            needle: needle.to_string(),
            reply: Reply::Fail(format!("{needle}: 503 Service Unavailable")),
            delay: None,
        });
        self
    }

    pub(crate) fn slow(mut self, needle: &str, body: &str, delay: Duration) -> Self {
        self.routes.push(Route {
            needle: needle.to_string(),
            reply: Reply::Body(body.to_string()),
            delay: Some(delay),
        });
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn respond(&self, url: &str) -> Result<String, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let route = match self.routes.iter().find(|r| url.contains(&r.needle)) {
            Some(r) => r,
            None => return Err(SearchError::Http(format!("no route for {url}"))),
        };
        if let Some(delay) = route.delay {
            tokio::time::sleep(delay).await;
        }
        match &route.reply {
            Reply::Body(body) => Ok(body.clone()),
            Reply::Fail(msg) => Err(SearchError::Http(msg.clone())),
        }
    }
}

impl PageFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<String, SearchError> {
        self.respond(url).await
    }

    async fn fetch_direct(&self, url: &str) -> Result<String, SearchError> {
        self.respond(url).await
    }
}

//! In-memory fetcher for testing.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::error::{ErrorKind, Result};
use crate::{FetchOutcome, Fetcher, Page};

#[derive(Debug, Clone)]
enum Response {
    Serve { body: String, token: Option<String> },
    Fail(ErrorKind),
}

/// In-memory fetcher for testing.
///
/// Pages are registered per URL and can be swapped or made to fail between
/// calls. A request presenting the token a page is currently served with is
/// answered with [`FetchOutcome::Unchanged`], like an origin honouring
/// `If-None-Match`. Unregistered URLs answer with a 404.
///
/// # Examples
///
/// ```
/// use jotunn_fetch::{FetchOutcome, Fetcher, MockFetcher};
/// use url::Url;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let fetcher = MockFetcher::new();
/// fetcher.serve("https://example.org/items.html", "<table></table>", Some("\"v1\""));
///
/// let url = Url::parse("https://example.org/items.html").unwrap();
/// let outcome = fetcher.fetch(&url, Some("\"v1\"")).await.unwrap();
/// assert_eq!(outcome, FetchOutcome::Unchanged);
/// assert_eq!(fetcher.calls(), 1);
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MockFetcher {
    responses: Mutex<HashMap<Url, Response>>,
    requests: Mutex<Vec<(Url, Option<String>)>>,
    calls: AtomicUsize,
    latency: Option<Duration>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every response, to widen race windows in concurrency tests.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Serve `body` (with an optional ETag) for `url` from now on.
    ///
    /// Panics if `url` does not parse. If test setup is wrong, then test
    /// should not pass.
    pub fn serve(&self, url: &str, body: impl Into<String>, token: Option<&str>) {
        let response = Response::Serve {
            body: body.into(),
            token: token.map(str::to_string),
        };
        self.set(url, response);
    }

    /// Fail every request for `url` with `kind` from now on.
    pub fn fail(&self, url: &str, kind: ErrorKind) {
        self.set(url, Response::Fail(kind));
    }

    /// Number of `fetch` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every request made so far, with the token it presented.
    pub fn requests(&self) -> Vec<(Url, Option<String>)> {
        self.requests.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }

    fn set(&self, url: &str, response: Response) {
        let Ok(url) = Url::parse(url) else {
            // The panic here is DELIBERATE. MockFetcher is intended to be
            // used in tests; panics are expected. There is no error result.
            panic!("MockFetcher: invalid URL {url}");
        };
        self.responses.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).insert(url, response);
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &Url, token: Option<&str>) -> Result<FetchOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((url.clone(), token.map(str::to_string)));
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        let response = self.responses.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).get(url).cloned();
        match response {
            None => exn::bail!(ErrorKind::Status(404)),
            Some(Response::Fail(kind)) => exn::bail!(kind),
            Some(Response::Serve { token: served, .. }) if served.is_some() && served.as_deref() == token => {
                Ok(FetchOutcome::Unchanged)
            },
            Some(Response::Serve { body, token }) => Ok(FetchOutcome::Fetched(Page {
                url: url.clone(),
                body,
                token,
            })),
        }
    }
}
